//! WebSocket フレームとドメインイベントの相互変換

use serde::Serialize;
use serde_json::{Value, value::RawValue};
use thiserror::Error;

use crate::domain::{ChatMessage, ConnectionId, Envelope, InboundEvent, OutboundEvent, Signal};
use crate::infrastructure::dto::websocket::{
    DisplayTypingMessage, EmptyMessage, Frame, MessageType, OutboundFrame, SidMessage,
    SystemMessage, UserInfo, UserListMessage,
};

/// 接続直後に送信するハンドシェイクのイベント名
pub const HANDSHAKE_EVENT: &str = "connect";

/// クライアントのフレームを解釈できなかった場合のエラー
#[derive(Debug, Error)]
pub enum InboundFrameError {
    #[error("Malformed frame: {0}")]
    Malformed(String),

    #[error("Unknown event '{0}'")]
    UnknownEvent(String),
}

// ========================================
// Frame → Domain Event
// ========================================

impl TryFrom<Frame> for InboundEvent {
    type Error = InboundFrameError;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        let event = match frame.event.as_str() {
            "join_chat" | "join" => InboundEvent::Join {
                username: requested_username(frame.data.as_deref()),
            },
            "send_message" => InboundEvent::SendMessage(Envelope::new(frame.data)),
            "typing" => InboundEvent::Typing,
            "stop_typing" => InboundEvent::StopTyping,
            "call_user" => InboundEvent::Signal(Signal::CallUser(Envelope::new(frame.data))),
            "make_answer" => InboundEvent::Signal(Signal::MakeAnswer(Envelope::new(frame.data))),
            "ice_candidate" => {
                InboundEvent::Signal(Signal::IceCandidate(Envelope::new(frame.data)))
            }
            "end_call" => InboundEvent::Signal(Signal::EndCall),
            _ => return Err(InboundFrameError::UnknownEvent(frame.event)),
        };
        Ok(event)
    }
}

/// 参加リクエストの `username`（文字列以外は指定なしとして扱う）
fn requested_username(data: Option<&RawValue>) -> Option<String> {
    let value: Value = serde_json::from_str(data?.get()).ok()?;
    value.get("username")?.as_str().map(str::to_string)
}

/// クライアントから届いたテキストフレームを解釈する
pub fn decode_inbound(text: &str) -> Result<InboundEvent, InboundFrameError> {
    let frame: Frame =
        serde_json::from_str(text).map_err(|e| InboundFrameError::Malformed(e.to_string()))?;
    InboundEvent::try_from(frame)
}

// ========================================
// Domain Event → Frame
// ========================================

/// 送信イベントを JSON テキストフレームにエンコードする
pub fn encode_outbound(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    let name = event.name();
    match event {
        OutboundEvent::ReceiveMessage(ChatMessage::System(content)) => encode(
            name,
            SystemMessage {
                r#type: MessageType::System,
                content: content.clone(),
            },
        ),
        OutboundEvent::ReceiveMessage(ChatMessage::Relayed(envelope)) => {
            encode(name, envelope.as_raw())
        }
        OutboundEvent::UpdateUserList(sessions) => {
            let users: Vec<UserInfo> = sessions
                .iter()
                .map(|session| UserInfo {
                    sid: session.connection_id.as_str().to_string(),
                    name: session.display_name.as_str().to_string(),
                })
                .collect();
            let count = users.len();
            encode(name, UserListMessage { users, count })
        }
        OutboundEvent::DisplayTyping {
            username,
            connection_id,
        } => encode(
            name,
            DisplayTypingMessage {
                username: username.as_str().to_string(),
                sid: connection_id.as_str().to_string(),
            },
        ),
        OutboundEvent::HideTyping { connection_id } => encode(
            name,
            SidMessage {
                sid: connection_id.as_str().to_string(),
            },
        ),
        OutboundEvent::CallMade(envelope)
        | OutboundEvent::AnswerMade(envelope)
        | OutboundEvent::IceCandidate(envelope) => encode(name, envelope.as_raw()),
        OutboundEvent::CallEnded => encode(name, EmptyMessage {}),
    }
}

/// クライアントに自身の接続 ID を伝えるハンドシェイクフレーム
pub fn handshake_frame(connection_id: &ConnectionId) -> Result<String, serde_json::Error> {
    encode(
        HANDSHAKE_EVENT,
        SidMessage {
            sid: connection_id.as_str().to_string(),
        },
    )
}

fn encode<T: Serialize>(event: &str, data: T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&OutboundFrame { event, data })
}
