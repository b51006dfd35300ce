//! プロトコルイベント定義
//!
//! クライアントから届くイベント（Inbound）とサーバーが送信するイベント（Outbound）。
//! 通信形式に依存しない語彙で、ワイヤ形式への変換は `infrastructure::dto` が行う。

use serde_json::value::RawValue;

use super::{entity::Session, value_object::ConnectionId, value_object::DisplayName};

/// 中身を解釈せずに転送するペイロード
///
/// チャットメッセージや WebRTC のネゴシエーション（offer / answer / ICE candidate）を運ぶ。
/// 受信した JSON テキストをそのまま保持するため、再エンコードしても値も表記も変わらない。
/// `None` はペイロードが無い（`null` として送信する）ことを表す。
#[derive(Debug, Clone, Default)]
pub struct Envelope(Option<Box<RawValue>>);

impl Envelope {
    pub fn new(raw: Option<Box<RawValue>>) -> Self {
        Self(raw)
    }

    /// 受信したままの JSON
    pub fn as_raw(&self) -> Option<&RawValue> {
        self.0.as_deref()
    }

    /// 受信したままの JSON テキスト（ペイロードが無ければ `null`）
    pub fn as_str(&self) -> &str {
        self.0.as_deref().map_or("null", RawValue::get)
    }
}

/// テキストが完全に一致する場合のみ等しい
impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

#[cfg(test)]
impl Envelope {
    /// テスト用：JSON テキストから作成
    pub(crate) fn from_text(text: &str) -> Self {
        Self(Some(RawValue::from_string(text.to_string()).unwrap()))
    }
}

/// ピア間で中継する通話ネゴシエーション
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    CallUser(Envelope),
    MakeAnswer(Envelope),
    IceCandidate(Envelope),
    EndCall,
}

impl Signal {
    /// イベント名（ログ用）
    pub fn name(&self) -> &'static str {
        match self {
            Signal::CallUser(_) => "call_user",
            Signal::MakeAnswer(_) => "make_answer",
            Signal::IceCandidate(_) => "ice_candidate",
            Signal::EndCall => "end_call",
        }
    }
}

/// クライアントから届くイベント
///
/// 接続・切断はトランスポートのライフサイクルであり、ここには含まない。
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// 送信元の接続に表示名を結びつける（`None` は名前が指定されなかったことを表す）
    Join { username: Option<String> },
    SendMessage(Envelope),
    Typing,
    StopTyping,
    Signal(Signal),
}

impl InboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::Join { .. } => "join_chat",
            InboundEvent::SendMessage(_) => "send_message",
            InboundEvent::Typing => "typing",
            InboundEvent::StopTyping => "stop_typing",
            InboundEvent::Signal(signal) => signal.name(),
        }
    }
}

/// チャットログに表示するメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum ChatMessage {
    /// サーバーが生成する通知（参加・退出）
    System(String),
    /// クライアントのペイロードをそのまま中継
    Relayed(Envelope),
}

impl ChatMessage {
    pub fn joined(name: &DisplayName) -> Self {
        ChatMessage::System(format!("{} has joined.", name))
    }

    pub fn left(name: &DisplayName) -> Self {
        ChatMessage::System(format!("{} has left.", name))
    }
}

/// サーバーが送信するイベント
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    ReceiveMessage(ChatMessage),
    /// 参加者リスト全体（毎回レジストリから再計算）
    UpdateUserList(Vec<Session>),
    DisplayTyping {
        username: DisplayName,
        connection_id: ConnectionId,
    },
    HideTyping {
        connection_id: ConnectionId,
    },
    CallMade(Envelope),
    AnswerMade(Envelope),
    IceCandidate(Envelope),
    CallEnded,
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::ReceiveMessage(_) => "receive_message",
            OutboundEvent::UpdateUserList(_) => "update_user_list",
            OutboundEvent::DisplayTyping { .. } => "display_typing",
            OutboundEvent::HideTyping { .. } => "hide_typing",
            OutboundEvent::CallMade(_) => "call_made",
            OutboundEvent::AnswerMade(_) => "answer_made",
            OutboundEvent::IceCandidate(_) => "ice_candidate",
            OutboundEvent::CallEnded => "call_ended",
        }
    }
}

impl From<Signal> for OutboundEvent {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::CallUser(envelope) => OutboundEvent::CallMade(envelope),
            Signal::MakeAnswer(envelope) => OutboundEvent::AnswerMade(envelope),
            Signal::IceCandidate(envelope) => OutboundEvent::IceCandidate(envelope),
            Signal::EndCall => OutboundEvent::CallEnded,
        }
    }
}
