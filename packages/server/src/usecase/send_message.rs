//! UseCase: チャットメッセージの中継
//!
//! ペイロードは加工せず、送信者を含む全員に `receive_message` として送る。
//! 送信者の UI も他の参加者と同じ経路で更新されるようにするため。
//! メッセージ履歴は保持しない。

use crate::domain::{ChatMessage, ConnectionId, Dispatch, Envelope, OutboundEvent};

/// メッセージ送信のユースケース
#[derive(Debug, Default)]
pub struct SendMessageUseCase;

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new() -> Self {
        Self
    }

    /// メッセージ送信を実行
    ///
    /// 参加前の接続からも受け付ける。
    pub fn execute(&self, sender: &ConnectionId, payload: Envelope) -> Vec<Dispatch> {
        tracing::debug!("Relaying message from '{}' to everyone", sender);
        vec![Dispatch::to_all(OutboundEvent::ReceiveMessage(
            ChatMessage::Relayed(payload),
        ))]
    }
}
