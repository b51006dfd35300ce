//! UseCase: タイピング表示
//!
//! 送信者自身には送らない（自分が入力中であることは既に分かっている）。

use std::sync::Arc;

use crate::domain::{ConnectionId, Dispatch, DisplayName, OutboundEvent, SessionRepository};

/// タイピング表示のユースケース
pub struct TypingUseCase {
    /// Repository（表示名の参照のみ）
    repository: Arc<dyn SessionRepository>,
}

impl TypingUseCase {
    /// 新しい TypingUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 入力開始を通知
    ///
    /// 未参加の接続は "Someone" として表示する。
    pub async fn start(&self, sender: &ConnectionId) -> Vec<Dispatch> {
        let username = self
            .repository
            .get(sender)
            .await
            .unwrap_or_else(|| DisplayName::new(DisplayName::UNKNOWN_TYPIST));

        vec![Dispatch::to_all_except(
            sender.clone(),
            OutboundEvent::DisplayTyping {
                username,
                connection_id: sender.clone(),
            },
        )]
    }

    /// 入力終了を通知
    pub fn stop(&self, sender: &ConnectionId) -> Vec<Dispatch> {
        vec![Dispatch::to_all_except(
            sender.clone(),
            OutboundEvent::HideTyping {
                connection_id: sender.clone(),
            },
        )]
    }
}
