//! Event Router
//!
//! 送信指示（[`Dispatch`]）を受け取り、配送モードから送信先を決めて送信する。
//! 送信はキューに積むだけで受信側を待たない。閉じた接続はスキップし、
//! 呼び出し元にエラーを返さない。レジストリには触れない。

use std::sync::Arc;

use crate::domain::{Delivery, Dispatch, MessagePusher};

/// Event Router
pub struct EventRouter {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl EventRouter {
    /// 新しい EventRouter を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 送信指示を順番に配送する
    ///
    /// # Returns
    ///
    /// 実際にキューへ積めた送信の総数
    pub async fn dispatch(&self, dispatches: &[Dispatch]) -> usize {
        if dispatches.is_empty() {
            return 0;
        }

        let connected = self.message_pusher.connection_ids().await;
        let mut delivered = 0;

        for dispatch in dispatches {
            match &dispatch.delivery {
                Delivery::DirectTo(target) => {
                    match self.message_pusher.push_to(target, &dispatch.event).await {
                        Ok(()) => delivered += 1,
                        Err(e) => {
                            tracing::debug!(
                                "Skipping '{}' for '{}': {}",
                                dispatch.event.name(),
                                target,
                                e
                            );
                        }
                    }
                }
                delivery => {
                    let targets = delivery.recipients(&connected);
                    delivered += self
                        .message_pusher
                        .broadcast(targets, &dispatch.event)
                        .await;
                }
            }
        }

        delivered
    }
}
