//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 接続の登録解除、セッション削除、退室通知の送信指示
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続の切断（退室メッセージ + 参加者リスト）
//! - エッジケース：未参加のまま切断（何も送信しない）

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, Dispatch, MessagePusher, OutboundEvent, SessionRepository};

use super::presence::presence_update;

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    /// Repository（セッションレジストリの抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 参加前の状態でも呼ばれてよい。その場合は登録解除のみ行い、
    /// 送信指示は空になる。
    ///
    /// # Returns
    ///
    /// 残りの接続宛ての送信指示（退室メッセージ → 参加者リストの順）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<Dispatch> {
        // 1. MessagePusher から登録解除（切断した接続には送らない）
        self.message_pusher
            .unregister_connection(connection_id)
            .await;

        // 2. Repository からセッションを削除
        let Some(session) = self.repository.remove(connection_id).await else {
            tracing::info!("Connection '{}' disconnected without joining", connection_id);
            return Vec::new();
        };
        tracing::info!(
            "Connection '{}' ('{}') left",
            connection_id,
            session.display_name
        );

        vec![
            Dispatch::to_all(OutboundEvent::ReceiveMessage(ChatMessage::left(
                &session.display_name,
            ))),
            presence_update(self.repository.as_ref()).await,
        ]
    }
}
