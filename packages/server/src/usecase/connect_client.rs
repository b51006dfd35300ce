//! UseCase: 接続処理
//!
//! トランスポートの接続直後に呼ばれる。接続は「未参加」状態で始まり、
//! レジストリにはまだ何も書き込まない（参加は join_chat で行う）。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - トランスポートが割り当てた接続 ID
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 接続成功
    /// * `Err(ConnectError)` - 同じ接続 ID が既に登録されている
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), ConnectError> {
        // 1. 重複チェック
        let connection_ids = self.message_pusher.connection_ids().await;
        if connection_ids.contains(&connection_id) {
            return Err(ConnectError::DuplicateConnectionId(
                connection_id.into_string(),
            ));
        }

        // 2. MessagePusher に接続を登録
        self.message_pusher
            .register_connection(connection_id.clone(), sender)
            .await;

        tracing::info!("User {} connected", connection_id);
        Ok(())
    }
}
