//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 各接続の `UnboundedSender` を管理
//! - イベントのエンコードと送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、エンコード済みのフレームを積みます。
//! 各接続の書き込みタスクがキューを読み出してソケットに書き込むため、
//! 遅い受信者が他の受信者への配送を止めることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PusherChannel},
    infrastructure::dto::encode_outbound,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_connection(connection_id.clone(), tx).await;
/// pusher.push_to(&connection_id, &OutboundEvent::CallEnded).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        connections.insert(connection_id, sender);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if connections.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn connection_ids(&self) -> Vec<ConnectionId> {
        let connections = self.connections.lock().await;
        connections.keys().cloned().collect()
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let content =
            encode_outbound(event).map_err(|e| MessagePushError::PushFailed(e.to_string()))?;

        let connections = self.connections.lock().await;
        let sender = connections
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to connection '{}'", event.name(), connection_id);
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &OutboundEvent) -> usize {
        if targets.is_empty() {
            return 0;
        }

        let content = match encode_outbound(event) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Failed to encode '{}': {}", event.name(), e);
                return 0;
            }
        };

        let connections = self.connections.lock().await;
        let mut delivered = 0;
        for target in targets {
            let Some(sender) = connections.get(&target) else {
                // 送信対象の選定後に切断された
                tracing::debug!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                );
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!("Failed to push message to connection '{}': {}", target, e);
            } else {
                delivered += 1;
            }
        }
        tracing::debug!("Broadcasted '{}' to {} connection(s)", event.name(), delivered);

        delivered
    }
}
