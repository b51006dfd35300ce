//! MessagePusher trait 定義
//!
//! 接続中のクライアントへイベントを送信するためのインターフェース。
//! WebSocket などの具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, OutboundEvent};

/// 各接続の送信キュー（エンコード済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 接続中のチャンネルを管理し、イベントを送信する。
/// 送信はキューに積むだけで、受信側の処理を待たない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続のチャンネルを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続のチャンネルを登録解除（未登録でも何もしない）
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 接続中の全ての接続 ID を取得（順不同）
    async fn connection_ids(&self) -> Vec<ConnectionId>;

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信し、実際に送信できた数を返す
    ///
    /// 既に閉じた接続や未登録の接続はスキップする（エラーにしない）。
    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &OutboundEvent) -> usize;
}
