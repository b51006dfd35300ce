//! エンティティ

use super::value_object::{ConnectionId, DisplayName};

/// 参加した接続に結びつくアプリケーション上の身元
///
/// 参加して初めて作成され、再参加で置き換わり、切断で削除される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
}

impl Session {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName) -> Self {
        Self {
            connection_id,
            display_name,
        }
    }
}
