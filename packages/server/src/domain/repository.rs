//! Repository trait 定義
//!
//! ドメイン層が必要とするセッションレジストリのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, Session};

/// Session Repository trait
///
/// 接続 ID と表示名の対応を保持するレジストリ。
/// 書き込みは UseCase 層（セッションプロトコル）からのみ行う。
///
/// どの操作もエラーにならない：存在しないエントリの削除・取得は正常な結果として扱う。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// セッションを追加、または同じ接続 ID のエントリを置き換える
    ///
    /// 置き換えの場合も、スナップショット内の位置は最初に追加された位置のまま。
    async fn put(&self, connection_id: ConnectionId, display_name: DisplayName);

    /// セッションを削除し、削除したエントリを返す（存在しなければ `None`）
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 表示名を取得（未参加の接続は `None`）
    async fn get(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 全セッションを追加順に取得
    async fn snapshot(&self) -> Vec<Session>;
}
