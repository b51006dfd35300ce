//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! 追加順を保つため、セッションを `Vec` で保持します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, DisplayName, Session, SessionRepository};

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    /// 参加中のセッション（追加順）
    sessions: Mutex<Vec<Session>>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn put(&self, connection_id: ConnectionId, display_name: DisplayName) {
        let mut sessions = self.sessions.lock().await;
        match sessions
            .iter_mut()
            .find(|session| session.connection_id == connection_id)
        {
            Some(existing) => existing.display_name = display_name,
            None => sessions.push(Session::new(connection_id, display_name)),
        }
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let index = sessions
            .iter()
            .position(|session| &session.connection_id == connection_id)?;
        Some(sessions.remove(index))
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .find(|session| &session.connection_id == connection_id)
            .map(|session| session.display_name.clone())
    }

    async fn snapshot(&self) -> Vec<Session> {
        let sessions = self.sessions.lock().await;
        sessions.clone()
    }
}
