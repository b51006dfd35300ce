//! Shared handler state.

use std::sync::Arc;

use crate::{config::ServerConfig, usecase::SessionProtocol};

/// Shared application state
pub struct AppState {
    /// Session Protocol（レジストリを所有し、イベントを処理する）
    pub protocol: Arc<SessionProtocol>,
    /// Server configuration
    pub config: ServerConfig,
}
