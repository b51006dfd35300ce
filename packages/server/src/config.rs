//! Server configuration.
//!
//! The `parlor-server` binary fills this from command-line flags and
//! environment variables (see `src/bin/server.rs`).

use std::path::PathBuf;

/// Bind to all interfaces so phones on the same network can reach the server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
/// 50 MiB. Inbound WebSocket messages above this are rejected by the transport.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_STATIC_DIR: &str = ".";

/// Runtime configuration of the relay server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Maximum size of one inbound WebSocket message (and frame)
    pub max_payload_bytes: usize,
    /// Directory holding `index.html` and the PWA assets
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// `host:port` string passed to the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
