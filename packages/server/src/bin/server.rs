//! Presence and WebRTC signaling relay for the Parlor chat application.
//!
//! Serves the chat page and its PWA assets, and relays chat, typing and call
//! negotiation events between connected browsers over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server
//! cargo run --bin parlor-server -- --port 3001 --static-dir ./public
//! PORT=8443 cargo run --bin parlor-server
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use parlor_server::{
    config::{DEFAULT_HOST, DEFAULT_MAX_PAYLOAD_BYTES, DEFAULT_PORT, DEFAULT_STATIC_DIR, ServerConfig},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository},
    ui::Server,
    usecase::SessionProtocol,
};
use parlor_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "parlor-server")]
#[command(about = "Presence and WebRTC signaling relay for browser chat", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Maximum size in bytes of a single inbound WebSocket message
    #[arg(long, env = "MAX_PAYLOAD_BYTES", default_value_t = DEFAULT_MAX_PAYLOAD_BYTES)]
    max_payload_bytes: usize,

    /// Directory containing index.html, manifest.json, sw.js and the icons
    #[arg(long, env = "STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_payload_bytes: args.max_payload_bytes,
            static_dir: args.static_dir,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Repository (session registry)
    // 2. MessagePusher (WebSocket implementation)
    // 3. SessionProtocol (use cases + event router)
    // 4. Server
    let repository = Arc::new(InMemorySessionRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let protocol = Arc::new(SessionProtocol::new(repository, message_pusher));

    tracing::info!("Server starting on port {}...", config.port);
    let server = Server::new(config, protocol);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
