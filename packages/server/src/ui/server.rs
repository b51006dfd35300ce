//! Server execution logic.

use std::{net::IpAddr, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeFile, trace::TraceLayer};

use crate::{config::ServerConfig, usecase::SessionProtocol};

use super::{
    handler::{STATIC_ASSETS, get_presence, health_check, index, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let protocol = Arc::new(SessionProtocol::new(repository, message_pusher));
/// let server = Server::new(ServerConfig::default(), protocol);
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// SessionProtocol（接続イベントの処理本体）
    protocol: Arc<SessionProtocol>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(config: ServerConfig, protocol: Arc<SessionProtocol>) -> Self {
        Self { config, protocol }
    }

    /// Build the axum router: WebSocket endpoint, static assets, and API routes.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            protocol: self.protocol.clone(),
            config: self.config.clone(),
        });

        let mut app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(index))
            .route("/api/health", get(health_check))
            .route("/api/presence", get(get_presence));

        // PWA assets
        for asset in STATIC_ASSETS {
            app = app.route_service(
                &format!("/{}", asset),
                ServeFile::new(self.config.static_dir.join(asset)),
            );
        }

        app.layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(app_state)
    }

    /// Bind to the configured host and port and run until a shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Run on an already-bound listener until a shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener address cannot be read or serving fails.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let local_addr = listener.local_addr()?;
        let app = self.router();

        // Start the server
        tracing::info!("Parlor relay listening on {}", local_addr);
        if local_addr.ip().is_unspecified() {
            let lan_ip = IpAddr::V4(parlor_shared::network::local_ipv4());
            tracing::info!("On this network: http://{}:{}/", lan_ip, local_addr.port());
        }
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
