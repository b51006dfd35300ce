//! HTTP エンドポイントのハンドラ

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    infrastructure::dto::websocket::{UserInfo, UserListMessage},
    ui::state::AppState,
};

/// `/` で配信するページ
pub const INDEX_FILE: &str = "index.html";

/// 静的ディレクトリから同名のパスで配信する PWA アセット
pub const STATIC_ASSETS: [&str; 4] = ["manifest.json", "sw.js", "icon-192.png", "icon-512.png"];

/// チャット画面を配信
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let path = state.config.static_dir.join(INDEX_FILE);
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Html(body).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Root document not found at {}", path.display());
            (StatusCode::NOT_FOUND, "index.html not found").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// ヘルスチェック
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// 現在の参加者リスト（`update_user_list` のペイロードと同じ形式）
pub async fn get_presence(State(state): State<Arc<AppState>>) -> Json<UserListMessage> {
    let users: Vec<UserInfo> = state
        .protocol
        .presence()
        .await
        .into_iter()
        .map(|session| UserInfo {
            sid: session.connection_id.into_string(),
            name: session.display_name.into_string(),
        })
        .collect();
    let count = users.len();
    Json(UserListMessage { users, count })
}
