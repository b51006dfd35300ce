//! リクエストハンドラ

mod http;
mod websocket;

pub use http::{STATIC_ASSETS, get_presence, health_check, index};
pub use websocket::websocket_handler;
