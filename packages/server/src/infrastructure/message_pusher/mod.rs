//! MessagePusher の実装
//!
//! 接続ごとの送信キューを管理し、エンコード済みのフレームを積む。
//!
//! - `websocket`: axum WebSocket の書き込みタスクへつなぐ実装

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
