//! DTO（Data Transfer Object）
//!
//! - `websocket`: WebSocket でやり取りする JSON フレーム
//! - `conversion`: フレームとドメインイベントの相互変換

pub mod conversion;
pub mod websocket;

pub use conversion::{InboundFrameError, decode_inbound, encode_outbound, handshake_frame};
