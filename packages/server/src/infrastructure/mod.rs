//! Infrastructure 層
//!
//! ドメイン層の trait の具体的な実装と、ワイヤ形式への変換を提供する。

pub mod dto;
pub mod message_pusher;
pub mod repository;
