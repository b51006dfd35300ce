//! ドメイン層
//!
//! 値オブジェクト・エンティティ・イベントと、Infrastructure 層が実装する trait を定義する。

pub mod delivery;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use delivery::{Delivery, Dispatch};
pub use entity::Session;
pub use error::{MessagePushError, ValueObjectError};
pub use event::{ChatMessage, Envelope, InboundEvent, OutboundEvent, Signal};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::SessionRepository;
pub use value_object::{ConnectionId, ConnectionIdFactory, DisplayName};
