//! UseCase 層
//!
//! セッションプロトコルの各操作を一つずつユースケースとして実装する。
//! 各ユースケースは送信指示（`Dispatch`）を返すだけで、送信そのものは
//! `EventRouter` が行う。

mod connect_client;
mod disconnect_client;
pub mod error;
mod event_router;
mod join_chat;
mod presence;
mod relay_signal;
mod send_message;
mod session_protocol;
mod typing;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::ConnectError;
pub use event_router::EventRouter;
pub use join_chat::JoinChatUseCase;
pub use relay_signal::RelaySignalUseCase;
pub use send_message::SendMessageUseCase;
pub use session_protocol::SessionProtocol;
pub use typing::TypingUseCase;
