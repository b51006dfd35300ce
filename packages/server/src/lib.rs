//! Presence and signaling relay for the Parlor chat application.
//!
//! Tracks which display name each WebSocket connection represents, fans chat
//! messages and typing indicators out to the group, and relays WebRTC
//! negotiation messages between peers.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
