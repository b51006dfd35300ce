//! Repository の実装

pub mod inmemory;

pub use inmemory::InMemorySessionRepository;
