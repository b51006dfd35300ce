//! Utilities shared by the Parlor binaries.

pub mod logger;
pub mod network;
