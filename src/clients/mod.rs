//! Type-safe wrappers around the board actor's request channel.

pub mod board_client;

pub use board_client::*;
