//! Runtime orchestration: settings, board lifecycle, and observability.
//!
//! # Main Components
//!
//! - [`BoardSettings`] - TOML settings and their validation
//! - [`BoardSystem`] - Spawns the board actor and shuts it down
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod board_system;
pub mod settings;
pub mod tracing;

pub use board_system::*;
pub use settings::*;
pub use self::tracing::*;
