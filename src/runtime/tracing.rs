//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! Logs go to **stderr** so that the board itself can own stdout. The format is
//! compact and hides the module prefix (`with_target(false)`).
//!
//! ## Usage
//!
//! ```bash
//! # Refresh summaries and failures
//! RUST_LOG=info order-board --rows snapshot.json
//!
//! # Per-pass details: filtered counts, skipped records
//! RUST_LOG=debug order-board --rows snapshot.json
//!
//! # Every record that matched no bucket
//! RUST_LOG=order_board::classifier=trace order-board --rows snapshot.json
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start, shutdown, number of refreshes
//! - **Refreshes**: fetched, visible and placed record counts
//! - **Degraded data**: skipped rows, failed fetches (the previous board stays up)

/// Initializes the tracing subscriber for the board.
///
/// Sets up:
/// - **Environment-based filtering** from `RUST_LOG`
/// - **Compact formatting** on stderr, without module targets
///
/// Call once, at the top of `main`; a second call panics because the global
/// subscriber is already set.
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!(rows = %path.display(), "Starting order board");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
