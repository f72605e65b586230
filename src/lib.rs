//! # Order Board
//!
//! > **A fulfillment status board for counter orders.**
//!
//! This crate turns rows of a logistics reporting view into the panels shown on
//! a store's order board: what is waiting to be picked, what is waiting to be
//! checked, and what the customer can come and collect.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### A pure core
//! The heart of the crate is [`classifier::classify`]: a pure function of
//! `(records, reference time, configuration)`. It reads no clock and no ambient
//! timezone, so a snapshot classified twice yields the same board.
//!
//! ### Degrade, don't fail
//! Source data is messy. A timestamp that can't be parsed becomes "unknown", a
//! malformed invoice number becomes an empty cell, and a row without an order id
//! is left off the board. Only configuration is ever rejected, and it is
//! rejected up front.
//!
//! ### Closed sets
//! Buckets, layouts and sort orders are enums, not strings. A record is placed
//! by a single `match`, which is what keeps the panels mutually exclusive.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`domain`])
//! - **Role**: Raw view rows ([`OrderRow`](domain::OrderRow)), typed
//!   [`OrderRecord`](domain::OrderRecord)s, and the [`Board`](domain::Board) handed to renderers.
//!
//! ### 2. The Core ([`classifier`])
//! - **Role**: Bucket assignment, expiry windows, derived display fields and ordering.
//! - **Key items**: [`classify`](classifier::classify), [`ClassifierConfig`](classifier::ClassifierConfig).
//!
//! ### 3. Around the Core ([`filter`], [`metrics`], [`render`])
//! - **Role**: Choosing which records a board covers, stage timings for the
//!   operations view, and a plain-text renderer.
//!
//! ### 4. The Plumbing ([`source`], [`board_actor`], [`clients`], [`runtime`])
//! - **Role**: Fetching snapshots, refreshing on a timer in a dedicated actor,
//!   and wiring it all together from a settings file.
//! - **Key items**: [`OrderSource`](source::OrderSource), [`BoardSystem`](runtime::BoardSystem),
//!   [`BoardClient`](clients::BoardClient).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Render once and exit
//! order-board --rows snapshot.json --once
//!
//! # Keep the board up, refreshing on the configured interval
//! RUST_LOG=info order-board --rows snapshot.json --config board.toml
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod board_actor;
pub mod classifier;
pub mod clients;
pub mod domain;
pub mod filter;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod source;
