//! Pure data structures: raw view rows, typed order records, buckets and boards.

pub mod board;
pub mod bucket;
pub mod record;
pub mod row;

pub use board::*;
pub use bucket::*;
pub use record::*;
pub use row::*;
