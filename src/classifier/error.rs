//! Error types for classifier configuration.

use thiserror::Error;

/// Errors raised while building a [`ClassifierConfig`](crate::classifier::ClassifierConfig).
///
/// Classification itself never fails; only configuration can be rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A minute threshold was zero or negative.
    #[error("{name} must be a positive number of minutes, got {value}")]
    NonPositiveThreshold { name: &'static str, value: i64 },

    /// A minute threshold too large to represent as a duration.
    #[error("{name} is out of range: {value}")]
    ThresholdOutOfRange { name: &'static str, value: i64 },

    /// The timezone identifier is not a known IANA zone.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The warning threshold must fire before the critical one.
    #[error("warning_after_minutes ({warning}) must be lower than critical_after_minutes ({critical})")]
    UrgencyThresholdOrder { warning: i64, critical: i64 },
}
