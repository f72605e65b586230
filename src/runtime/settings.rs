//! Board settings loaded from a TOML file.
//!
//! Every key is optional; a missing file section falls back to the defaults
//! used on the shop floor (10 minute display windows, Sao Paulo time, refresh
//! every 45 seconds).
//!
//! ```toml
//! timezone = "America/Sao_Paulo"
//! layout = "customer"              # or "operations"
//! sort = "order-id-desc"           # or "customer-name-asc"
//! refresh_interval_secs = 45
//! max_checkout_age_minutes = 10
//! max_pickup_age_minutes = 10
//! warning_after_minutes = 2
//! critical_after_minutes = 4
//! counter_channel = "BALCAO"       # "" keeps every channel
//! branches = []                    # empty keeps every branch
//! today_only = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::classifier::{
    ClassifierConfig, ConfigError, DEFAULT_CRITICAL_AFTER_MINUTES, DEFAULT_MAX_AGE_MINUTES, DEFAULT_TIMEZONE,
    DEFAULT_WARNING_AFTER_MINUTES,
};
use crate::domain::{BoardLayout, SortOrder};
use crate::filter::{BranchSelection, SnapshotFilter, DEFAULT_COUNTER_CHANNEL};

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 45;

/// Errors raised while loading or validating settings.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse settings file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("refresh_interval_secs must be positive")]
    InvalidRefreshInterval,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardSettings {
    pub timezone: String,
    pub layout: BoardLayout,
    pub sort: SortOrder,
    pub refresh_interval_secs: u64,
    pub max_checkout_age_minutes: i64,
    pub max_pickup_age_minutes: i64,
    pub warning_after_minutes: i64,
    pub critical_after_minutes: i64,
    pub counter_channel: String,
    pub branches: Vec<String>,
    pub today_only: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            layout: BoardLayout::default(),
            sort: SortOrder::default(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            max_checkout_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            max_pickup_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            warning_after_minutes: DEFAULT_WARNING_AFTER_MINUTES,
            critical_after_minutes: DEFAULT_CRITICAL_AFTER_MINUTES,
            counter_channel: DEFAULT_COUNTER_CHANNEL.to_string(),
            branches: Vec::new(),
            today_only: true,
        }
    }
}

impl BoardSettings {
    /// Reads and parses a settings file. Values are validated later, by
    /// [`classifier_config`](Self::classifier_config) and
    /// [`refresh_interval`](Self::refresh_interval).
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| match e {
            SettingsError::Parse { message, .. } => SettingsError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| SettingsError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn classifier_config(&self) -> Result<ClassifierConfig, SettingsError> {
        Ok(ClassifierConfig::builder()
            .timezone(self.timezone.as_str())
            .layout(self.layout)
            .sort(self.sort)
            .max_checkout_age_minutes(self.max_checkout_age_minutes)
            .max_pickup_age_minutes(self.max_pickup_age_minutes)
            .warning_after_minutes(self.warning_after_minutes)
            .critical_after_minutes(self.critical_after_minutes)
            .build()?)
    }

    pub fn snapshot_filter(&self) -> SnapshotFilter {
        let channel = self.counter_channel.trim();
        SnapshotFilter {
            branches: if self.branches.is_empty() {
                BranchSelection::All
            } else {
                BranchSelection::only(self.branches.iter().cloned())
            },
            channel: (!channel.is_empty()).then(|| channel.to_string()),
            today_only: self.today_only,
        }
    }

    pub fn refresh_interval(&self) -> Result<Duration, SettingsError> {
        if self.refresh_interval_secs == 0 {
            return Err(SettingsError::InvalidRefreshInterval);
        }
        Ok(Duration::from_secs(self.refresh_interval_secs))
    }

    /// Checks every value without building anything.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.classifier_config()?;
        self.refresh_interval()?;
        Ok(())
    }
}
