use chrono::Duration;
use chrono_tz::Tz;

use crate::classifier::ConfigError;
use crate::domain::{BoardLayout, SortOrder};

pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";
pub const DEFAULT_MAX_AGE_MINUTES: i64 = 10;
pub const DEFAULT_WARNING_AFTER_MINUTES: i64 = 2;
pub const DEFAULT_CRITICAL_AFTER_MINUTES: i64 = 4;

/// Validated classifier settings.
///
/// Only obtainable through [`ClassifierConfigBuilder::build`], so every value
/// held here has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    max_checkout_age_minutes: i64,
    max_pickup_age_minutes: i64,
    timezone: Tz,
    layout: BoardLayout,
    sort: SortOrder,
    warning_after_minutes: i64,
    critical_after_minutes: i64,
}

impl ClassifierConfig {
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }

    /// Display window of the "Ready for Checkout" panel.
    pub fn max_checkout_age(&self) -> Duration {
        Duration::minutes(self.max_checkout_age_minutes)
    }

    /// Display window of the "Ready for Pickup" panel.
    pub fn max_pickup_age(&self) -> Duration {
        Duration::minutes(self.max_pickup_age_minutes)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn warning_after_minutes(&self) -> i64 {
        self.warning_after_minutes
    }

    pub fn critical_after_minutes(&self) -> i64 {
        self.critical_after_minutes
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_checkout_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            max_pickup_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            timezone: chrono_tz::America::Sao_Paulo,
            layout: BoardLayout::default(),
            sort: SortOrder::default(),
            warning_after_minutes: DEFAULT_WARNING_AFTER_MINUTES,
            critical_after_minutes: DEFAULT_CRITICAL_AFTER_MINUTES,
        }
    }
}

/// Builder for [`ClassifierConfig`].
///
/// # Example
/// ```
/// use order_board::classifier::ClassifierConfig;
/// use order_board::domain::BoardLayout;
///
/// let config = ClassifierConfig::builder()
///     .timezone("America/Sao_Paulo")
///     .max_checkout_age_minutes(15)
///     .layout(BoardLayout::Operations)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_checkout_age().num_minutes(), 15);
/// ```
#[derive(Debug, Clone)]
pub struct ClassifierConfigBuilder {
    max_checkout_age_minutes: i64,
    max_pickup_age_minutes: i64,
    timezone: String,
    layout: BoardLayout,
    sort: SortOrder,
    warning_after_minutes: i64,
    critical_after_minutes: i64,
}

impl Default for ClassifierConfigBuilder {
    fn default() -> Self {
        Self {
            max_checkout_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            max_pickup_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            timezone: DEFAULT_TIMEZONE.to_string(),
            layout: BoardLayout::default(),
            sort: SortOrder::default(),
            warning_after_minutes: DEFAULT_WARNING_AFTER_MINUTES,
            critical_after_minutes: DEFAULT_CRITICAL_AFTER_MINUTES,
        }
    }
}

impl ClassifierConfigBuilder {
    pub fn max_checkout_age_minutes(mut self, minutes: i64) -> Self {
        self.max_checkout_age_minutes = minutes;
        self
    }

    pub fn max_pickup_age_minutes(mut self, minutes: i64) -> Self {
        self.max_pickup_age_minutes = minutes;
        self
    }

    /// IANA timezone identifier, e.g. `America/Sao_Paulo`.
    pub fn timezone(mut self, name: impl Into<String>) -> Self {
        self.timezone = name.into();
        self
    }

    pub fn layout(mut self, layout: BoardLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn warning_after_minutes(mut self, minutes: i64) -> Self {
        self.warning_after_minutes = minutes;
        self
    }

    pub fn critical_after_minutes(mut self, minutes: i64) -> Self {
        self.critical_after_minutes = minutes;
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    /// - [`ConfigError::NonPositiveThreshold`] for any threshold `<= 0`
    /// - [`ConfigError::ThresholdOutOfRange`] for a threshold no duration can hold
    /// - [`ConfigError::UnknownTimezone`] for an unrecognized zone id
    /// - [`ConfigError::UrgencyThresholdOrder`] when warning is not below critical
    pub fn build(self) -> Result<ClassifierConfig, ConfigError> {
        positive("max_checkout_age_minutes", self.max_checkout_age_minutes)?;
        positive("max_pickup_age_minutes", self.max_pickup_age_minutes)?;
        positive("warning_after_minutes", self.warning_after_minutes)?;
        positive("critical_after_minutes", self.critical_after_minutes)?;

        if self.warning_after_minutes >= self.critical_after_minutes {
            return Err(ConfigError::UrgencyThresholdOrder {
                warning: self.warning_after_minutes,
                critical: self.critical_after_minutes,
            });
        }

        let timezone: Tz = self
            .timezone
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))?;

        Ok(ClassifierConfig {
            max_checkout_age_minutes: self.max_checkout_age_minutes,
            max_pickup_age_minutes: self.max_pickup_age_minutes,
            timezone,
            layout: self.layout,
            sort: self.sort,
            warning_after_minutes: self.warning_after_minutes,
            critical_after_minutes: self.critical_after_minutes,
        })
    }
}

fn positive(name: &'static str, value: i64) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositiveThreshold { name, value });
    }
    if Duration::try_minutes(value).is_none() {
        return Err(ConfigError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_floor_setup() {
        let config = ClassifierConfig::builder().build().unwrap();
        assert_eq!(config, ClassifierConfig::default());
        assert_eq!(config.max_checkout_age(), Duration::minutes(10));
        assert_eq!(config.max_pickup_age(), Duration::minutes(10));
        assert_eq!(config.timezone(), chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn rejects_non_positive_windows() {
        let err = ClassifierConfig::builder().max_checkout_age_minutes(0).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonPositiveThreshold { name: "max_checkout_age_minutes", value: 0 }
        );

        let err = ClassifierConfig::builder().max_pickup_age_minutes(-5).build().unwrap_err();
        assert!(err.to_string().contains("max_pickup_age_minutes"));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let err = ClassifierConfig::builder().timezone("Mars/Olympus_Mons").build().unwrap_err();
        assert_eq!(err, ConfigError::UnknownTimezone("Mars/Olympus_Mons".into()));
    }

    #[test]
    fn rejects_inverted_urgency_thresholds() {
        let err = ClassifierConfig::builder()
            .warning_after_minutes(5)
            .critical_after_minutes(5)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::UrgencyThresholdOrder { warning: 5, critical: 5 });
    }
}
