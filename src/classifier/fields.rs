//! Per-field conversions for derived display values.
//!
//! Each conversion returns `None` as its "unknown" marker instead of failing;
//! the `display_*` helpers turn that marker into the empty string the board shows.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::domain::Urgency;

const CUSTOMER_SEPARATOR: &str = " - ";

/// Integer part of an invoice number.
///
/// `None` for missing, NaN, infinite, or out-of-range values.
pub fn invoice_number(value: Option<f64>) -> Option<i64> {
    let value = value?;
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(value.trunc() as i64)
}

pub fn display_invoice_number(number: Option<i64>) -> String {
    number.map(|n| n.to_string()).unwrap_or_default()
}

/// Hour and minute of `at` in the operating timezone, e.g. `14:03`.
pub fn order_time(at: Option<&DateTime<Tz>>, tz: &Tz) -> Option<String> {
    at.map(|at| at.with_timezone(tz).format("%H:%M").to_string())
}

/// Customer display name.
///
/// Labels of the form `"<code> - <name>"` keep only what follows the first
/// separator; anything else is used as is.
pub fn customer_name(label: Option<&str>) -> Option<String> {
    let label = label?;
    Some(match label.split_once(CUSTOMER_SEPARATOR) {
        Some((_, name)) => name.to_string(),
        None => label.to_string(),
    })
}

/// Minutes elapsed between `entered` and `reference`.
pub fn minutes_since(entered: Option<&DateTime<Tz>>, reference: &DateTime<Tz>) -> Option<f64> {
    let elapsed = reference.signed_duration_since(*entered?);
    Some(elapsed.num_milliseconds() as f64 / 60_000.0)
}

/// Urgency for a record that has spent `minutes` in its status.
///
/// Thresholds are exclusive: exactly `warning_after` minutes is still normal.
pub fn urgency(minutes: Option<f64>, warning_after: i64, critical_after: i64) -> Option<Urgency> {
    let minutes = minutes?;
    Some(if minutes > critical_after as f64 {
        Urgency::Critical
    } else if minutes > warning_after as f64 {
        Urgency::Warning
    } else {
        Urgency::Normal
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use chrono_tz::America::Sao_Paulo;

    #[test]
    fn invoice_numbers_format_as_integers() {
        assert_eq!(invoice_number(Some(1234.0)), Some(1234));
        assert_eq!(display_invoice_number(invoice_number(Some(1234.0))), "1234");
        assert_eq!(invoice_number(Some(1234.9)), Some(1234));
        assert_eq!(display_invoice_number(invoice_number(None)), "");
        assert_eq!(invoice_number(Some(f64::NAN)), None);
        assert_eq!(invoice_number(Some(f64::INFINITY)), None);
        assert_eq!(invoice_number(Some(1e300)), None);
    }

    #[test]
    fn customer_name_strips_code_prefix() {
        assert_eq!(customer_name(Some("00123 - Jane Doe")).as_deref(), Some("Jane Doe"));
        assert_eq!(customer_name(Some("Jane Doe")).as_deref(), Some("Jane Doe"));
        assert_eq!(customer_name(Some("1 - Smith - Jones")).as_deref(), Some("Smith - Jones"));
        assert_eq!(customer_name(Some("Smith-Jones")).as_deref(), Some("Smith-Jones"));
        assert_eq!(customer_name(None), None);
    }

    #[test]
    fn order_time_uses_operating_zone() {
        let at = chrono::Utc
            .with_ymd_and_hms(2025, 6, 2, 17, 3, 59)
            .unwrap()
            .with_timezone(&chrono_tz::UTC);
        assert_eq!(order_time(Some(&at), &Sao_Paulo).as_deref(), Some("14:03"));
        assert_eq!(order_time(None, &Sao_Paulo), None);
    }

    #[test]
    fn minutes_and_urgency() {
        let now = Sao_Paulo.with_ymd_and_hms(2025, 6, 2, 14, 0, 0).unwrap();
        let entered = now - Duration::seconds(150);
        let minutes = minutes_since(Some(&entered), &now);
        assert_eq!(minutes, Some(2.5));
        assert_eq!(urgency(minutes, 2, 4), Some(Urgency::Warning));
        assert_eq!(urgency(Some(2.0), 2, 4), Some(Urgency::Normal));
        assert_eq!(urgency(Some(4.01), 2, 4), Some(Urgency::Critical));
        assert_eq!(urgency(None, 2, 4), None);
        assert_eq!(minutes_since(None, &now), None);
    }
}
