//! Raw rows from the reporting view and their conversion into [`OrderRecord`]s.
//!
//! The view is loosely typed: identifiers may arrive as numbers or text,
//! invoice numbers as floats, timestamps with or without an offset. Every
//! column is therefore deserialized into a [`Cell`] and converted field by
//! field. A conversion that fails degrades that single field to `None`; it
//! never rejects the row.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::domain::OrderRecord;

/// A single loosely typed value from the view.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    /// Booleans, arrays, objects: nothing the board can use.
    Other(IgnoredAny),
}

impl Cell {
    fn as_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                Some(format!("{}", *n as i64))
            }
            Cell::Number(n) if n.is_finite() => Some(n.to_string()),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    fn as_id(&self) -> Option<u64> {
        match self {
            Cell::Number(n) if n.is_finite() && *n >= 0.0 && *n < u64::MAX as f64 && n.fract() == 0.0 => {
                Some(*n as u64)
            }
            Cell::Text(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
    }
}

/// One row of the logistics view, exactly as delivered.
///
/// Unknown columns are ignored and missing ones default to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderRow {
    pub order_id: Option<Cell>,
    pub invoice_number: Option<Cell>,
    pub customer_label: Option<Cell>,
    pub branch: Option<Cell>,
    pub channel: Option<Cell>,
    pub status_code: Option<Cell>,
    pub ordered_at: Option<Cell>,
    pub invoiced_at: Option<Cell>,
    pub picking_started_at: Option<Cell>,
    pub picking_finished_at: Option<Cell>,
    pub checking_started_at: Option<Cell>,
    pub checking_finished_at: Option<Cell>,
    pub total_order_time: Option<Cell>,
}

impl OrderRow {
    /// Converts the row into a typed record in the operating timezone `tz`.
    pub fn into_record(self, tz: &Tz) -> OrderRecord {
        let text = |cell: Option<Cell>| cell.as_ref().and_then(Cell::as_text);
        let timestamp = |cell: Option<Cell>| match cell {
            Some(Cell::Text(raw)) => parse_timestamp(&raw, tz),
            _ => None,
        };

        OrderRecord {
            order_id: self.order_id.as_ref().and_then(Cell::as_id),
            invoice_number: self.invoice_number.as_ref().and_then(Cell::as_number),
            customer_label: text(self.customer_label),
            branch: text(self.branch),
            channel: text(self.channel),
            status_code: text(self.status_code),
            ordered_at: timestamp(self.ordered_at),
            invoiced_at: timestamp(self.invoiced_at),
            picking_started_at: timestamp(self.picking_started_at),
            picking_finished_at: timestamp(self.picking_finished_at),
            checking_started_at: timestamp(self.checking_started_at),
            checking_finished_at: timestamp(self.checking_finished_at),
            total_order_time: match self.total_order_time {
                Some(Cell::Text(raw)) => parse_duration(&raw),
                Some(Cell::Number(secs)) if secs.is_finite() => {
                    Duration::try_milliseconds((secs * 1000.0).round() as i64)
                }
                _ => None,
            },
        }
    }
}

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a timestamp into the operating timezone.
///
/// Values with an explicit offset are converted into `tz`. Naive values are
/// taken as wall-clock time in `tz`; a wall-clock time that is ambiguous or
/// skipped by a DST transition yields `None`, as does anything unparseable.
pub fn parse_timestamp(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(tz));
        }
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive).single()
}

/// Parses an interval such as `00:12:30`, `00:12:30.5` or `1 day 02:00:00`.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (days, clock) = match raw.split_once(" day") {
        Some((days, rest)) => (days.trim().parse::<i64>().ok()?, rest.trim_start_matches('s').trim()),
        None => (0, raw),
    };

    let mut parts = clock.split(':');
    let hours: i64 = parts.next()?.trim().parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || hours < 0 || !(0..60).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return None;
    }

    if days < 0 {
        return None;
    }

    Duration::try_days(days)?
        .checked_add(&Duration::try_hours(hours)?)?
        .checked_add(&Duration::minutes(minutes))?
        .checked_add(&Duration::milliseconds((seconds * 1000.0).round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::{New_York, Sao_Paulo};

    fn row(json: &str) -> OrderRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn naive_timestamps_are_local_not_utc() {
        let dt = parse_timestamp("2025-06-02 14:03:11", &Sao_Paulo).unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 3);
        assert_eq!(dt.to_rfc3339(), "2025-06-02T14:03:11-03:00");
    }

    #[test]
    fn offset_timestamps_are_converted() {
        let dt = parse_timestamp("2025-06-02T17:03:11Z", &Sao_Paulo).unwrap();
        assert_eq!(dt.hour(), 14);

        let pg = parse_timestamp("2025-06-02 17:03:11.250+00", &Sao_Paulo).unwrap();
        assert_eq!(pg.hour(), 14);
    }

    #[test]
    fn fractional_seconds_and_short_forms_parse() {
        assert!(parse_timestamp("2025-06-02T14:03:11.123456", &Sao_Paulo).is_some());
        assert!(parse_timestamp("2025-06-02 14:03", &Sao_Paulo).is_some());
        let midnight = parse_timestamp("2025-06-02", &Sao_Paulo).unwrap();
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn garbage_and_dst_edges_degrade_to_none() {
        assert!(parse_timestamp("", &Sao_Paulo).is_none());
        assert!(parse_timestamp("not a date", &Sao_Paulo).is_none());
        assert!(parse_timestamp("2025-13-40 10:00:00", &Sao_Paulo).is_none());
        // Repeated hour when DST ends.
        assert!(parse_timestamp("2024-11-03 01:30:00", &New_York).is_none());
        // Skipped hour when DST starts.
        assert!(parse_timestamp("2024-03-10 02:30:00", &New_York).is_none());
    }

    #[test]
    fn durations_parse_view_intervals() {
        assert_eq!(parse_duration("00:12:30"), Some(Duration::seconds(750)));
        assert_eq!(parse_duration("0 days 00:12:30"), Some(Duration::seconds(750)));
        assert_eq!(parse_duration("1 day 02:00:00"), Some(Duration::hours(26)));
        assert_eq!(parse_duration("00:00:01.5"), Some(Duration::milliseconds(1500)));
        assert_eq!(parse_duration("12:99:00"), None);
        assert_eq!(parse_duration("soon"), None);
    }

    #[test]
    fn oversized_durations_degrade_to_none() {
        assert_eq!(parse_duration("9999999999999999:00:00"), None);
        assert_eq!(parse_duration("999999999999999 days 00:00:00"), None);
        assert_eq!(parse_duration("-1 days 00:10:00"), None);

        let record = row(r#"{"order_id": 1, "total_order_time": "999999999999999 days 00:00:00"}"#)
            .into_record(&Sao_Paulo);
        assert_eq!(record.order_id, Some(1));
        assert_eq!(record.total_order_time, None);
    }

    #[test]
    fn row_converts_loose_cells() {
        let record = row(
            r#"{
                "order_id": "1042",
                "invoice_number": 1234.0,
                "customer_label": "00123 - Jane Doe",
                "branch": 3,
                "channel": "COUNTER",
                "status_code": " PENDING ",
                "ordered_at": "2025-06-02 14:03:11",
                "invoiced_at": null,
                "checking_finished_at": "garbage",
                "total_order_time": 90,
                "unrelated_column": [1, 2, 3]
            }"#,
        )
        .into_record(&Sao_Paulo);

        assert_eq!(record.order_id, Some(1042));
        assert_eq!(record.invoice_number, Some(1234.0));
        assert_eq!(record.customer_label.as_deref(), Some("00123 - Jane Doe"));
        assert_eq!(record.branch.as_deref(), Some("3"));
        assert_eq!(record.status_code.as_deref(), Some(" PENDING "));
        assert!(record.ordered_at.is_some());
        assert!(record.invoiced_at.is_none());
        assert!(record.checking_finished_at.is_none());
        assert_eq!(record.total_order_time, Some(Duration::seconds(90)));
    }

    #[test]
    fn malformed_identity_drops_only_the_id() {
        let record = row(r#"{"order_id": "abc", "invoice_number": "n/a", "customer_label": true}"#)
            .into_record(&Sao_Paulo);
        assert_eq!(record.order_id, None);
        assert_eq!(record.invoice_number, None);
        assert_eq!(record.customer_label, None);

        let fractional = row(r#"{"order_id": 12.5}"#).into_record(&Sao_Paulo);
        assert_eq!(fractional.order_id, None);

        let huge = row(r#"{"order_id": 1e30, "invoice_number": 5}"#).into_record(&Sao_Paulo);
        assert_eq!(huge.order_id, None);
        assert_eq!(huge.invoice_number, Some(5.0));
    }
}
