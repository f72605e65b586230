//! Stage timings for the operations board.
//!
//! For each fulfillment stage, the mean and the maximum time spent across a
//! snapshot. Records missing either end of a stage simply don't contribute to it.
//!
//! The board actor passes every fetched record, before branch, channel and
//! same-day filtering, so the figures describe the whole view.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::OrderRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Order placed until picking started.
    QueueToPicking,
    Picking,
    /// Picking finished until checking started.
    WaitForChecking,
    Checking,
    /// Order placed until invoiced.
    ToInvoice,
    /// The view's own end-to-end figure.
    TotalOrder,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::QueueToPicking,
        Stage::Picking,
        Stage::WaitForChecking,
        Stage::Checking,
        Stage::ToInvoice,
        Stage::TotalOrder,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stage::QueueToPicking => "Until Picking",
            Stage::Picking => "Picking",
            Stage::WaitForChecking => "Waiting Check",
            Stage::Checking => "Checking",
            Stage::ToInvoice => "To Invoice",
            Stage::TotalOrder => "Total Order",
        }
    }

    /// Time `record` spent in this stage, if both ends are known.
    pub fn duration(self, record: &OrderRecord) -> Option<Duration> {
        match self {
            Stage::QueueToPicking => between(&record.ordered_at, &record.picking_started_at),
            Stage::Picking => between(&record.picking_started_at, &record.picking_finished_at),
            Stage::WaitForChecking => between(&record.picking_finished_at, &record.checking_started_at),
            Stage::Checking => between(&record.checking_started_at, &record.checking_finished_at),
            Stage::ToInvoice => between(&record.ordered_at, &record.invoiced_at),
            Stage::TotalOrder => record.total_order_time,
        }
    }
}

fn between(start: &Option<DateTime<Tz>>, end: &Option<DateTime<Tz>>) -> Option<Duration> {
    Some(end.as_ref()?.signed_duration_since(*start.as_ref()?))
}

/// Mean and maximum duration of one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub samples: usize,
    #[serde(serialize_with = "hms")]
    pub mean: Option<Duration>,
    #[serde(serialize_with = "hms")]
    pub max: Option<Duration>,
}

fn hms<S: serde::Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_hms(*value))
}

/// Computes timings for every stage in [`Stage::ALL`] order.
pub fn stage_timings(records: &[OrderRecord]) -> Vec<StageTiming> {
    Stage::ALL
        .iter()
        .map(|&stage| {
            let samples: Vec<Duration> = records.iter().filter_map(|r| stage.duration(r)).collect();
            let max = samples.iter().copied().max();
            let mean = if samples.is_empty() {
                None
            } else {
                let total_ms: i128 = samples.iter().map(|d| d.num_milliseconds() as i128).sum();
                Duration::try_milliseconds((total_ms / samples.len() as i128) as i64)
            };
            StageTiming {
                stage,
                samples: samples.len(),
                mean,
                max,
            }
        })
        .collect()
}

/// Formats a duration as `HH:MM:SS`; unknown renders as `00:00:00`.
///
/// Hours are not wrapped at 24 and sub-second parts are dropped.
pub fn format_hms(value: Option<Duration>) -> String {
    let Some(value) = value else {
        return "00:00:00".to_string();
    };
    let total = value.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    format!("{sign}{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Sao_Paulo;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Tz> {
        Sao_Paulo.with_ymd_and_hms(2025, 6, 2, h, m, s).unwrap()
    }

    fn timing(timings: &[StageTiming], stage: Stage) -> &StageTiming {
        timings.iter().find(|t| t.stage == stage).unwrap()
    }

    #[test]
    fn mean_and_max_skip_incomplete_records() {
        let records = vec![
            OrderRecord::new(1)
                .with_ordered_at(at(9, 0, 0))
                .with_picking(Some(at(9, 2, 0)), Some(at(9, 10, 0))),
            OrderRecord::new(2)
                .with_ordered_at(at(9, 0, 0))
                .with_picking(Some(at(9, 6, 0)), None),
            OrderRecord::new(3).with_picking(None, Some(at(9, 30, 0))),
        ];
        let timings = stage_timings(&records);
        assert_eq!(timings.len(), Stage::ALL.len());

        let queue = timing(&timings, Stage::QueueToPicking);
        assert_eq!(queue.samples, 2);
        assert_eq!(queue.mean, Some(Duration::minutes(4)));
        assert_eq!(queue.max, Some(Duration::minutes(6)));

        let picking = timing(&timings, Stage::Picking);
        assert_eq!(picking.samples, 1);
        assert_eq!(picking.mean, Some(Duration::minutes(8)));

        let checking = timing(&timings, Stage::Checking);
        assert_eq!(checking.samples, 0);
        assert_eq!(checking.mean, None);
        assert_eq!(checking.max, None);
    }

    #[test]
    fn total_order_uses_view_column() {
        let mut record = OrderRecord::new(1);
        record.total_order_time = Some(Duration::seconds(95));
        let timings = stage_timings(&[record]);
        assert_eq!(timing(&timings, Stage::TotalOrder).max, Some(Duration::seconds(95)));
    }

    #[test]
    fn hms_formatting() {
        assert_eq!(format_hms(None), "00:00:00");
        assert_eq!(format_hms(Some(Duration::seconds(3_725))), "01:02:05");
        assert_eq!(format_hms(Some(Duration::hours(27))), "27:00:00");
        assert_eq!(format_hms(Some(Duration::seconds(-90))), "-00:01:30");
    }
}
