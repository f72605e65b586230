//! Snapshot pre-filtering: branch selection, counter channel, and same-day orders.
//!
//! The classifier looks at whatever it is given. Deciding *which* records a
//! board is about happens here, before classification.

use std::collections::BTreeSet;

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::domain::OrderRecord;

pub const DEFAULT_COUNTER_CHANNEL: &str = "COUNTER";

/// Which branches a board shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BranchSelection {
    #[default]
    All,
    /// Only these branches. An empty set shows nothing.
    Only(BTreeSet<String>),
}

impl BranchSelection {
    pub fn only<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(branches.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, branch: Option<&str>) -> bool {
        match self {
            BranchSelection::All => true,
            BranchSelection::Only(set) => branch.is_some_and(|b| set.contains(b)),
        }
    }
}

/// Criteria a record must meet to be shown on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFilter {
    pub branches: BranchSelection,
    /// Channel to keep, compared trimmed and case-insensitively. `None` keeps all.
    pub channel: Option<String>,
    /// Keep only orders placed on the reference date.
    pub today_only: bool,
}

impl Default for SnapshotFilter {
    fn default() -> Self {
        Self {
            branches: BranchSelection::All,
            channel: Some(DEFAULT_COUNTER_CHANNEL.to_string()),
            today_only: true,
        }
    }
}

impl SnapshotFilter {
    /// A filter that keeps everything.
    pub fn pass_all() -> Self {
        Self {
            branches: BranchSelection::All,
            channel: None,
            today_only: false,
        }
    }

    /// Whether `record` belongs on a board generated at `reference`.
    ///
    /// The same-day check compares calendar dates in `reference`'s timezone.
    pub fn matches(&self, record: &OrderRecord, reference: &DateTime<Tz>) -> bool {
        if !self.branches.matches(record.branch.as_deref()) {
            return false;
        }
        if let Some(wanted) = &self.channel {
            let channel_ok = record
                .channel
                .as_deref()
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(wanted.trim()));
            if !channel_ok {
                return false;
            }
        }
        if self.today_only {
            let today = reference.date_naive();
            let ordered_today = record
                .ordered_at
                .as_ref()
                .is_some_and(|at| at.with_timezone(&reference.timezone()).date_naive() == today);
            if !ordered_today {
                return false;
            }
        }
        true
    }

    /// Returns the records that pass the filter.
    pub fn apply(&self, records: Vec<OrderRecord>, reference: &DateTime<Tz>) -> Vec<OrderRecord> {
        let before = records.len();
        let kept: Vec<OrderRecord> = records.into_iter().filter(|r| self.matches(r, reference)).collect();
        debug!(before, after = kept.len(), "Filtered snapshot");
        kept
    }
}

/// Sorted, de-duplicated list of branches present in `records`.
pub fn available_branches(records: &[OrderRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.branch.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
