use std::collections::BTreeMap;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::domain::{BoardLayout, Bucket};

/// How long a record has been sitting in its current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Normal,
    Warning,
    Critical,
}

/// A record placed in a bucket, with every value the renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    pub order_id: u64,
    pub bucket: Bucket,
    pub branch: Option<String>,
    /// `None` when the source had no usable invoice number.
    pub invoice_number: Option<i64>,
    pub display_invoice_number: String,
    pub display_time: String,
    pub display_customer_name: String,
    /// `None` when the status entry time is unknown or the bucket is not timed.
    pub minutes_in_status: Option<f64>,
    pub urgency: Option<Urgency>,
}

/// The result of one classification pass.
///
/// Every bucket of the layout is present, even when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub layout: BoardLayout,
    #[serde(serialize_with = "rfc3339")]
    pub generated_at: DateTime<Tz>,
    panels: BTreeMap<Bucket, Vec<ClassifiedRecord>>,
}

fn rfc3339<S: Serializer>(at: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339())
}

impl Board {
    /// Creates a board with an empty panel for each bucket of `layout`.
    pub fn empty(layout: BoardLayout, generated_at: DateTime<Tz>) -> Self {
        let panels = layout.buckets().iter().map(|b| (*b, Vec::new())).collect();
        Self { layout, generated_at, panels }
    }

    /// Appends a record to its bucket's panel.
    ///
    /// Records for buckets outside the layout are ignored.
    pub(crate) fn push(&mut self, record: ClassifiedRecord) {
        if let Some(panel) = self.panels.get_mut(&record.bucket) {
            panel.push(record);
        }
    }

    pub(crate) fn panels_mut(&mut self) -> impl Iterator<Item = &mut Vec<ClassifiedRecord>> + '_ {
        self.panels.values_mut()
    }

    /// Records in `bucket`; empty for buckets outside the layout.
    pub fn records(&self, bucket: Bucket) -> &[ClassifiedRecord] {
        self.panels.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.records(bucket).len()
    }

    /// Whether `bucket` is one of this board's panels.
    pub fn contains_bucket(&self, bucket: Bucket) -> bool {
        self.panels.contains_key(&bucket)
    }

    /// Panels in layout order.
    pub fn panels(&self) -> impl Iterator<Item = (Bucket, &[ClassifiedRecord])> + '_ {
        self.layout.buckets().iter().map(move |b| (*b, self.records(*b)))
    }

    /// Total number of records on the board.
    pub fn total(&self) -> usize {
        self.panels.values().map(Vec::len).sum()
    }
}
