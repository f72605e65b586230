use chrono::{DateTime, Duration};
use chrono_tz::Tz;

/// A typed order record, one per row of the reporting view.
///
/// Every field is optional. Missing or malformed source values have already
/// been degraded to `None` by [`OrderRow::into_record`](crate::domain::OrderRow::into_record),
/// so the classifier never has to deal with parse failures.
///
/// All timestamps are expressed in the operating timezone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRecord {
    pub order_id: Option<u64>,
    pub invoice_number: Option<f64>,
    pub customer_label: Option<String>,
    pub branch: Option<String>,
    pub channel: Option<String>,
    pub status_code: Option<String>,
    pub ordered_at: Option<DateTime<Tz>>,
    pub invoiced_at: Option<DateTime<Tz>>,
    pub picking_started_at: Option<DateTime<Tz>>,
    pub picking_finished_at: Option<DateTime<Tz>>,
    pub checking_started_at: Option<DateTime<Tz>>,
    pub checking_finished_at: Option<DateTime<Tz>>,
    pub total_order_time: Option<Duration>,
}

impl OrderRecord {
    /// Creates a record carrying only its identifier.
    ///
    /// The `with_*` methods fill in the remaining columns.
    pub fn new(order_id: u64) -> Self {
        Self {
            order_id: Some(order_id),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status_code = Some(status.into());
        self
    }

    pub fn with_customer(mut self, label: impl Into<String>) -> Self {
        self.customer_label = Some(label.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_invoice_number(mut self, number: f64) -> Self {
        self.invoice_number = Some(number);
        self
    }

    pub fn with_ordered_at(mut self, at: DateTime<Tz>) -> Self {
        self.ordered_at = Some(at);
        self
    }

    pub fn with_invoiced_at(mut self, at: DateTime<Tz>) -> Self {
        self.invoiced_at = Some(at);
        self
    }

    pub fn with_picking(mut self, started: Option<DateTime<Tz>>, finished: Option<DateTime<Tz>>) -> Self {
        self.picking_started_at = started;
        self.picking_finished_at = finished;
        self
    }

    pub fn with_checking(mut self, started: Option<DateTime<Tz>>, finished: Option<DateTime<Tz>>) -> Self {
        self.checking_started_at = started;
        self.checking_finished_at = finished;
        self
    }

    /// The parsed status, if the code is one the board knows.
    pub fn status(&self) -> Option<StatusCode> {
        self.status_code.as_deref().and_then(StatusCode::parse)
    }
}

/// Fulfillment status reported by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// Order placed, picking not started.
    Pending,
    /// Items are being gathered.
    InPicking,
    /// Picking finished, waiting for the checking pass.
    Picked,
    /// Checking pass finished.
    Checked,
}

impl StatusCode {
    /// Parses a raw status code.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. The
    /// Portuguese codes emitted by the logistics view are accepted as aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Some(Self::Pending),
            "in picking" | "em separacao" | "em separação" => Some(Self::InPicking),
            "picked" | "separado" => Some(Self::Picked),
            "checked" | "conferido" => Some(Self::Checked),
            _ => None,
        }
    }
}
