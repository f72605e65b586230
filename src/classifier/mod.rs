//! # Order Status Classifier
//!
//! Turns a snapshot of [`OrderRecord`]s into a [`Board`]: every record lands in
//! at most one [`Bucket`], gets its display fields derived, and each panel is
//! sorted for display.
//!
//! ## Purity
//!
//! [`classify`] reads no clock and no ambient timezone. The reference instant
//! and the operating timezone are parameters, so the same inputs always give
//! the same board.
//!
//! ## Bucket rules
//!
//! Rules are evaluated in priority order and the first match wins.
//!
//! | Layout       | Bucket            | Rule                                                       |
//! |--------------|-------------------|------------------------------------------------------------|
//! | Customer     | AwaitingPicking   | status is pending or in picking                            |
//! | Customer     | AwaitingChecking  | status is picked                                           |
//! | Customer     | ReadyForCheckout  | checking finished, not invoiced, within checkout window    |
//! | Customer     | ReadyForPickup    | checking finished, invoiced, within pickup window          |
//! | Operations   | AwaitingPicking   | status is pending                                          |
//! | Operations   | InPicking         | status is in picking                                       |
//! | Operations   | AwaitingChecking  | status is picked                                           |
//! | Operations   | Checked           | status is checked                                          |
//!
//! A terminal record whose checking finished longer ago than its window is
//! dropped from the board rather than moved elsewhere.

pub mod config;
pub mod error;
pub mod fields;

pub use config::*;
pub use error::*;

use std::cmp::Reverse;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::domain::{Board, BoardLayout, Bucket, ClassifiedRecord, OrderRecord, SortOrder, StatusCode};

/// Classifies `records` against `reference_time`.
///
/// Always returns a board with every panel of the configured layout, empty
/// panels included. Records without an order id are skipped.
pub fn classify(records: &[OrderRecord], reference_time: DateTime<Tz>, config: &ClassifierConfig) -> Board {
    let tz = config.timezone();
    let reference = reference_time.with_timezone(&tz);
    debug!(records = records.len(), layout = ?config.layout(), %reference, "Classifying snapshot");

    let mut board = Board::empty(config.layout(), reference);
    let mut skipped = 0usize;

    for record in records {
        let Some(order_id) = record.order_id else {
            skipped += 1;
            trace!("Skipping record without order id");
            continue;
        };
        let Some(bucket) = assign_bucket(record, &reference, config) else {
            trace!(order_id, status = ?record.status_code, "Record matches no bucket");
            continue;
        };
        board.push(derive(order_id, bucket, record, &reference, config));
    }

    for panel in board.panels_mut() {
        sort_panel(panel, config.sort());
    }

    debug!(placed = board.total(), skipped, "Classification done");
    board
}

/// Picks the bucket for one record, or `None` when it belongs on no panel.
pub fn assign_bucket(record: &OrderRecord, reference: &DateTime<Tz>, config: &ClassifierConfig) -> Option<Bucket> {
    let status = record.status();
    match config.layout() {
        BoardLayout::Customer => match status {
            Some(StatusCode::Pending | StatusCode::InPicking) => Some(Bucket::AwaitingPicking),
            Some(StatusCode::Picked) => Some(Bucket::AwaitingChecking),
            _ => {
                let finished = record.checking_finished_at.as_ref()?;
                let age = reference.signed_duration_since(*finished);
                if record.invoiced_at.is_none() {
                    within(age, config.max_checkout_age()).then_some(Bucket::ReadyForCheckout)
                } else {
                    within(age, config.max_pickup_age()).then_some(Bucket::ReadyForPickup)
                }
            }
        },
        BoardLayout::Operations => match status? {
            StatusCode::Pending => Some(Bucket::AwaitingPicking),
            StatusCode::InPicking => Some(Bucket::InPicking),
            StatusCode::Picked => Some(Bucket::AwaitingChecking),
            StatusCode::Checked => Some(Bucket::Checked),
        },
    }
}

fn within(age: Duration, window: Duration) -> bool {
    age <= window
}

/// When the record entered the status that put it in `bucket`.
///
/// Only non-terminal waiting panels are timed.
fn status_entry<'a>(record: &'a OrderRecord, bucket: Bucket) -> Option<&'a DateTime<Tz>> {
    match (bucket, record.status()?) {
        (Bucket::AwaitingPicking | Bucket::InPicking, StatusCode::Pending) => record.ordered_at.as_ref(),
        (Bucket::AwaitingPicking | Bucket::InPicking, StatusCode::InPicking) => record.picking_started_at.as_ref(),
        (Bucket::AwaitingChecking, StatusCode::Picked) => record.picking_finished_at.as_ref(),
        _ => None,
    }
}

fn derive(
    order_id: u64,
    bucket: Bucket,
    record: &OrderRecord,
    reference: &DateTime<Tz>,
    config: &ClassifierConfig,
) -> ClassifiedRecord {
    let tz = config.timezone();
    let invoice_number = fields::invoice_number(record.invoice_number);
    let minutes_in_status = fields::minutes_since(status_entry(record, bucket), reference);

    ClassifiedRecord {
        order_id,
        bucket,
        branch: record.branch.clone(),
        invoice_number,
        display_invoice_number: fields::display_invoice_number(invoice_number),
        display_time: fields::order_time(record.ordered_at.as_ref(), &tz).unwrap_or_default(),
        display_customer_name: fields::customer_name(record.customer_label.as_deref()).unwrap_or_default(),
        minutes_in_status,
        urgency: fields::urgency(
            minutes_in_status,
            config.warning_after_minutes(),
            config.critical_after_minutes(),
        ),
    }
}

fn sort_panel(panel: &mut [ClassifiedRecord], sort: SortOrder) {
    match sort {
        SortOrder::OrderIdDesc => panel.sort_by_key(|r| Reverse(r.order_id)),
        SortOrder::CustomerNameAsc => panel.sort_by(|a, b| {
            a.display_customer_name
                .cmp(&b.display_customer_name)
                .then_with(|| b.order_id.cmp(&a.order_id))
        }),
    }
}
