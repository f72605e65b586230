//! Plain-text rendering of a board for terminals.
//!
//! Panels are stacked top to bottom in layout order. Rows that have been
//! waiting too long carry a marker: `!` past the warning threshold, `!!` past
//! the critical one.

use std::fmt::Write;

use crate::domain::{Board, ClassifiedRecord, Urgency};
use crate::metrics::{format_hms, StageTiming};

const ORDER_WIDTH: usize = 8;
const INVOICE_WIDTH: usize = 8;
const CUSTOMER_WIDTH: usize = 32;
const TIME_WIDTH: usize = 5;

/// ANSI sequence that moves the cursor home and clears the screen.
pub const CLEAR_SCREEN: &str = "\x1B[H\x1B[0J";

/// Renders `board`, followed by `timings` when there are any.
pub fn render_board(board: &Board, timings: &[StageTiming]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Order Board ({:?})    Last update: {}",
        board.layout,
        board.generated_at.format("%d/%m/%Y %H:%M:%S")
    );

    for (bucket, records) in board.panels() {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ({} order(s)) ==", bucket.label().to_uppercase(), records.len());
        if records.is_empty() {
            let _ = writeln!(out, "No orders.");
            continue;
        }
        let _ = writeln!(
            out,
            "{:>ow$} | {:>iw$} | {:<cw$} | {:<tw$}",
            "ORDER",
            "INVOICE",
            "CUSTOMER",
            "TIME",
            ow = ORDER_WIDTH,
            iw = INVOICE_WIDTH,
            cw = CUSTOMER_WIDTH,
            tw = TIME_WIDTH,
        );
        let _ = writeln!(
            out,
            "{}-|-{}-|-{}-|-{}",
            "-".repeat(ORDER_WIDTH),
            "-".repeat(INVOICE_WIDTH),
            "-".repeat(CUSTOMER_WIDTH),
            "-".repeat(TIME_WIDTH)
        );
        for record in records {
            let _ = writeln!(out, "{}", row(record));
        }
    }

    if !timings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Stage timings (mean / max)");
        for timing in timings {
            let _ = writeln!(
                out,
                "  {:<14} {} / {}",
                timing.stage.label(),
                format_hms(timing.mean),
                format_hms(timing.max)
            );
        }
    }

    out
}

fn row(record: &ClassifiedRecord) -> String {
    let marker = match record.urgency {
        Some(Urgency::Critical) => " !!",
        Some(Urgency::Warning) => " !",
        _ => "",
    };
    format!(
        "{:>ow$} | {:>iw$} | {} | {:<tw$}{}",
        record.order_id,
        record.display_invoice_number,
        truncate(&record.display_customer_name, CUSTOMER_WIDTH),
        record.display_time,
        marker,
        ow = ORDER_WIDTH,
        iw = INVOICE_WIDTH,
        tw = TIME_WIDTH,
    )
    .trim_end()
    .to_string()
}

/// Pads or cuts `s` to exactly `max_len` characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify, ClassifierConfig};
    use crate::domain::{BoardLayout, OrderRecord};
    use crate::metrics::stage_timings;
    use chrono::{Duration, TimeZone};
    use chrono_tz::America::Sao_Paulo;

    #[test]
    fn renders_panels_and_markers() {
        let now = Sao_Paulo.with_ymd_and_hms(2025, 6, 2, 15, 0, 0).unwrap();
        let records = vec![
            OrderRecord::new(1042)
                .with_status("pending")
                .with_customer("00123 - Jane Doe")
                .with_invoice_number(1234.0)
                .with_ordered_at(now - Duration::minutes(6)),
        ];
        let board = classify(&records, now, &ClassifierConfig::default());
        let text = render_board(&board, &[]);

        assert!(text.contains("Last update: 02/06/2025 15:00:00"));
        assert!(text.contains("== AWAITING PICKING (1 order(s)) =="));
        assert!(text.contains("1042"));
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("14:54 !!"));
        assert_eq!(text.matches("No orders.").count(), 3);
        assert!(!text.contains("Stage timings"));
    }

    #[test]
    fn renders_timings_when_given() {
        let now = Sao_Paulo.with_ymd_and_hms(2025, 6, 2, 15, 0, 0).unwrap();
        let config = ClassifierConfig::builder().layout(BoardLayout::Operations).build().unwrap();
        let board = classify(&[], now, &config);
        let text = render_board(&board, &stage_timings(&[]));
        assert!(text.contains("Stage timings (mean / max)"));
        assert!(text.contains("Until Picking  00:00:00 / 00:00:00"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Ana", 5), "Ana  ");
        assert_eq!(truncate("João da Silva", 8), "João ...");
    }
}
