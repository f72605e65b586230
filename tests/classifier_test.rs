use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;
use order_board::classifier::{classify, ClassifierConfig};
use order_board::domain::{BoardLayout, Bucket, OrderRecord, OrderRow, SortOrder};

fn now() -> DateTime<Tz> {
    Sao_Paulo.with_ymd_and_hms(2025, 6, 2, 15, 0, 0).unwrap()
}

fn minutes_ago(m: i64) -> DateTime<Tz> {
    now() - Duration::minutes(m)
}

fn config(checkout: i64, pickup: i64) -> ClassifierConfig {
    ClassifierConfig::builder()
        .max_checkout_age_minutes(checkout)
        .max_pickup_age_minutes(pickup)
        .build()
        .unwrap()
}

/// A mixed snapshot covering every rule, plus records that match none.
fn snapshot() -> Vec<OrderRecord> {
    vec![
        OrderRecord::new(101).with_status("PENDING ").with_ordered_at(minutes_ago(1)),
        OrderRecord::new(102).with_status("in picking").with_picking(Some(minutes_ago(3)), None),
        OrderRecord::new(103).with_status("Picked").with_picking(None, Some(minutes_ago(2))),
        OrderRecord::new(104).with_checking(None, Some(minutes_ago(4))),
        OrderRecord::new(105)
            .with_checking(None, Some(minutes_ago(6)))
            .with_invoiced_at(minutes_ago(5)),
        OrderRecord::new(106).with_checking(None, Some(minutes_ago(45))),
        OrderRecord::new(107).with_status("cancelled"),
        OrderRecord {
            order_id: None,
            status_code: Some("pending".into()),
            ..OrderRecord::default()
        },
    ]
}

#[test]
fn every_record_lands_in_at_most_one_bucket() {
    for layout in [BoardLayout::Customer, BoardLayout::Operations] {
        let config = ClassifierConfig::builder().layout(layout).build().unwrap();
        let board = classify(&snapshot(), now(), &config);

        let mut seen: Vec<u64> = board.panels().flat_map(|(_, rows)| rows.iter().map(|r| r.order_id)).collect();
        let placed = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), placed, "a record appeared twice on the {layout:?} board");
    }
}

#[test]
fn customer_board_places_the_snapshot() {
    let board = classify(&snapshot(), now(), &config(10, 10));
    let ids = |bucket| board.records(bucket).iter().map(|r| r.order_id).collect::<Vec<_>>();

    assert_eq!(ids(Bucket::AwaitingPicking), vec![102, 101]);
    assert_eq!(ids(Bucket::AwaitingChecking), vec![103]);
    assert_eq!(ids(Bucket::ReadyForCheckout), vec![104]);
    assert_eq!(ids(Bucket::ReadyForPickup), vec![105]);
    assert_eq!(board.total(), 5);
}

#[test]
fn pending_in_any_case_awaits_picking() {
    for status in ["PENDING", "pending", "  Pending\n", "pEnDiNg "] {
        let board = classify(&[OrderRecord::new(1).with_status(status)], now(), &config(10, 10));
        assert_eq!(board.count(Bucket::AwaitingPicking), 1, "status {status:?}");
    }
}

#[test]
fn checkout_record_ages_out_of_every_bucket() {
    let record = OrderRecord::new(1).with_checking(None, Some(minutes_ago(15)));
    let board = classify(&[record], now(), &config(10, 10));
    assert_eq!(board.total(), 0);
}

#[test]
fn recent_invoiced_record_is_ready_for_pickup() {
    let record = OrderRecord::new(1)
        .with_checking(None, Some(minutes_ago(5)))
        .with_invoiced_at(minutes_ago(1));
    let board = classify(&[record], now(), &config(10, 10));
    assert_eq!(board.count(Bucket::ReadyForPickup), 1);
    assert_eq!(board.total(), 1);
}

#[test]
fn derived_display_fields() {
    let records = vec![
        OrderRecord::new(1)
            .with_status("pending")
            .with_invoice_number(1234.0)
            .with_customer("00123 - Jane Doe")
            .with_ordered_at(Sao_Paulo.with_ymd_and_hms(2025, 6, 2, 9, 5, 0).unwrap()),
        OrderRecord::new(2).with_status("pending").with_customer("Jane Doe"),
    ];
    let board = classify(&records, now(), &config(10, 10));
    let panel = board.records(Bucket::AwaitingPicking);

    let first = panel.iter().find(|r| r.order_id == 1).unwrap();
    assert_eq!(first.display_invoice_number, "1234");
    assert_eq!(first.invoice_number, Some(1234));
    assert_eq!(first.display_customer_name, "Jane Doe");
    assert_eq!(first.display_time, "09:05");

    let second = panel.iter().find(|r| r.order_id == 2).unwrap();
    assert_eq!(second.display_invoice_number, "");
    assert_eq!(second.invoice_number, None);
    assert_eq!(second.display_customer_name, "Jane Doe");
    assert_eq!(second.display_time, "");
    assert_eq!(second.minutes_in_status, None);
}

#[test]
fn classification_is_idempotent() {
    let config = config(10, 10);
    let first = classify(&snapshot(), now(), &config);
    let second = classify(&snapshot(), now(), &config);
    assert_eq!(first, second);
    assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
}

#[test]
fn empty_input_yields_every_empty_panel() {
    for layout in [BoardLayout::Customer, BoardLayout::Operations] {
        let config = ClassifierConfig::builder().layout(layout).build().unwrap();
        let board = classify(&[], now(), &config);
        for bucket in layout.buckets() {
            assert!(board.contains_bucket(*bucket));
            assert_eq!(board.count(*bucket), 0);
        }
    }
}

#[test]
fn order_id_descending_law() {
    let records: Vec<OrderRecord> = [5u64, 17, 3, 17, 42, 1, 8]
        .into_iter()
        .map(|id| OrderRecord::new(id).with_status("pending"))
        .collect();
    let config = ClassifierConfig::builder().sort(SortOrder::OrderIdDesc).build().unwrap();
    let board = classify(&records, now(), &config);

    let panel = board.records(Bucket::AwaitingPicking);
    assert_eq!(panel.len(), records.len());
    assert!(panel.windows(2).all(|pair| pair[0].order_id >= pair[1].order_id));
}

#[test]
fn rows_from_the_view_classify_end_to_end() {
    let rows: Vec<OrderRow> = serde_json::from_str(
        r#"[
            {"order_id": 7, "status_code": "EM SEPARACAO", "customer_label": "55 - Bob", "invoice_number": "n/a"},
            {"order_id": 8, "checking_finished_at": "2025-06-02 14:58:00", "invoiced_at": "2025-06-02 14:59:00"},
            {"order_id": 9, "checking_finished_at": "yesterday-ish"},
            {"status_code": "pending"}
        ]"#,
    )
    .unwrap();
    let records: Vec<OrderRecord> = rows.into_iter().map(|r| r.into_record(&Sao_Paulo)).collect();
    let board = classify(&records, now(), &config(10, 10));

    let picking = &board.records(Bucket::AwaitingPicking)[0];
    assert_eq!(picking.order_id, 7);
    assert_eq!(picking.display_customer_name, "Bob");
    assert_eq!(picking.display_invoice_number, "");
    assert_eq!(board.records(Bucket::ReadyForPickup)[0].order_id, 8);
    assert_eq!(board.total(), 2);
}
