// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fundclip::cli;
use fundclip::commands::transactions::read_batch;
use fundclip::models::{TransactionDraft, TransactionType};
use fundclip::utils::parse_decimal;
use serde_json::json;
use tempfile::tempdir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(
    transaction_type: TransactionType,
    date: NaiveDate,
    amount: Option<&str>,
    units: Option<&str>,
) -> TransactionDraft {
    TransactionDraft {
        fund_id: 120716,
        fund_name: "Index Fund".into(),
        date,
        transaction_type,
        amount: amount.map(|a| parse_decimal(a).unwrap()),
        units: units.map(|u| parse_decimal(u).unwrap()),
    }
}

#[test]
fn buy_payload_formats_wire_date_and_zeroes_units() {
    let d = draft(TransactionType::Buy, day(2024, 1, 15), Some("5000"), None);
    let payload = d.into_payload("u-1", day(2024, 6, 1)).unwrap();
    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(body["date"], json!("15-01-2024"));
    assert_eq!(body["transactionType"], json!("BUY"));
    assert_eq!(body["amount"], json!(5000.0));
    assert_eq!(body["units"], json!(0.0));
    assert_eq!(body["userId"], json!("u-1"));
    assert_eq!(body["fundId"], json!(120716));
    assert_eq!(body["fundName"], json!("Index Fund"));
}

#[test]
fn sell_payload_zeroes_amount() {
    let d = draft(TransactionType::Sell, day(2024, 2, 1), None, Some("10.5"));
    let payload = d.into_payload("u-1", day(2024, 6, 1)).unwrap();
    let body = serde_json::to_value(&payload).unwrap();

    assert_eq!(body["transactionType"], json!("SELL"));
    assert_eq!(body["amount"], json!(0.0));
    assert_eq!(body["units"], json!(10.5));
}

#[test]
fn buy_without_amount_is_rejected() {
    let d = draft(TransactionType::Buy, day(2024, 1, 15), None, Some("3.0"));
    let err = d.into_payload("u-1", day(2024, 6, 1)).unwrap_err();
    assert!(
        err.to_string()
            .contains("Amount is required and must be greater than 0")
    );
}

#[test]
fn sell_without_units_is_rejected() {
    let d = draft(TransactionType::Sell, day(2024, 1, 15), Some("5000"), None);
    let err = d.into_payload("u-1", day(2024, 6, 1)).unwrap_err();
    assert!(
        err.to_string()
            .contains("Units are required and must be greater than 0")
    );
}

#[test]
fn future_dates_are_rejected() {
    let d = draft(TransactionType::Buy, day(2024, 7, 1), Some("5000"), None);
    let err = d.into_payload("u-1", day(2024, 6, 1)).unwrap_err();
    assert!(err.to_string().contains("Date cannot be in the future"));
}

#[test]
fn csv_batch_builds_one_payload_per_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.csv");
    std::fs::write(
        &path,
        "date,type,fund_id,fund_name,amount,units\n\
         2024-01-15,BUY,120716,Index Fund,5000,\n\
         2024-02-15,SELL,120716,Index Fund,,10.5\n",
    )
    .unwrap();

    let batch = read_batch(path.to_str().unwrap(), "u-1", day(2024, 6, 1)).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].date, "15-01-2024");
    assert_eq!(batch[0].amount, 5000.0);
    assert_eq!(batch[0].units, 0.0);
    assert_eq!(batch[1].transaction_type, TransactionType::Sell);
    assert_eq!(batch[1].units, 10.5);
    assert_eq!(batch[1].amount, 0.0);
}

#[test]
fn one_bad_row_aborts_the_whole_batch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.csv");
    // Row 3 is a SELL without units; nothing may be submitted.
    std::fs::write(
        &path,
        "date,type,fund_id,fund_name,amount,units\n\
         2024-01-15,BUY,120716,Index Fund,5000,\n\
         2024-02-15,SELL,120716,Index Fund,,\n",
    )
    .unwrap();

    let err = read_batch(path.to_str().unwrap(), "u-1", day(2024, 6, 1)).unwrap_err();
    assert!(format!("{:#}", err).contains("Row 3"));
}

#[test]
fn tx_add_cli_wiring_parses_flags() {
    let matches = cli::build_cli()
        .try_get_matches_from([
            "fundclip", "tx", "add", "--fund", "120716", "--name", "Index Fund", "--date",
            "2024-01-15", "--type", "BUY", "--amount", "5000",
        ])
        .unwrap();
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("add", add_m)) = tx_m.subcommand() else {
        panic!("no add subcommand");
    };
    assert_eq!(*add_m.get_one::<i64>("fund").unwrap(), 120716);
    assert_eq!(add_m.get_one::<String>("type").unwrap(), "BUY");

    // --fund is mandatory
    assert!(
        cli::build_cli()
            .try_get_matches_from(["fundclip", "tx", "add", "--name", "X"])
            .is_err()
    );
}
