// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetbook::models::{Period, TransactionType};
use budgetbook::store::ExportFormat;
use budgetbook::{cli, commands::exporter};
use chrono::NaiveDate;
use common::store_in;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn seeded(dir: &std::path::Path) -> budgetbook::LedgerStore {
    let store = store_in(dir);
    store
        .append(
            TransactionType::Income,
            Decimal::from(1000),
            "Pay",
            None,
            NaiveDate::from_ymd_opt(2025, 1, 2),
        )
        .unwrap();
    store
        .append(
            TransactionType::Expense,
            Decimal::new(1234, 2),
            "Corner Shop",
            Some("Food"),
            NaiveDate::from_ymd_opt(2025, 1, 3),
        )
        .unwrap();
    store
}

#[test]
fn export_transactions_streams_pretty_json() {
    let dir = tempdir().unwrap();
    let store = seeded(dir.path());
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "budgetbook",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&store, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": 1,
                "type": "income",
                "amount": "1000",
                "description": "Pay",
                "category": "Income",
                "date": "2025-01-02"
            },
            {
                "id": 2,
                "type": "expense",
                "amount": "12.34",
                "description": "Corner Shop",
                "category": "Food",
                "date": "2025-01-03"
            }
        ])
    );
}

#[test]
fn export_csv_has_ledger_columns() {
    let dir = tempdir().unwrap();
    let store = seeded(dir.path());
    let mut buf = Vec::new();
    let out = store.export(Period::All, ExportFormat::Csv, &mut buf).unwrap();
    assert_eq!(out.value, 2);
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,type,amount,description,category,date");
    assert_eq!(lines[2], "2,expense,12.34,Corner Shop,Food,2025-01-03");
}

#[test]
fn exported_csv_imports_back() {
    let dir = tempdir().unwrap();
    let store = seeded(dir.path());
    let mut buf = Vec::new();
    store.export(Period::All, ExportFormat::Csv, &mut buf).unwrap();

    let other = tempdir().unwrap();
    let target = store_in(other.path());
    target.import_csv(buf.as_slice()).unwrap();
    assert_eq!(target.load(Period::All).value, store.load(Period::All).value);
}

#[test]
fn export_respects_period_filter() {
    let dir = tempdir().unwrap();
    let store = seeded(dir.path());
    let mut buf = Vec::new();
    // seeded rows are dated 2025-01, far from the current month
    let out = store
        .export(Period::CurrentMonth, ExportFormat::Json, &mut buf)
        .unwrap();
    assert_eq!(out.value, 0);
    let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(parsed, json!([]));
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "budgetbook",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&store, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
