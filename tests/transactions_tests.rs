// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetbook::models::{Period, TransactionType};
use budgetbook::{cli, commands::transactions};
use chrono::NaiveDate;
use common::store_in;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn setup(dir: &std::path::Path) -> budgetbook::LedgerStore {
    let store = store_in(dir);
    for i in 1..=3 {
        store
            .append(
                TransactionType::Expense,
                Decimal::from(10),
                "P",
                Some("Cat1"),
                NaiveDate::from_ymd_opt(2025, 1, i),
            )
            .unwrap();
    }
    store
        .append(
            TransactionType::Income,
            Decimal::from(50),
            "Pay",
            None,
            NaiveDate::from_ymd_opt(2024, 12, 31),
        )
        .unwrap();
    store
}

#[test]
fn list_limit_respected() {
    let dir = tempdir().unwrap();
    let store = setup(dir.path());
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["budgetbook", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&store, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date.to_string(), "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_filters_by_type_and_category() {
    let dir = tempdir().unwrap();
    let store = setup(dir.path());
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["budgetbook", "tx", "list", "--type", "income"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&store, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Income");

    let matches = cli::build_cli().get_matches_from(["budgetbook", "tx", "list", "--category", "cat1"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    assert_eq!(transactions::query_rows(&store, list_m).unwrap().len(), 3);
}

#[test]
fn cli_add_then_rm() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let matches = cli::build_cli().get_matches_from([
        "budgetbook",
        "tx",
        "add",
        "--type",
        "expense",
        "--amount",
        "50",
        "--description",
        "Taxi ride",
        "--date",
        "2025-03-01",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&store, tx_m).unwrap();
    }
    let rows = store.load(Period::All).value;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Other");

    let matches = cli::build_cli().get_matches_from(["budgetbook", "tx", "rm", "--id", "1"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&store, tx_m).unwrap();
    }
    assert!(store.load(Period::All).value.is_empty());

    let matches = cli::build_cli().get_matches_from(["budgetbook", "tx", "rm", "--id", "1"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        assert!(transactions::handle(&store, tx_m).is_err());
    }
}
