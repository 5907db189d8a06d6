// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetbook::models::UserProfile;
use budgetbook::{NoticeKind, cli, commands::profile};
use common::store_in;
use rust_decimal::Decimal;
use tempfile::tempdir;

#[test]
fn new_store_has_default_profile() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    let out = store.load_profile();
    assert!(out.is_clean());
    let p = out.value;
    assert_eq!(p.monthly_income(), Decimal::ZERO);
    assert_eq!(p.savings_goal(), Decimal::ZERO);
    assert_eq!(p.expense_limit(), Decimal::ZERO);
    assert!(!p.setup_completed());
    assert!(p.get(UserProfile::CREATED_DATE).is_some());
    assert!(store.is_first_time_user());
}

#[test]
fn missing_profile_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    std::fs::remove_file(store.config().profile_path()).unwrap();
    let out = store.load_profile();
    assert!(out.is_clean());
    assert_eq!(out.value.get(UserProfile::SETUP_COMPLETED), Some("false"));
}

#[test]
fn save_replaces_instead_of_merging() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());

    let mut p = UserProfile::default();
    p.set(UserProfile::MONTHLY_INCOME, "65000");
    p.set(UserProfile::FINANCIAL_GOALS, "Save for a house, pay off card");
    p.set(UserProfile::SETUP_COMPLETED, "true");
    store.save_profile(&p).unwrap();

    let loaded = store.load_profile().value;
    assert_eq!(loaded, p);
    assert_eq!(loaded.len(), 3);
    assert!(loaded.get(UserProfile::SAVINGS_GOAL).is_none());
    assert_eq!(loaded.monthly_income(), Decimal::from(65000));
    assert!(!store.is_first_time_user());
}

#[test]
fn corrupt_profile_falls_back_with_notice() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());
    std::fs::remove_file(store.config().profile_path()).unwrap();
    std::fs::create_dir_all(store.config().profile_path()).unwrap();
    let out = store.load_profile();
    assert!(out.has(NoticeKind::StorageFallback));
    assert_eq!(out.value.monthly_income(), Decimal::ZERO);
}

#[test]
fn cli_set_updates_one_key() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path());

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "budgetbook",
        "profile",
        "set",
        "--key",
        "budget_style",
        "--value",
        "50/30/20",
    ]);
    if let Some(("profile", profile_m)) = matches.subcommand() {
        profile::handle(&store, profile_m).unwrap();
    } else {
        panic!("no profile subcommand");
    }

    let p = store.load_profile().value;
    assert_eq!(p.get(UserProfile::BUDGET_STYLE), Some("50/30/20"));
    assert_eq!(p.get(UserProfile::MONTHLY_INCOME), Some("0"));
}
