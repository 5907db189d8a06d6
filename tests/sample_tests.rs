// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetbook::models::{Period, TransactionType};
use budgetbook::sample::seed_sample_data;
use chrono::NaiveDate;
use common::store_in;
use tempfile::tempdir;

#[test]
fn sample_data_is_deterministic_and_well_formed() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

    let a = tempdir().unwrap();
    let store_a = store_in(a.path());
    let added = seed_sample_data(&store_a, today).unwrap();
    assert!(added.is_clean());

    let b = tempdir().unwrap();
    let store_b = store_in(b.path());
    seed_sample_data(&store_b, today).unwrap();

    let rows = store_a.load(Period::All).value;
    assert_eq!(rows.len(), added.value);
    assert_eq!(rows, store_b.load(Period::All).value);

    let ids: Vec<i64> = rows.iter().map(|t| t.id).collect();
    assert_eq!(ids, (1..=rows.len() as i64).collect::<Vec<_>>());
    assert_eq!(rows.iter().filter(|t| t.r#type == TransactionType::Income).count(), 6);
    assert!(rows.iter().any(|t| t.r#type == TransactionType::Savings));
    assert!(rows.iter().all(|t| t.date <= today && !t.category.is_empty()));

    assert!(!store_a.is_first_time_user());
    assert!(store_a.repair().is_clean());
}
