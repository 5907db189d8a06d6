// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: &LedgerStore) -> Result<()> {
    let out = store.repair();
    let report = &out.value;

    let mut rows = Vec::new();
    if report.renumbered {
        rows.push(vec!["ids_renumbered".into(), format!("{} rows", report.rows)]);
    }
    if report.coerced_rows > 0 {
        rows.push(vec!["fields_coerced".into(), format!("{} rows", report.coerced_rows)]);
    }
    for n in &out.notices {
        rows.push(vec!["notice".into(), n.to_string()]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found ({} transactions)", report.rows);
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
        if report.rewritten {
            println!("Ledger rewritten.");
        }
    }
    Ok(())
}
