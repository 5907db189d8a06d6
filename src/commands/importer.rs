// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::print_notices;
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(store, sub),
        _ => Ok(()),
    }
}

fn import_transactions(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let out = store
        .import_path(Path::new(path))
        .with_context(|| format!("Import from {} rejected", path))?;
    print_notices(&out.notices);
    println!(
        "Imported {} transactions from {} (ids renumbered from 1)",
        out.value.len(),
        path
    );
    Ok(())
}
