// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::period_arg;
use crate::store::{ExportFormat, LedgerStore};
use crate::utils::print_notices;
use anyhow::{Result, anyhow};
use std::fs::File;
use std::io::BufWriter;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    // Validate the format before touching the output path.
    let fmt: ExportFormat = sub
        .get_one::<String>("format")
        .unwrap()
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let out = sub.get_one::<String>("out").unwrap();
    let period = period_arg(sub)?;

    let file = BufWriter::new(File::create(out)?);
    let res = store.export(period, fmt, file)?;
    print_notices(&res.notices);
    println!("Exported {} transactions to {}", res.value, out);
    Ok(())
}
