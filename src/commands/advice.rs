// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::period_arg;
use crate::ai;
use crate::store::LedgerStore;
use crate::utils::{parse_decimal, print_notices, today};
use anyhow::Result;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("analysis", sub)) => {
            let out = store.load(period_arg(sub)?);
            print_notices(&out.notices);
            println!("{}", ai::spending_analysis(store.service(), &out.value, today()));
        }
        Some(("budget", sub)) => {
            let out = store.load(period_arg(sub)?);
            print_notices(&out.notices);
            let income = match sub.get_one::<String>("income") {
                Some(s) => parse_decimal(s)?,
                None => store.load_profile().value.monthly_income(),
            };
            println!(
                "{}",
                ai::budget_recommendations(store.service(), &out.value, income, today())
            );
        }
        _ => {}
    }
    Ok(())
}
