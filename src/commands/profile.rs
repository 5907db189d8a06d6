// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::UserProfile;
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, pretty_table, print_notices, today};
use anyhow::Result;
use std::collections::BTreeMap;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let out = store.load_profile();
            print_notices(&out.notices);
            let map: BTreeMap<&str, &str> = out.value.iter().collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &map)? {
                let rows = out
                    .value
                    .iter()
                    .map(|(k, v)| vec![k.to_string(), v.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Setting", "Value"], rows));
                if store.is_first_time_user() {
                    println!("Profile setup not completed; set setup_completed=true when done.");
                }
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            let out = store.load_profile();
            print_notices(&out.notices);
            let mut profile = out.value;
            profile.set(key, value.clone());
            store.save_profile(&profile)?;
            println!("Set {} = {}", key, value);
        }
        Some(("reset", _)) => {
            store.save_profile(&UserProfile::defaults(today()))?;
            println!("Profile reset to defaults");
        }
        _ => {}
    }
    Ok(())
}
