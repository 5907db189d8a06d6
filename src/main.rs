// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use budgetbook::{cli, commands, config::Config, sample, store::LedgerStore, utils};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let data_dir = matches.get_one::<String>("data-dir").map(Path::new);
    let config = Config::from_env(data_dir)?;
    config.ensure_data_dir()?;

    let opened = LedgerStore::open(config);
    utils::print_notices(&opened.notices);
    let store = opened.value;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Ledger initialized at {}",
                store.config().transactions_path().display()
            );
        }
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("advise", sub)) => commands::advice::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        Some(("sample", _)) => {
            let out = sample::seed_sample_data(&store, utils::today())?;
            utils::print_notices(&out.notices);
            println!("Added {} sample transactions and a sample profile", out.value);
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
