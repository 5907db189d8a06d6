// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::period_arg;
use crate::models::{Transaction, TransactionType};
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, print_notices};
use anyhow::{Result, anyhow};

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionType = sub
        .get_one::<String>("type")
        .unwrap()
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let category = sub.get_one::<String>("category").map(|s| s.as_str());
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;

    let out = store.append(kind, amount, description, category, date)?;
    print_notices(&out.notices);
    if let Some(t) = out.value.iter().max_by_key(|t| t.id) {
        println!(
            "Recorded #{} {} {} '{}' [{}] on {}",
            t.id,
            t.r#type,
            fmt_money(&t.amount),
            t.description,
            t.category,
            t.date
        );
    }
    Ok(())
}

fn rows_for(data: &[Transaction]) -> Vec<Vec<String>> {
    data.iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.to_string(),
                t.r#type.to_string(),
                fmt_money(&t.amount),
                t.category.clone(),
                t.description.clone(),
            ]
        })
        .collect()
}

const HEADERS: [&str; 6] = ["ID", "Date", "Type", "Amount", "Category", "Description"];

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&HEADERS, rows_for(&data)));
    }
    Ok(())
}

/// Newest first, after applying the period/type/category filters and limit.
pub fn query_rows(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let period = period_arg(sub)?;
    let out = store.load(period);
    print_notices(&out.notices);
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()
        .map_err(|e| anyhow!(e))?;
    let category = sub.get_one::<String>("category");

    let mut data: Vec<Transaction> = out
        .value
        .into_iter()
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .filter(|t| category.is_none_or(|c| t.category.eq_ignore_ascii_case(c)))
        .collect();
    data.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn show(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let out = store.get(id);
    print_notices(&out.notices);
    let t = out
        .value
        .ok_or_else(|| anyhow!("Transaction with ID {} not found", id))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        println!("{}", pretty_table(&HEADERS, rows_for(std::slice::from_ref(&t))));
    }
    Ok(())
}

fn remove(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let remaining = store.delete(id)?;
    println!("Deleted transaction {} ({} remaining)", id, remaining.len());
    Ok(())
}
