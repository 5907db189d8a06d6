// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::period_arg;
use crate::store::LedgerStore;
use crate::summary;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table, print_notices, today};
use anyhow::Result;
use chrono::Datelike;
use serde_json::json;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(store, sub)?,
        Some(("month", sub)) => month(store, sub)?,
        Some(("overview", sub)) => overview(store, sub)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("trend", sub)) => trend(store, sub)?,
        Some(("running", sub)) => running(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn json_flags(sub: &clap::ArgMatches) -> (bool, bool) {
    (sub.get_flag("json"), sub.get_flag("jsonl"))
}

fn balance(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let period = period_arg(sub)?;
    let out = store.load(period);
    print_notices(&out.notices);
    let bal = summary::balance(&out.value);
    if !maybe_print_json(json_flag, jsonl_flag, &json!({ "period": period, "balance": bal }))? {
        println!("Balance ({}): {}", period.label(), fmt_money(&bal));
    }
    Ok(())
}

fn month(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let (year, month) = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => {
            let t = today();
            (t.year(), t.month())
        }
    };
    let out = store.load(crate::models::Period::All);
    print_notices(&out.notices);
    let s = summary::monthly_summary(&out.value, year, month);
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expenses", "Balance", "Transactions"],
            vec![vec![
                format!("{:04}-{:02}", year, month),
                fmt_money(&s.income),
                fmt_money(&s.expenses),
                fmt_money(&s.balance),
                s.transaction_count.to_string(),
            ]],
        )
    );
    if !s.expense_by_category.is_empty() {
        let rows = s
            .expense_by_category
            .iter()
            .map(|(c, a)| vec![c.clone(), fmt_money(a)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn overview(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let period = period_arg(sub)?;
    let out = store.load(crate::models::Period::All);
    print_notices(&out.notices);
    let o = summary::financial_overview(&out.value, period, today());
    if maybe_print_json(json_flag, jsonl_flag, &o)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Period".into(), period.label().into()],
        vec!["Date range".into(), o.date_range.clone()],
        vec!["Total balance".into(), fmt_money(&o.total_balance)],
        vec!["Total income".into(), fmt_money(&o.total_income)],
        vec!["Total expenses".into(), fmt_money(&o.total_expenses)],
        vec!["Avg monthly income".into(), fmt_money(&o.avg_monthly_income)],
        vec!["Avg monthly expenses".into(), fmt_money(&o.avg_monthly_expenses)],
        vec!["Largest expense".into(), fmt_money(&o.largest_expense)],
        vec![
            "Most frequent category".into(),
            o.most_frequent_category_label().to_string(),
        ],
        vec!["Transactions".into(), o.transaction_count.to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn categories(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let out = store.load(period_arg(sub)?);
    print_notices(&out.notices);
    let data = summary::category_totals(&out.value);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn trend(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let out = store.load(period_arg(sub)?);
    print_notices(&out.notices);
    let data = summary::monthly_trend(&out.value);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|p| vec![p.month.clone(), p.r#type.to_string(), fmt_money(&p.total)])
            .collect();
        println!("{}", pretty_table(&["Month", "Type", "Total"], rows));
    }
    Ok(())
}

fn running(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let out = store.load(period_arg(sub)?);
    print_notices(&out.notices);
    let data = summary::running_balance(&out.value);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|p| vec![p.date.to_string(), p.id.to_string(), fmt_money(&p.balance)])
            .collect();
        println!("{}", pretty_table(&["Date", "ID", "Balance"], rows));
    }
    Ok(())
}
