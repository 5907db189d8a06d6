// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Demo ledger covering the 90 days before a given date.
//!
//! Amount and date jitter is derived from row positions, so the same `today`
//! always produces the same ledger.

use crate::error::{LedgerError, Notice, Outcome};
use crate::models::{TransactionType, UserProfile};
use crate::store::LedgerStore;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

struct Template {
    description: &'static str,
    amount: i64,
    category: &'static str,
}

const fn t(description: &'static str, amount: i64, category: &'static str) -> Template {
    Template {
        description,
        amount,
        category,
    }
}

const INCOME: [Template; 4] = [
    t("Monthly Salary", 50000, "Income"),
    t("Freelance Work", 15000, "Income"),
    t("Investment Returns", 5000, "Income"),
    t("Side Business", 8000, "Income"),
];

const SAVINGS: [Template; 7] = [
    t("Emergency Fund Deposit", 10000, "Emergency Fund"),
    t("Retirement Contribution", 5000, "Retirement"),
    t("Investment Portfolio", 8000, "Investment"),
    t("Vacation Fund", 3000, "Vacation Fund"),
    t("House Down Payment", 15000, "House Down Payment"),
    t("401k Contribution", 7000, "Retirement"),
    t("Emergency Buffer", 2500, "Emergency Fund"),
];

const EXPENSES: [Template; 30] = [
    t("Monthly Rent", 18000, "Housing"),
    t("Electricity Bill", 3500, "Utilities"),
    t("Water Bill", 1200, "Utilities"),
    t("Internet Bill", 2500, "Utilities"),
    t("Grocery Shopping", 4500, "Food"),
    t("Restaurant Dinner", 1800, "Food"),
    t("Coffee Shop", 250, "Food"),
    t("Fast Food Lunch", 450, "Food"),
    t("Weekly Groceries", 3200, "Food"),
    t("Gas for Car", 2500, "Transportation"),
    t("Uber Ride", 350, "Transportation"),
    t("Bus Fare", 150, "Transportation"),
    t("Car Maintenance", 5000, "Transportation"),
    t("Movie Theater", 800, "Entertainment"),
    t("Netflix Subscription", 550, "Entertainment"),
    t("Spotify Premium", 149, "Entertainment"),
    t("Concert Tickets", 3500, "Entertainment"),
    t("Gaming Purchase", 2000, "Entertainment"),
    t("Clothing Purchase", 2500, "Shopping"),
    t("Electronics Store", 8000, "Shopping"),
    t("Online Shopping", 1200, "Shopping"),
    t("Pharmacy", 650, "Healthcare"),
    t("Doctor Consultation", 2000, "Healthcare"),
    t("Dental Checkup", 3500, "Healthcare"),
    t("Medicine Purchase", 800, "Healthcare"),
    t("Online Course", 2500, "Education"),
    t("Book Purchase", 1200, "Education"),
    t("Bank Transfer Fee", 50, "Other"),
    t("ATM Fee", 25, "Other"),
    t("Gift Purchase", 1500, "Other"),
];

const DAY_STEPS: [i64; 10] = [1, 1, 2, 1, 1, 3, 1, 2, 1, 1];

/// Scale `base` by a factor in `[low, low + spread]` percent picked by `seed`.
fn jitter(base: i64, seed: usize, low: i64, spread: i64) -> Decimal {
    let pct = low + (seed as i64 * 37) % (spread + 1);
    (Decimal::from(base) * Decimal::new(pct, 2)).round_dp(0)
}

pub fn sample_profile(today: NaiveDate) -> UserProfile {
    let mut p = UserProfile::default();
    p.set(UserProfile::MONTHLY_INCOME, "65000");
    p.set(UserProfile::SAVINGS_GOAL, "20000");
    p.set(UserProfile::EXPENSE_LIMIT, "45000");
    p.set(
        UserProfile::FINANCIAL_GOALS,
        "Build emergency fund of 200,000, Save for house down payment, Pay off credit card debt",
    );
    p.set(UserProfile::BUDGET_STYLE, "50/30/20 Rule (Needs/Wants/Savings)");
    p.set(UserProfile::SETUP_COMPLETED, "true");
    p.set(UserProfile::CREATED_DATE, today.format("%Y-%m-%d").to_string());
    p
}

/// Append the demo transactions to the ledger and overwrite the profile.
/// Returns the number of transactions added.
pub fn seed_sample_data(store: &LedgerStore, today: NaiveDate) -> Result<Outcome<usize>, LedgerError> {
    let start = today - Duration::days(90);
    let mut notices: Vec<Notice> = Vec::new();
    let mut added = 0usize;

    let mut add = |kind: TransactionType, tpl: &Template, amount: Decimal, date: NaiveDate| {
        let out = store.append(kind, amount, tpl.description, Some(tpl.category), Some(date))?;
        notices.extend(out.notices);
        added += 1;
        Ok::<(), LedgerError>(())
    };

    for month in 0..3usize {
        let month_date = start + Duration::days(30 * month as i64);
        for (i, tpl) in INCOME.iter().take(2).enumerate() {
            let seed = month * 2 + i;
            let date = month_date + Duration::days((seed % 6) as i64);
            add(TransactionType::Income, tpl, jitter(tpl.amount, seed, 90, 20), date)?;
        }
    }

    for month in 0..3usize {
        let month_date = start + Duration::days(30 * month as i64);
        let count = if month % 2 == 0 { 3 } else { 2 };
        for k in 0..count {
            let seed = month * 3 + k;
            let tpl = &SAVINGS[(seed * 5) % SAVINGS.len()];
            let date = month_date + Duration::days(((seed * 4) % 16) as i64);
            add(TransactionType::Savings, tpl, jitter(tpl.amount, seed, 80, 40), date)?;
        }
    }

    let mut day = start;
    let mut step = 0usize;
    while day <= today {
        let per_day = 1 + step % 4;
        for k in 0..per_day {
            let seed = step * 7 + k * 3;
            let tpl = &EXPENSES[seed % EXPENSES.len()];
            let amount = jitter(tpl.amount, seed, 70, 60);
            if amount < Decimal::TEN {
                continue;
            }
            add(TransactionType::Expense, tpl, amount, day)?;
        }
        day += Duration::days(DAY_STEPS[step % DAY_STEPS.len()]);
        step += 1;
    }

    store.save_profile(&sample_profile(today))?;
    log::info!("seeded {} sample transactions", added);
    Ok(Outcome::with_notices(added, notices))
}
