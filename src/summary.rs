// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only aggregates over a loaded transaction table. Every function is
//! total: an empty table yields zeroed results, never an error.

use crate::models::{Period, Transaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

const AVG_DAYS_PER_MONTH: Decimal = Decimal::from_parts(3044, 0, 0, false, 2);

/// Sum that clamps at the `Decimal` range instead of panicking.
fn total(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, |acc, a| acc.saturating_add(a))
}

fn sum_of(table: &[Transaction], kind: TransactionType) -> Decimal {
    total(table.iter().filter(|t| t.r#type == kind).map(|t| t.amount))
}

/// Income minus expenses. Savings are transfers and do not move the balance.
pub fn balance(table: &[Transaction]) -> Decimal {
    sum_of(table, TransactionType::Income).saturating_sub(sum_of(table, TransactionType::Expense))
}

fn signed_amount(t: &Transaction) -> Decimal {
    match t.r#type {
        TransactionType::Income => t.amount,
        TransactionType::Expense => -t.amount,
        TransactionType::Savings => Decimal::ZERO,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub expense_by_category: BTreeMap<String, Decimal>,
    pub transaction_count: usize,
}

pub fn monthly_summary(table: &[Transaction], year: i32, month: u32) -> MonthlySummary {
    let rows: Vec<Transaction> = table
        .iter()
        .filter(|t| t.in_month(year, month))
        .cloned()
        .collect();
    if rows.is_empty() {
        return MonthlySummary::default();
    }
    let income = sum_of(&rows, TransactionType::Income);
    let expenses = sum_of(&rows, TransactionType::Expense);
    let mut expense_by_category = BTreeMap::new();
    for t in rows.iter().filter(|t| t.is_expense()) {
        let slot = expense_by_category
            .entry(t.category.clone())
            .or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(t.amount);
    }
    MonthlySummary {
        income,
        expenses,
        balance: income.saturating_sub(expenses),
        expense_by_category,
        transaction_count: rows.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialOverview {
    pub total_balance: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub avg_monthly_income: Decimal,
    pub avg_monthly_expenses: Decimal,
    pub largest_expense: Decimal,
    /// `None` when the period holds no expenses.
    pub most_frequent_category: Option<String>,
    pub transaction_count: usize,
    pub date_range: String,
}

impl Default for FinancialOverview {
    fn default() -> Self {
        FinancialOverview {
            total_balance: Decimal::ZERO,
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            avg_monthly_income: Decimal::ZERO,
            avg_monthly_expenses: Decimal::ZERO,
            largest_expense: Decimal::ZERO,
            most_frequent_category: None,
            transaction_count: 0,
            date_range: "No data".to_string(),
        }
    }
}

impl FinancialOverview {
    pub fn most_frequent_category_label(&self) -> &str {
        self.most_frequent_category.as_deref().unwrap_or("N/A")
    }
}

pub fn financial_overview(
    table: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> FinancialOverview {
    let rows: Vec<&Transaction> = table
        .iter()
        .filter(|t| period.contains(t.date, today))
        .collect();
    let (Some(first), Some(last)) = (
        rows.iter().map(|t| t.date).min(),
        rows.iter().map(|t| t.date).max(),
    ) else {
        return FinancialOverview::default();
    };

    let expenses: Vec<&Transaction> = rows.iter().copied().filter(|t| t.is_expense()).collect();
    let total_income = total(rows.iter().filter(|t| t.is_income()).map(|t| t.amount));
    let total_expenses = total(expenses.iter().map(|t| t.amount));

    let days = Decimal::from((last - first).num_days());
    let months_span = (days / AVG_DAYS_PER_MONTH).max(Decimal::ONE);

    FinancialOverview {
        total_balance: total_income.saturating_sub(total_expenses),
        total_income,
        total_expenses,
        avg_monthly_income: total_income / months_span,
        avg_monthly_expenses: total_expenses / months_span,
        largest_expense: expenses
            .iter()
            .map(|t| t.amount)
            .max()
            .unwrap_or(Decimal::ZERO),
        most_frequent_category: mode(expenses.iter().map(|t| t.category.as_str())),
        transaction_count: rows.len(),
        date_range: format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d")),
    }
}

/// Most common value; ties go to the value that sorts first.
fn mode<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (k, n) in counts {
        if best.is_none_or(|(_, b)| n > b) {
            best = Some((k, n));
        }
    }
    best.map(|(k, _)| k.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Expense totals per category, largest first.
pub fn category_totals(table: &[Transaction]) -> Vec<CategoryTotal> {
    let mut agg: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in table.iter().filter(|t| t.is_expense()) {
        let slot = agg.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(t.amount);
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    items
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub id: i64,
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// Cumulative balance in ascending date order (id breaks same-day ties).
pub fn running_balance(table: &[Transaction]) -> Vec<BalancePoint> {
    let mut rows: Vec<&Transaction> = table.iter().collect();
    rows.sort_by_key(|t| (t.date, t.id));
    let mut acc = Decimal::ZERO;
    rows.into_iter()
        .map(|t| {
            acc = acc.saturating_add(signed_amount(t));
            BalancePoint {
                id: t.id,
                date: t.date,
                balance: acc,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub r#type: TransactionType,
    pub total: Decimal,
}

/// Totals grouped by `YYYY-MM` and transaction type, oldest month first.
pub fn monthly_trend(table: &[Transaction]) -> Vec<TrendPoint> {
    let mut agg: BTreeMap<(String, TransactionType), Decimal> = BTreeMap::new();
    for t in table {
        let key = (t.date.format("%Y-%m").to_string(), t.r#type);
        let slot = agg.entry(key).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(t.amount);
    }
    agg.into_iter()
        .map(|((month, kind), total)| TrendPoint {
            month,
            r#type: kind,
            total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, kind: TransactionType, amount: i64, category: &str, date: &str) -> Transaction {
        Transaction {
            id,
            r#type: kind,
            amount: Decimal::from(amount),
            description: String::new(),
            category: category.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, TransactionType::Income, 1000, "Income", "2024-01-05"),
            tx(2, TransactionType::Expense, 300, "Food", "2024-01-10"),
            tx(3, TransactionType::Expense, 100, "Food", "2024-02-01"),
        ]
    }

    #[test]
    fn monthly_summary_for_january() {
        let s = monthly_summary(&sample(), 2024, 1);
        assert_eq!(s.income, Decimal::from(1000));
        assert_eq!(s.expenses, Decimal::from(300));
        assert_eq!(s.balance, Decimal::from(700));
        assert_eq!(s.expense_by_category.get("Food"), Some(&Decimal::from(300)));
        assert_eq!(s.expense_by_category.len(), 1);
        assert_eq!(s.transaction_count, 2);
    }

    #[test]
    fn monthly_summary_for_empty_month_is_zeroed() {
        let s = monthly_summary(&sample(), 2023, 12);
        assert_eq!(s, MonthlySummary::default());
        assert!(s.expense_by_category.is_empty());
    }

    #[test]
    fn balance_ignores_savings_and_order() {
        let mut t = sample();
        t.push(tx(4, TransactionType::Savings, 500, "Retirement", "2024-01-20"));
        assert_eq!(balance(&t), Decimal::from(600));
        t.reverse();
        assert_eq!(balance(&t), Decimal::from(600));
        assert_eq!(balance(&[]), Decimal::ZERO);
    }

    #[test]
    fn overview_of_empty_table_uses_sentinels() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let o = financial_overview(&[], Period::All, today);
        assert_eq!(o.most_frequent_category_label(), "N/A");
        assert_eq!(o.date_range, "No data");
        assert_eq!(o.transaction_count, 0);
    }

    #[test]
    fn overview_averages_over_short_span_use_one_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let o = financial_overview(&sample(), Period::All, today);
        // 27 days span -> clamp to one month
        assert_eq!(o.avg_monthly_income, Decimal::from(1000));
        assert_eq!(o.avg_monthly_expenses, Decimal::from(400));
        assert_eq!(o.largest_expense, Decimal::from(300));
        assert_eq!(o.most_frequent_category.as_deref(), Some("Food"));
        assert_eq!(o.date_range, "2024-01-05 to 2024-02-01");
    }

    #[test]
    fn overview_filters_by_period() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        let o = financial_overview(&sample(), Period::CurrentMonth, today);
        assert_eq!(o.transaction_count, 1);
        assert_eq!(o.total_expenses, Decimal::from(100));
        assert_eq!(o.total_income, Decimal::ZERO);
    }

    #[test]
    fn most_frequent_category_tie_goes_to_first_in_sort_order() {
        let t = vec![
            tx(1, TransactionType::Expense, 5, "Transportation", "2024-01-01"),
            tx(2, TransactionType::Expense, 5, "Food", "2024-01-02"),
            tx(3, TransactionType::Expense, 5, "Food", "2024-01-03"),
            tx(4, TransactionType::Expense, 5, "Transportation", "2024-01-04"),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let o = financial_overview(&t, Period::All, today);
        assert_eq!(o.most_frequent_category.as_deref(), Some("Food"));
    }

    #[test]
    fn totals_clamp_instead_of_overflowing() {
        let mut big = tx(1, TransactionType::Income, 0, "Income", "2024-01-01");
        big.amount = Decimal::MAX;
        let mut big2 = big.clone();
        big2.id = 2;
        let mut spent = big.clone();
        spent.id = 3;
        spent.r#type = TransactionType::Expense;
        spent.category = "Food".to_string();
        let t = vec![big, big2, spent.clone(), spent];

        assert_eq!(balance(&t), Decimal::ZERO);
        let s = monthly_summary(&t, 2024, 1);
        assert_eq!(s.income, Decimal::MAX);
        assert_eq!(s.expense_by_category["Food"], Decimal::MAX);
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(financial_overview(&t, Period::All, today).total_income, Decimal::MAX);
        assert_eq!(category_totals(&t)[0].total, Decimal::MAX);
        assert_eq!(running_balance(&t)[1].balance, Decimal::MAX);
        assert_eq!(monthly_trend(&t)[0].total, Decimal::MAX);
    }

    #[test]
    fn running_balance_follows_date_order() {
        let t = vec![
            tx(1, TransactionType::Expense, 50, "Food", "2024-01-10"),
            tx(2, TransactionType::Income, 200, "Income", "2024-01-01"),
            tx(3, TransactionType::Savings, 30, "Retirement", "2024-01-05"),
        ];
        let points = running_balance(&t);
        let got: Vec<(i64, Decimal)> = points.iter().map(|p| (p.id, p.balance)).collect();
        assert_eq!(
            got,
            vec![
                (2, Decimal::from(200)),
                (3, Decimal::from(200)),
                (1, Decimal::from(150)),
            ]
        );
    }

    #[test]
    fn trend_and_category_totals_group_rows() {
        let trend = monthly_trend(&sample());
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].month, "2024-01");
        assert_eq!(trend[0].r#type, TransactionType::Income);
        assert_eq!(trend[2].month, "2024-02");

        let cats = category_totals(&sample());
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].total, Decimal::from(400));
    }
}
