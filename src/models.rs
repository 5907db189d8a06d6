// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Savings,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Savings => "savings",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            "savings" => Ok(TransactionType::Savings),
            other => Err(format!("Unknown transaction type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

/// The closed label set the categorization service may answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Entertainment,
    Healthcare,
    Shopping,
    Utilities,
    Housing,
    Education,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Shopping,
        ExpenseCategory::Utilities,
        ExpenseCategory::Housing,
        ExpenseCategory::Education,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ExpenseCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("Unknown category '{}'", needle))
    }
}

pub const INCOME_CATEGORY: &str = "Income";

/// View restriction applied relative to the wall-clock date at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    All,
    CurrentMonth,
    CurrentYear,
}

impl Period {
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Period::All => true,
            Period::CurrentMonth => date.year() == today.year() && date.month() == today.month(),
            Period::CurrentYear => date.year() == today.year(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::All => "All Time",
            Period::CurrentMonth => "Current Month",
            Period::CurrentYear => "Current Year",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Period::All),
            "month" | "current_month" => Ok(Period::CurrentMonth),
            "year" | "current_year" => Ok(Period::CurrentYear),
            other => Err(format!("Unknown period '{}' (use all|month|year)", other)),
        }
    }
}

/// Flat setting -> value record. Insertion order is kept so the file
/// round-trips in the order settings were written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    settings: Vec<(String, String)>,
}

impl UserProfile {
    pub const MONTHLY_INCOME: &'static str = "monthly_income";
    pub const SAVINGS_GOAL: &'static str = "savings_goal";
    pub const EXPENSE_LIMIT: &'static str = "expense_limit";
    pub const FINANCIAL_GOALS: &'static str = "financial_goals";
    pub const BUDGET_STYLE: &'static str = "budget_style";
    pub const SETUP_COMPLETED: &'static str = "setup_completed";
    pub const CREATED_DATE: &'static str = "created_date";

    pub fn defaults(today: NaiveDate) -> Self {
        let mut p = UserProfile::default();
        p.set(Self::MONTHLY_INCOME, "0");
        p.set(Self::SAVINGS_GOAL, "0");
        p.set(Self::EXPENSE_LIMIT, "0");
        p.set(Self::SETUP_COMPLETED, "false");
        p.set(Self::CREATED_DATE, today.format("%Y-%m-%d").to_string());
        p
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.settings.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.settings.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.settings.iter().position(|(k, _)| k == key)?;
        Some(self.settings.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    fn decimal(&self, key: &str) -> Decimal {
        self.get(key)
            .and_then(|v| v.trim().parse::<Decimal>().ok())
            .unwrap_or(Decimal::ZERO)
    }

    pub fn monthly_income(&self) -> Decimal {
        self.decimal(Self::MONTHLY_INCOME)
    }

    pub fn savings_goal(&self) -> Decimal {
        self.decimal(Self::SAVINGS_GOAL)
    }

    pub fn expense_limit(&self) -> Decimal {
        self.decimal(Self::EXPENSE_LIMIT)
    }

    pub fn setup_completed(&self) -> bool {
        matches!(
            self.get(Self::SETUP_COMPLETED)
                .map(|v| v.trim().to_lowercase())
                .as_deref(),
            Some("true" | "1" | "yes")
        )
    }
}

impl FromIterator<(String, String)> for UserProfile {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut p = UserProfile::default();
        for (k, v) in iter {
            p.set(&k, v);
        }
        p
    }
}
