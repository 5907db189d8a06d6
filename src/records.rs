// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The single place where untyped tabular rows become [`Transaction`]s.
//!
//! Both the ledger file and imported tables pass through [`coerce`]. Malformed
//! fields are repaired to safe defaults instead of rejecting the row, and each
//! repair is reported back so the caller can decide whether a rewrite is due.

use crate::models::{INCOME_CATEGORY, Transaction, TransactionType};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const COLUMNS: [&str; 6] = ["id", "type", "amount", "description", "category", "date"];
pub const REQUIRED_IMPORT_COLUMNS: [&str; 5] = ["type", "amount", "description", "category", "date"];

/// A row as it sits in the file: every cell is optional text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RawRecord {
    pub fn from_json(obj: &Map<String, Value>) -> Self {
        fn cell(obj: &Map<String, Value>, key: &str) -> Option<String> {
            match obj.get(key)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        }
        RawRecord {
            id: cell(obj, "id"),
            kind: cell(obj, "type"),
            amount: cell(obj, "amount"),
            description: cell(obj, "description"),
            category: cell(obj, "category"),
            date: cell(obj, "date"),
        }
    }
}

/// Serialized form written back to disk and to CSV exports.
pub fn to_record(tx: &Transaction) -> [String; 6] {
    [
        tx.id.to_string(),
        tx.r#type.to_string(),
        tx.amount.to_string(),
        tx.description.clone(),
        tx.category.clone(),
        tx.date.format("%Y-%m-%d").to_string(),
    ]
}

#[derive(Debug, Clone)]
pub struct Coerced {
    pub tx: Transaction,
    /// False when the id cell was missing, unparsable or not positive.
    pub id_valid: bool,
    /// Field coercions applied; id problems are reported through `id_valid`.
    pub repairs: Vec<String>,
}

pub fn coerce(raw: &RawRecord, today: NaiveDate) -> Coerced {
    let mut repairs = Vec::new();

    let id = raw.id.as_deref().and_then(parse_id);

    let kind = match raw.kind.as_deref().map(str::parse::<TransactionType>) {
        Some(Ok(t)) => t,
        _ => {
            repairs.push(format!(
                "type '{}' coerced to expense",
                raw.kind.as_deref().unwrap_or("")
            ));
            TransactionType::Expense
        }
    };

    let amount = match raw.amount.as_deref().map(str::trim).and_then(parse_amount) {
        Some(a) if a.is_sign_negative() => {
            repairs.push(format!("amount {} made non-negative", a));
            a.abs()
        }
        Some(a) => a,
        None => {
            repairs.push(format!(
                "amount '{}' coerced to 0",
                raw.amount.as_deref().unwrap_or("")
            ));
            Decimal::ZERO
        }
    };

    let date = match raw.date.as_deref().and_then(parse_flexible_date) {
        Some(d) => d,
        None => {
            repairs.push(format!(
                "date '{}' coerced to {}",
                raw.date.as_deref().unwrap_or(""),
                today
            ));
            today
        }
    };

    let description = raw
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .to_string();

    let mut category = raw
        .category
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .to_string();
    if category.is_empty() {
        category = if kind == TransactionType::Income {
            INCOME_CATEGORY.to_string()
        } else {
            "Other".to_string()
        };
        repairs.push(format!("empty category set to {}", category));
    }

    Coerced {
        tx: Transaction {
            id: id.unwrap_or(0),
            r#type: kind,
            amount,
            description,
            category,
            date,
        },
        id_valid: id.is_some(),
        repairs,
    }
}

fn parse_id(s: &str) -> Option<i64> {
    let s = s.trim();
    let id = match s.parse::<i64>() {
        Ok(v) => v,
        // Spreadsheet round-trips sometimes leave integral floats behind ("3.0").
        Err(_) => {
            let d = s.parse::<Decimal>().ok()?;
            if !d.fract().is_zero() {
                return None;
            }
            i64::try_from(d.trunc()).ok()?
        }
    };
    (id > 0).then_some(id)
}

fn parse_amount(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

/// Accepts plain dates, naive timestamps and RFC 3339.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Required import columns absent from `headers`, in canonical order.
pub fn missing_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let present: Vec<String> = headers.into_iter().map(|h| h.trim().to_lowercase()).collect();
    REQUIRED_IMPORT_COLUMNS
        .iter()
        .filter(|c| !present.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect()
}
