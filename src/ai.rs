// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AiConfig;
use crate::error::{LedgerError, Notice, NoticeKind};
use crate::models::{ExpenseCategory, Transaction};
use crate::summary::{balance, monthly_summary};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

const CATEGORIZE_SYSTEM: &str = "You are a financial categorization assistant. Categorize the expense into one of these categories: Food, Transportation, Entertainment, Healthcare, Shopping, Utilities, Housing, Education, Other. Return only the category name.";
const ANALYSIS_SYSTEM: &str = "You are a financial advisor. Analyze the spending data and provide insights, patterns, and recommendations. Be concise but helpful.";
const BUDGET_SYSTEM: &str = "You are a financial advisor. Based on income and spending patterns, provide budget recommendations using the 50/30/20 rule or other appropriate strategies.";

pub const ANALYSIS_UNAVAILABLE: &str =
    "No data available for analysis or the AI service is not configured.";
pub const RECOMMENDATIONS_UNAVAILABLE: &str =
    "No data available for recommendations or the AI service is not configured.";
pub const ANALYSIS_FAILED: &str = "AI analysis is unavailable right now. Try again later.";
pub const RECOMMENDATIONS_FAILED: &str =
    "Budget recommendations are unavailable right now. Try again later.";

static CATEGORY_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(food|transportation|entertainment|healthcare|shopping|utilities|housing|education|other)\b",
    )
    .expect("static category pattern")
});

/// A text-completion endpoint: system instructions plus one user prompt in,
/// free text out.
pub trait Completion {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, LedgerError>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Stand-in used when no credentials are available.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

impl Completion for Unconfigured {
    fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LedgerError> {
        Err(LedgerError::Service("OPENAI_API_KEY is not set".into()))
    }

    fn is_configured(&self) -> bool {
        false
    }
}

pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(cfg: &AiConfig, api_key: &str) -> Result<Self, LedgerError> {
        let http = crate::utils::http_client(cfg.timeout)
            .map_err(|e| LedgerError::Service(e.to_string()))?;
        Ok(OpenAiClient {
            http,
            api_key: api_key.to_string(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
        })
    }
}

impl Completion for OpenAiClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, LedgerError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt}
            ]
        });
        let url = format!("{}/chat/completions", self.base_url);
        let resp: ChatResponse = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| LedgerError::Service(e.to_string()))?;
        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LedgerError::Service("empty completion".into()))
    }
}

/// Build the completion service described by `cfg`.
pub fn service_from_config(cfg: &AiConfig) -> Box<dyn Completion> {
    match cfg.api_key.as_deref() {
        Some(key) => match OpenAiClient::new(cfg, key) {
            Ok(client) => Box::new(client),
            Err(e) => {
                log::warn!("AI client could not be built, continuing without it: {}", e);
                Box::new(Unconfigured)
            }
        },
        None => Box::new(Unconfigured),
    }
}

/// Map a free-form answer onto the closed category set.
pub fn parse_category(answer: &str) -> Option<ExpenseCategory> {
    if let Ok(c) = answer.parse::<ExpenseCategory>() {
        return Some(c);
    }
    CATEGORY_WORD
        .find(answer)
        .and_then(|m| m.as_str().parse::<ExpenseCategory>().ok())
}

/// Ask the service for a category. Never fails: any problem yields `Other`
/// together with a notice describing what went wrong.
pub fn categorize_expense(
    service: &dyn Completion,
    description: &str,
) -> (ExpenseCategory, Option<Notice>) {
    let prompt = format!("Categorize this expense: {}", description);
    match service.complete(CATEGORIZE_SYSTEM, &prompt) {
        Ok(answer) => match parse_category(&answer) {
            Some(c) => (c, None),
            None => (
                ExpenseCategory::Other,
                Some(Notice::new(
                    NoticeKind::ExternalServiceFailure,
                    format!("unrecognised category '{}', using 'Other'", answer),
                )),
            ),
        },
        Err(e) => (
            ExpenseCategory::Other,
            Some(Notice::new(
                NoticeKind::ExternalServiceFailure,
                format!("AI categorization unavailable, using 'Other': {}", e),
            )),
        ),
    }
}

fn analysis_payload(table: &[Transaction], today: NaiveDate) -> serde_json::Value {
    let summary = monthly_summary(table, today.year(), today.month());
    let expenses: Vec<&Transaction> = table.iter().filter(|t| t.is_expense()).collect();
    let recent = &expenses[expenses.len().saturating_sub(10)..];
    json!({
        "monthly_summary": summary,
        "recent_expenses": recent,
        "balance": balance(table),
    })
}

pub fn spending_analysis(service: &dyn Completion, table: &[Transaction], today: NaiveDate) -> String {
    if table.is_empty() || !service.is_configured() {
        return ANALYSIS_UNAVAILABLE.to_string();
    }
    let prompt = format!(
        "Analyze this financial data: {}",
        analysis_payload(table, today)
    );
    match service.complete(ANALYSIS_SYSTEM, &prompt) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("spending analysis failed: {}", e);
            ANALYSIS_FAILED.to_string()
        }
    }
}

pub fn budget_recommendations(
    service: &dyn Completion,
    table: &[Transaction],
    monthly_income: Decimal,
    today: NaiveDate,
) -> String {
    if table.is_empty() || !service.is_configured() {
        return RECOMMENDATIONS_UNAVAILABLE.to_string();
    }
    let summary = monthly_summary(table, today.year(), today.month());
    let prompt = format!(
        "Monthly income: {}, Current spending: {}",
        monthly_income.round_dp(2),
        json!(summary)
    );
    match service.complete(BUDGET_SYSTEM, &prompt) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("budget recommendations failed: {}", e);
            RECOMMENDATIONS_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl Completion for Fixed {
        fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LedgerError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn parses_exact_and_embedded_labels() {
        assert_eq!(parse_category("food"), Some(ExpenseCategory::Food));
        assert_eq!(
            parse_category("Category: Transportation."),
            Some(ExpenseCategory::Transportation)
        );
        assert_eq!(parse_category("groceries"), None);
    }

    #[test]
    fn unrecognised_answer_degrades_to_other() {
        let (c, notice) = categorize_expense(&Fixed("Groceries"), "milk");
        assert_eq!(c, ExpenseCategory::Other);
        assert_eq!(notice.unwrap().kind, NoticeKind::ExternalServiceFailure);
    }

    #[test]
    fn unconfigured_service_yields_other_with_notice() {
        let (c, notice) = categorize_expense(&Unconfigured, "Taxi ride");
        assert_eq!(c, ExpenseCategory::Other);
        assert!(notice.unwrap().message.contains("OPENAI_API_KEY"));
    }

    struct Down;

    impl Completion for Down {
        fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LedgerError> {
            Err(LedgerError::Service("503 Service Unavailable".into()))
        }
    }

    #[test]
    fn advice_failure_hides_error_details() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let table = vec![Transaction {
            id: 1,
            r#type: crate::models::TransactionType::Expense,
            amount: Decimal::TEN,
            description: "Lunch".into(),
            category: "Food".into(),
            date: today,
        }];
        let analysis = spending_analysis(&Down, &table, today);
        assert_eq!(analysis, ANALYSIS_FAILED);
        let budget = budget_recommendations(&Down, &table, Decimal::ONE, today);
        assert_eq!(budget, RECOMMENDATIONS_FAILED);
        assert!(!budget.contains("503"));
    }

    #[test]
    fn advice_without_data_returns_fixed_text() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(spending_analysis(&Fixed("x"), &[], today), ANALYSIS_UNAVAILABLE);
        assert_eq!(
            budget_recommendations(&Fixed("x"), &[], Decimal::ONE, today),
            RECOMMENDATIONS_UNAVAILABLE
        );
    }
}
