// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Hard failures surfaced by the ledger store and the AI service.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction with ID {0} not found")]
    NotFound(i64),

    #[error("No transactions to delete")]
    EmptyLedger,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Transaction ids exhausted: the largest stored id is already the maximum")]
    IdsExhausted,

    #[error("Invalid amount '{0}', expected a non-negative decimal")]
    InvalidAmount(String),

    #[error("AI service unavailable: {0}")]
    Service(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_) | LedgerError::EmptyLedger)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    IntegrityRepair,
    ExternalServiceFailure,
    StorageFallback,
}

/// A non-blocking condition the store recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        let notice = Notice {
            kind,
            message: message.into(),
        };
        log::warn!("{}", notice);
        notice
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            NoticeKind::IntegrityRepair => "repair",
            NoticeKind::ExternalServiceFailure => "service",
            NoticeKind::StorageFallback => "storage",
        };
        write!(f, "[{}] {}", label, self.message)
    }
}

/// A value produced by an operation that may have degraded to a safe default.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub notices: Vec<Notice>,
}

impl<T> Outcome<T> {
    pub fn clean(value: T) -> Self {
        Outcome {
            value,
            notices: Vec::new(),
        }
    }

    pub fn with_notices(value: T, notices: Vec<Notice>) -> Self {
        Outcome { value, notices }
    }

    pub fn is_clean(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn has(&self, kind: NoticeKind) -> bool {
        self.notices.iter().any(|n| n.kind == kind)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            notices: self.notices,
        }
    }
}
