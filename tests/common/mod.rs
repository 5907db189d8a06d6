// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use budgetbook::ai::{Completion, Unconfigured};
use budgetbook::config::Config;
use budgetbook::{LedgerError, LedgerStore};
use std::path::Path;

/// Service double that always answers with the same text.
pub struct Answer(pub &'static str);

impl Completion for Answer {
    fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LedgerError> {
        Ok(self.0.to_string())
    }
}

/// Service double that behaves like a network failure.
pub struct Failing;

impl Completion for Failing {
    fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LedgerError> {
        Err(LedgerError::Service("connection refused".into()))
    }
}

pub fn store_in(dir: &Path) -> LedgerStore {
    LedgerStore::with_service(Config::local(dir), Box::new(Unconfigured)).value
}

pub fn store_with(dir: &Path, service: Box<dyn Completion>) -> LedgerStore {
    LedgerStore::with_service(Config::local(dir), service).value
}

pub fn write_ledger(dir: &Path, body: &str) {
    std::fs::write(
        Config::local(dir).transactions_path(),
        format!("id,type,amount,description,category,date\n{}", body),
    )
    .unwrap();
}
