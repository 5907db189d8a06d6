// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod ai;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod sample;
pub mod store;
pub mod summary;
pub mod utils;

pub use error::{LedgerError, Notice, NoticeKind, Outcome};
pub use store::LedgerStore;
