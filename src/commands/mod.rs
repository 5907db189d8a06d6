// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod reports;
pub mod profile;
pub mod importer;
pub mod exporter;
pub mod advice;
pub mod doctor;

use crate::models::Period;
use anyhow::{Result, anyhow};

pub(crate) fn period_arg(sub: &clap::ArgMatches) -> Result<Period> {
    match sub.get_one::<String>("period") {
        Some(p) => p.parse::<Period>().map_err(|e| anyhow!(e)),
        None => Ok(Period::All),
    }
}
