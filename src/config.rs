// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Budgetbook", "budgetbook"));

pub const TRANSACTIONS_FILE: &str = "budget_data.csv";
pub const PROFILE_FILE: &str = "user_profile.csv";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub ai: AiConfig,
}

impl Config {
    /// Resolve settings from the environment. An explicit `data_dir` wins over
    /// `BUDGETBOOK_DATA_DIR`, which wins over the platform data directory.
    pub fn from_env(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(p) => p.to_path_buf(),
            None => match std::env::var_os("BUDGETBOOK_DATA_DIR") {
                Some(p) if !p.is_empty() => PathBuf::from(p),
                _ => default_data_dir()?,
            },
        };
        let ai = AiConfig {
            api_key: env_nonempty("OPENAI_API_KEY"),
            base_url: env_nonempty("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            model: env_nonempty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            ..AiConfig::default()
        };
        Ok(Config { data_dir, ai })
    }

    /// Config rooted at `dir` with the AI service left unconfigured.
    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: dir.into(),
            ai: AiConfig::default(),
        }
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }

    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create data dir {}", self.data_dir.display()))
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
