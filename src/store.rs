// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Flat-file ledger store.
//!
//! The transaction table and the user profile each live in one CSV file that
//! is re-read in full on every query and rewritten in full on every mutation.
//! Reads used for display degrade to an empty table on failure; reads that
//! feed a rewrite fail hard so a broken file is never overwritten.

use crate::ai::{self, Completion};
use crate::config::Config;
use crate::error::{LedgerError, Notice, NoticeKind, Outcome};
use crate::models::{INCOME_CATEGORY, Period, Transaction, TransactionType, UserProfile};
use crate::records::{self, Coerced, RawRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown format: {} (use csv|json)", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub rows: usize,
    pub renumbered: bool,
    pub coerced_rows: usize,
    pub rewritten: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProfileRow {
    setting: String,
    #[serde(default)]
    value: String,
}

pub struct LedgerStore {
    config: Config,
    ai: Box<dyn Completion>,
}

impl LedgerStore {
    /// Build the store from `config`, creating missing files and running
    /// [`LedgerStore::repair`]. Never fails; problems come back as notices.
    pub fn open(config: Config) -> Outcome<Self> {
        let ai = ai::service_from_config(&config.ai);
        Self::with_service(config, ai)
    }

    /// Like [`LedgerStore::open`] but with an explicit completion service.
    pub fn with_service(config: Config, ai: Box<dyn Completion>) -> Outcome<Self> {
        let store = LedgerStore { config, ai };
        let mut notices = store.ensure_files(crate::utils::today());
        notices.extend(store.repair().notices);
        Outcome::with_notices(store, notices)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &dyn Completion {
        self.ai.as_ref()
    }

    fn ensure_files(&self, today: NaiveDate) -> Vec<Notice> {
        let mut notices = Vec::new();
        if !self.config.transactions_path().exists() {
            if let Err(e) = self.write_table(&[]) {
                notices.push(Notice::new(
                    NoticeKind::StorageFallback,
                    format!("could not create transactions file: {}", e),
                ));
            }
        }
        if !self.config.profile_path().exists() {
            if let Err(e) = self.save_profile(&UserProfile::defaults(today)) {
                notices.push(Notice::new(
                    NoticeKind::StorageFallback,
                    format!("could not create profile file: {}", e),
                ));
            }
        }
        notices
    }

    fn read_rows(&self) -> Result<Vec<RawRecord>, LedgerError> {
        let path = self.config.transactions_path();
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut rdr = csv_reader(BufReader::new(file))?;
        let mut out = Vec::new();
        for rec in rdr.deserialize() {
            out.push(rec?);
        }
        Ok(out)
    }

    /// Strict read used before a rewrite.
    fn read_table(&self, today: NaiveDate) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self
            .read_rows()?
            .iter()
            .map(|r| records::coerce(r, today).tx)
            .collect())
    }

    fn write_table(&self, rows: &[Transaction]) -> Result<(), LedgerError> {
        fs::create_dir_all(&self.config.data_dir)?;
        let file = File::create(self.config.transactions_path())?;
        let mut wtr = csv::Writer::from_writer(BufWriter::new(file));
        write_csv_rows(&mut wtr, rows)?;
        log::debug!(
            "rewrote {} with {} rows",
            self.config.transactions_path().display(),
            rows.len()
        );
        Ok(())
    }

    pub fn load(&self, period: Period) -> Outcome<Vec<Transaction>> {
        self.load_as_of(period, crate::utils::today())
    }

    /// Load the full table restricted to `period` relative to `today`.
    /// An unreadable file yields an empty table and a notice.
    pub fn load_as_of(&self, period: Period, today: NaiveDate) -> Outcome<Vec<Transaction>> {
        match self.read_table(today) {
            Ok(rows) => Outcome::clean(
                rows.into_iter()
                    .filter(|t| period.contains(t.date, today))
                    .collect(),
            ),
            Err(e) => Outcome::with_notices(
                Vec::new(),
                vec![Notice::new(
                    NoticeKind::StorageFallback,
                    format!("Error loading data: {}", e),
                )],
            ),
        }
    }

    pub fn get(&self, id: i64) -> Outcome<Option<Transaction>> {
        self.load(Period::All)
            .map(|rows| rows.into_iter().find(|t| t.id == id))
    }

    /// Append one transaction and rewrite the file. Returns the whole table.
    pub fn append(
        &self,
        kind: TransactionType,
        amount: Decimal,
        description: &str,
        category: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Outcome<Vec<Transaction>>, LedgerError> {
        if amount.is_sign_negative() {
            return Err(LedgerError::InvalidAmount(amount.to_string()));
        }
        let today = crate::utils::today();
        let mut rows = self.read_table(today)?;
        let id = rows
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(LedgerError::IdsExhausted)?;

        let given = category.map(str::trim).filter(|c| !c.is_empty());
        let mut notices = Vec::new();
        let category = match (kind, given) {
            (TransactionType::Income, _) => INCOME_CATEGORY.to_string(),
            (_, Some(c)) => c.to_string(),
            (TransactionType::Expense, None) => {
                let (c, notice) = ai::categorize_expense(self.ai.as_ref(), description);
                notices.extend(notice);
                c.to_string()
            }
            (TransactionType::Savings, None) => "Other".to_string(),
        };

        rows.push(Transaction {
            id,
            r#type: kind,
            amount,
            description: description.trim().to_string(),
            category,
            date: date.unwrap_or(today),
        });
        rows.sort_by_key(|t| t.id);
        self.write_table(&rows)?;
        log::info!("added transaction {} ({})", id, kind);
        Ok(Outcome::with_notices(rows, notices))
    }

    /// Remove the row(s) carrying `id`. Remaining ids are left untouched.
    pub fn delete(&self, id: i64) -> Result<Vec<Transaction>, LedgerError> {
        let mut rows = self.read_table(crate::utils::today())?;
        if rows.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        if !rows.iter().any(|t| t.id == id) {
            return Err(LedgerError::NotFound(id));
        }
        rows.retain(|t| t.id != id);
        self.write_table(&rows)?;
        log::info!("deleted transaction {}", id);
        Ok(rows)
    }

    pub fn repair(&self) -> Outcome<RepairReport> {
        self.repair_as_of(crate::utils::today())
    }

    /// Validate the stored table and fix it in place.
    ///
    /// Duplicate or unusable ids cause the WHOLE table to be renumbered from 1
    /// in file order; the previous id-to-row association is not kept.
    /// Malformed fields are coerced. The file is rewritten only if something
    /// changed, so running this on a valid table is a no-op.
    pub fn repair_as_of(&self, today: NaiveDate) -> Outcome<RepairReport> {
        let raws = match self.read_rows() {
            Ok(r) => r,
            Err(e) => {
                return Outcome::with_notices(
                    RepairReport::default(),
                    vec![Notice::new(
                        NoticeKind::StorageFallback,
                        format!("Data integrity check warning: {}", e),
                    )],
                );
            }
        };
        let coerced: Vec<Coerced> = raws.iter().map(|r| records::coerce(r, today)).collect();

        let mut seen = HashSet::new();
        let ids_broken = coerced
            .iter()
            .any(|c| !c.id_valid || !seen.insert(c.tx.id));
        let coerced_rows = coerced.iter().filter(|c| !c.repairs.is_empty()).count();
        for (i, c) in coerced.iter().enumerate() {
            for r in &c.repairs {
                log::debug!("row {}: {}", i + 1, r);
            }
        }

        let mut rows: Vec<Transaction> = coerced.into_iter().map(|c| c.tx).collect();
        let mut notices = Vec::new();
        if ids_broken {
            renumber(&mut rows);
            notices.push(Notice::new(
                NoticeKind::IntegrityRepair,
                format!("duplicate or invalid ids found, renumbered {} rows from 1", rows.len()),
            ));
        }
        if coerced_rows > 0 {
            notices.push(Notice::new(
                NoticeKind::IntegrityRepair,
                format!("coerced malformed fields in {} rows", coerced_rows),
            ));
        }

        let mut report = RepairReport {
            rows: rows.len(),
            renumbered: ids_broken,
            coerced_rows,
            rewritten: false,
        };
        if ids_broken || coerced_rows > 0 {
            match self.write_table(&rows) {
                Ok(()) => report.rewritten = true,
                Err(e) => notices.push(Notice::new(
                    NoticeKind::StorageFallback,
                    format!("could not rewrite repaired table: {}", e),
                )),
            }
        }
        Outcome::with_notices(report, notices)
    }

    /// Replace the ledger with a CSV table. Supplied ids are discarded.
    pub fn import_csv<R: Read>(&self, reader: R) -> Result<Outcome<Vec<Transaction>>, LedgerError> {
        let mut rdr = csv_reader(reader)?;
        let missing = records::missing_columns(rdr.headers()?.iter());
        if !missing.is_empty() {
            return Err(LedgerError::MissingColumns(missing));
        }
        let mut raws = Vec::new();
        for rec in rdr.deserialize::<RawRecord>() {
            raws.push(rec?);
        }
        self.replace_with(raws)
    }

    /// Replace the ledger with a JSON array of row objects. An empty array
    /// empties the ledger.
    pub fn import_json<R: Read>(&self, reader: R) -> Result<Outcome<Vec<Transaction>>, LedgerError> {
        let items: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
        let items: Vec<Map<String, Value>> = items
            .into_iter()
            .map(|obj| {
                obj.into_iter()
                    .map(|(k, v)| (k.trim().to_lowercase(), v))
                    .collect()
            })
            .collect();
        let mut keys: Vec<&str> = Vec::new();
        for obj in &items {
            for k in obj.keys() {
                if !keys.contains(&k.as_str()) {
                    keys.push(k);
                }
            }
        }
        // `[]` carries no keys; treat it like a header-only CSV
        let missing = if items.is_empty() {
            Vec::new()
        } else {
            records::missing_columns(keys)
        };
        if !missing.is_empty() {
            return Err(LedgerError::MissingColumns(missing));
        }
        self.replace_with(items.iter().map(RawRecord::from_json).collect())
    }

    pub fn import_path(&self, path: &Path) -> Result<Outcome<Vec<Transaction>>, LedgerError> {
        let file = BufReader::new(File::open(path)?);
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            self.import_json(file)
        } else {
            self.import_csv(file)
        }
    }

    fn replace_with(&self, raws: Vec<RawRecord>) -> Result<Outcome<Vec<Transaction>>, LedgerError> {
        let today = crate::utils::today();
        let mut notices = Vec::new();
        let mut rows = Vec::with_capacity(raws.len());
        for (i, raw) in raws.iter().enumerate() {
            let c = records::coerce(raw, today);
            if !c.repairs.is_empty() {
                notices.push(Notice::new(
                    NoticeKind::IntegrityRepair,
                    format!("import row {}: {}", i + 1, c.repairs.join("; ")),
                ));
            }
            rows.push(c.tx);
        }
        renumber(&mut rows);
        self.write_table(&rows)?;
        log::info!("imported {} transactions", rows.len());
        Ok(Outcome::with_notices(rows, notices))
    }

    /// Write the (optionally period-filtered) table to `out`. Returns the row count.
    pub fn export<W: Write>(
        &self,
        period: Period,
        format: ExportFormat,
        out: W,
    ) -> Result<Outcome<usize>, LedgerError> {
        let Outcome { value: rows, notices } = self.load(period);
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(out);
                write_csv_rows(&mut wtr, &rows)?;
            }
            ExportFormat::Json => {
                let mut out = out;
                serde_json::to_writer_pretty(&mut out, &rows)?;
                out.flush()?;
            }
        }
        Ok(Outcome::with_notices(rows.len(), notices))
    }

    pub fn load_profile(&self) -> Outcome<UserProfile> {
        let today = crate::utils::today();
        let path = self.config.profile_path();
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Outcome::clean(UserProfile::defaults(today));
            }
            Err(e) => return profile_fallback(e.into(), today),
        };
        let mut rdr = match csv_reader(BufReader::new(file)) {
            Ok(r) => r,
            Err(e) => return profile_fallback(e, today),
        };
        let mut pairs = Vec::new();
        for rec in rdr.deserialize::<ProfileRow>() {
            match rec {
                Ok(row) => pairs.push((row.setting, row.value)),
                Err(e) => return profile_fallback(e.into(), today),
            }
        }
        Outcome::clean(pairs.into_iter().collect())
    }

    /// Replace the profile file with exactly `profile`; keys not present are dropped.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), LedgerError> {
        fs::create_dir_all(&self.config.data_dir)?;
        let file = File::create(self.config.profile_path())?;
        let mut wtr = csv::Writer::from_writer(BufWriter::new(file));
        wtr.write_record(["setting", "value"])?;
        for (k, v) in profile.iter() {
            wtr.write_record([k, v])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn is_first_time_user(&self) -> bool {
        !self.load_profile().value.setup_completed()
    }
}

fn profile_fallback(e: LedgerError, today: NaiveDate) -> Outcome<UserProfile> {
    Outcome::with_notices(
        UserProfile::defaults(today),
        vec![Notice::new(
            NoticeKind::StorageFallback,
            format!("Error loading user profile: {}", e),
        )],
    )
}

fn renumber(rows: &mut [Transaction]) {
    for (i, t) in rows.iter_mut().enumerate() {
        t.id = i as i64 + 1;
    }
}

fn csv_reader<R: Read>(reader: R) -> Result<csv::Reader<R>, LedgerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: csv::StringRecord = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect();
    rdr.set_headers(headers);
    Ok(rdr)
}

fn write_csv_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Transaction]) -> Result<(), LedgerError> {
    wtr.write_record(records::COLUMNS)?;
    for t in rows {
        wtr.write_record(records::to_record(t))?;
    }
    wtr.flush()?;
    Ok(())
}
