use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use pitaka_core::{
    reconcile_ids, CoreError, FinanceBackend, RecordKind, SaveOutcome, SavedCounts,
};
use pitaka_domain::{FinancialData, RecordId};

pub mod rows;

pub use rows::{ExpenseRow, IncomeRow, StoreDocument};

const DOCUMENT_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Directory layout under the data root.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_root: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    pub fn under(base: &Path) -> Self {
        Self {
            data_root: base.join("data"),
            backup_root: base.join("backups"),
        }
    }
}

/// A backup of the owner's document taken before an overwrite.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// Filesystem-backed store holding one JSON document per owner.
#[derive(Debug, Clone)]
pub struct JsonFinanceStore {
    paths: StoragePaths,
    owner: String,
    retention: usize,
}

impl JsonFinanceStore {
    pub fn new(paths: StoragePaths, owner: &str) -> Result<Self, CoreError> {
        Self::with_retention(paths, owner, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        paths: StoragePaths,
        owner: &str,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.data_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            paths,
            owner: canonical_owner(owner),
            retention: retention.max(1),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn document_path(&self) -> PathBuf {
        self.paths
            .data_root
            .join(format!("{}.{}", self.owner, DOCUMENT_EXTENSION))
    }

    fn backup_dir(&self) -> PathBuf {
        self.paths.backup_root.join(&self.owner)
    }

    /// Reads the raw document; a missing file is an empty document.
    pub fn read_document(&self) -> Result<StoreDocument, CoreError> {
        let path = self.document_path();
        if !path.exists() {
            return Ok(StoreDocument::default());
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), CoreError> {
        let path = self.document_path();
        if path.exists() {
            self.backup_existing_file(&path)?;
        }
        let payload = serde_json::to_string_pretty(document)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Drops one stored row. Saves only ever upsert, so deletions go through here.
    pub fn remove(&self, kind: RecordKind, id: &RecordId) -> Result<bool, CoreError> {
        let mut document = self.read_document()?;
        let removed = match kind {
            RecordKind::Income => {
                let before = document.income_history.len();
                document.income_history.retain(|row| row.id != id.as_str());
                document.income_history.len() != before
            }
            RecordKind::Expense => {
                let before = document.expenses.len();
                document.expenses.retain(|row| row.id != id.as_str());
                document.expenses.len() != before
            }
        };
        if removed {
            self.write_document(&document)?;
            tracing::debug!(owner = %self.owner, %kind, %id, "removed stored row");
        }
        Ok(removed)
    }

    /// Backups, newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    id: file_name.to_string(),
                    created_at: parse_backup_timestamp(file_name),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(entries)
    }

    fn backup_existing_file(&self, path: &Path) -> Result<(), CoreError> {
        let dir = self.backup_dir();
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("{}_{}.{}", self.owner, timestamp, DOCUMENT_EXTENSION);
        fs::copy(path, dir.join(&file_name))?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for entry in self.list_backups()?.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&entry.path) {
                tracing::warn!(path = %entry.path.display(), error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl FinanceBackend for JsonFinanceStore {
    fn save(&self, data: &FinancialData) -> Result<SaveOutcome, CoreError> {
        let (outgoing, id_mapping) = reconcile_ids(data);
        let saved = SavedCounts {
            income: outgoing.income_history.len(),
            expenses: outgoing.expenses.len(),
        };
        if saved.total() == 0 {
            return Ok(SaveOutcome {
                saved,
                id_mapping: None,
            });
        }

        let mut document = self.read_document()?;
        if let Some(mapping) = &id_mapping {
            let retired = document.retire(mapping);
            if retired > 0 {
                tracing::debug!(
                    owner = %self.owner,
                    rows = retired,
                    "dropped rows stored under legacy ids"
                );
            }
        }
        for entry in &outgoing.income_history {
            document.upsert_income(IncomeRow::from_entry(entry, &self.owner));
        }
        for expense in &outgoing.expenses {
            document.upsert_expense(ExpenseRow::from_expense(expense, &self.owner));
        }
        self.write_document(&document)?;
        tracing::info!(
            owner = %self.owner,
            income = saved.income,
            expenses = saved.expenses,
            "saved financial data"
        );
        Ok(SaveOutcome { saved, id_mapping })
    }

    fn load(&self) -> Result<FinancialData, CoreError> {
        let document = self.read_document()?;
        let mut income_history = document
            .income_history
            .into_iter()
            .map(IncomeRow::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        let mut expenses = document
            .expenses
            .into_iter()
            .map(ExpenseRow::into_expense)
            .collect::<Result<Vec<_>, _>>()?;
        income_history.sort_by_key(|entry| Reverse(entry.date));
        expenses.sort_by_key(|expense| Reverse(expense.date));
        tracing::debug!(
            owner = %self.owner,
            income = income_history.len(),
            expenses = expenses.len(),
            "loaded financial data"
        );
        Ok(FinancialData::new(income_history, expenses))
    }
}

fn canonical_owner(owner: &str) -> String {
    let sanitized: String = owner
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "default".into()
    } else {
        sanitized
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", DOCUMENT_EXTENSION))?;
    let mut segments: Vec<&str> = stem.rsplitn(4, '_').collect();
    if segments.len() < 4 {
        return None;
    }
    segments.truncate(3);
    let (millis, time, date) = (segments[0], segments[1], segments[2]);
    if !is_digits(date, 8) || !is_digits(time, 6) || !is_digits(millis, 3) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S").ok()?;
    let millis: i64 = millis.parse().ok()?;
    Some(DateTime::from_naive_utc_and_offset(naive, Utc) + Duration::milliseconds(millis))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
