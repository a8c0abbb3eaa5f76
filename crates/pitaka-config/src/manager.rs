use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Config, ConfigError};

const CONFIG_FILE: &str = "config.json";
const BACKUP_PREFIX: &str = "config_";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_STAMP: &str = "%Y%m%d_%H%M%S_%3f";

/// A saved copy of the preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBackup {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// Backup file body: the settings plus when and why they were copied.
#[derive(Debug, Serialize, Deserialize)]
struct BackupEnvelope {
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    config: Config,
}

/// Reads, writes and snapshots the preferences file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf, backups_dir: PathBuf) -> Self {
        Self {
            config_path,
            backups_dir,
        }
    }

    /// `<base>/config/config.json` with backups in `<base>/config/backups/`.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let root = base.join("config");
        let manager = Self::new(root.join(CONFIG_FILE), root.join("backups"));
        fs::create_dir_all(&manager.backups_dir)?;
        Ok(manager)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match fs::read_to_string(&self.config_path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        replace_file(&self.config_path, &serde_json::to_vec_pretty(config)?)
    }

    /// Snapshots `config` and returns the backup's file name.
    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String, ConfigError> {
        let created_at = Utc::now();
        let note = note.map(str::trim).filter(|text| !text.is_empty());
        let mut name = format!("{BACKUP_PREFIX}{}", created_at.format(BACKUP_STAMP));
        if let Some(slug) = note.and_then(slugify) {
            name = format!("{name}_{slug}");
        }
        name = format!("{name}.{BACKUP_EXTENSION}");

        let envelope = BackupEnvelope {
            created_at,
            note: note.map(str::to_string),
            config: config.clone(),
        };
        replace_file(
            &self.backups_dir.join(&name),
            &serde_json::to_vec_pretty(&envelope)?,
        )?;
        Ok(name)
    }

    /// Makes the named backup the current configuration.
    pub fn restore(&self, name: &str) -> Result<Config, ConfigError> {
        let path = self.backup_path(name)?;
        let raw = fs::read_to_string(&path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ConfigError::BackupNotFound(name.to_string()),
            _ => err.into(),
        })?;
        let envelope: BackupEnvelope = serde_json::from_str(&raw)?;
        self.save(&envelope.config)?;
        Ok(envelope.config)
    }

    /// Newest first. Unreadable files are skipped.
    pub fn list_backups(&self) -> Result<Vec<ConfigBackup>, ConfigError> {
        let entries = match fs::read_dir(&self.backups_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut backups = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !is_backup_name(name) {
                continue;
            }
            let Ok(envelope) = fs::read_to_string(&path)
                .map_err(ConfigError::from)
                .and_then(|raw| Ok(serde_json::from_str::<BackupEnvelope>(&raw)?))
            else {
                continue;
            };
            backups.push(ConfigBackup {
                name: name.to_string(),
                created_at: envelope.created_at,
                note: envelope.note,
            });
        }
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.name.cmp(&a.name)));
        Ok(backups)
    }

    fn backup_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        if !is_backup_name(name) || name.contains(['/', '\\']) || name.contains("..") {
            return Err(ConfigError::BackupNotFound(name.to_string()));
        }
        Ok(self.backups_dir.join(name))
    }
}

fn is_backup_name(name: &str) -> bool {
    name.starts_with(BACKUP_PREFIX) && name.ends_with(&format!(".{BACKUP_EXTENSION}"))
}

/// Lowercase words joined by dashes; `None` when nothing usable remains.
fn slugify(note: &str) -> Option<String> {
    let words: Vec<String> = note
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    (!words.is_empty()).then(|| words.join("-"))
}

/// Writes beside the target then renames over it.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let staging = path.with_extension("json.tmp");
    let mut file = File::create(&staging)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&staging, path)?;
    Ok(())
}
