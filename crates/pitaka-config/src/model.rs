use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const VIEW_MODES: [&str; 5] = ["daily", "weekly", "biweekly", "monthly", "yearly"];

/// Platform data directory for Pitaka: `<data dir>/pitaka`, falling back to the home directory.
pub fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pitaka")
}

/// User preferences for the shell and the engine defaults it passes down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_profile_name")]
    pub profile_name: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// Granularity used by `trend` when none is given.
    #[serde(default = "Config::default_view_value")]
    pub default_view: String,
    #[serde(default = "Config::default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root for data documents. Defaults to the shell's base directory.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_name: Self::default_profile_name(),
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            default_view: Self::default_view_value(),
            autosave_delay_ms: Self::default_autosave_delay_ms(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 7] = [
        "profile_name",
        "locale",
        "currency",
        "default_view",
        "autosave_delay_ms",
        "ui_color_enabled",
        "data_root",
    ];

    pub fn default_profile_name() -> String {
        "default".into()
    }

    pub fn default_locale() -> String {
        "en-PH".into()
    }

    pub fn default_currency() -> String {
        "PHP".into()
    }

    pub fn default_view_value() -> String {
        "weekly".into()
    }

    pub fn default_autosave_delay_ms() -> u64 {
        1500
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        self.data_root
            .clone()
            .unwrap_or_else(|| base.to_path_buf())
    }

    /// Current value of a setting as displayed by the shell.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "profile_name" => self.profile_name.clone(),
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "default_view" => self.default_view.clone(),
            "autosave_delay_ms" => self.autosave_delay_ms.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "data_root" => self
                .data_root
                .as_ref()
                .map_or_else(|| "(base directory)".to_string(), |path| path.display().to_string()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };
        match key {
            "profile_name" => {
                if value.is_empty() {
                    return Err(invalid("profile name cannot be empty"));
                }
                self.profile_name = value.to_string();
            }
            "locale" => self.locale = value.to_string(),
            "currency" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(invalid("expected a three-letter currency code"));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "default_view" => {
                let normalized = value.to_ascii_lowercase().replace('-', "");
                if !VIEW_MODES.contains(&normalized.as_str()) {
                    return Err(invalid("expected daily, weekly, biweekly, monthly or yearly"));
                }
                self.default_view = normalized;
            }
            "autosave_delay_ms" => {
                self.autosave_delay_ms = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number of milliseconds"))?;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid("expected true or false")),
                };
            }
            "data_root" => {
                self.data_root = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}
