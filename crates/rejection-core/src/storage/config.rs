//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - How strictly required draft fields are checked
//! - How upload dates are rendered
//! - Which categories the upload form suggests
//!
//! Configuration is stored at `~/.config/rejection-therapy/config.toml`.
//! Only preferences live here; challenge and rejection records are never
//! written to disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::draft::ValidationPolicy;
use crate::error::ConfigError;
use crate::rejection::{check_date_format, DEFAULT_DATE_FORMAT};

/// Draft validation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Treat whitespace-only title/description/category as empty.
    #[serde(default = "default_true")]
    pub trim_whitespace: bool,
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// chrono format string for upload dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub json_output: bool,
}

/// Categories offered by the upload form. Category is still free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoriesConfig {
    #[serde(default = "default_categories")]
    pub suggested: Vec<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/rejection-therapy/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub categories: CategoriesConfig,
}

fn default_true() -> bool {
    true
}
fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.into()
}
fn default_categories() -> Vec<String> {
    ["Work", "Personal", "Social", "Business", "Education", "Other"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            json_output: false,
        }
    }
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            suggested: default_categories(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Array(_) => serde_json::Value::Array(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(|s| serde_json::Value::String(s.to_string()))
                            .collect(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default on-disk location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.check()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::debug!(path = %path.display(), "wrote default config");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, typed by the existing value.
    ///
    /// List values are given comma-separated. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let next: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        next.check()?;
        *self = next;
        Ok(())
    }

    /// Reject values that deserialize but cannot be used.
    fn check(&self) -> Result<(), ConfigError> {
        check_date_format(&self.display.date_format).map_err(|message| ConfigError::InvalidValue {
            key: "display.date_format".into(),
            message,
        })
    }

    /// Validation policy selected by `validation.trim_whitespace`.
    pub fn validation_policy(&self) -> ValidationPolicy {
        if self.validation.trim_whitespace {
            ValidationPolicy::Trimmed
        } else {
            ValidationPolicy::Exact
        }
    }
}
