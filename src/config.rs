//! Engine configuration.
//!
//! This module provides the [`EngineConfig`] type for loading engine
//! settings from a YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Engine settings supplied by the hosting application.
///
/// Every field has a built-in default, so a partial (or absent) file only
/// overrides what it names.
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::EngineConfig;
///
/// let config = EngineConfig::load("./config/timesheet.yaml").unwrap();
/// assert!(config.default_shift_hours > 0.0);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hours assumed for a worked mark that carries no explicit hour count.
    pub default_shift_hours: f64,
    /// Location of the SQLite database file.
    pub database_path: PathBuf,
    /// Warehouse label applied when an employee form leaves it blank.
    pub default_warehouse: String,
    /// Shift label applied when an employee form leaves it blank.
    pub default_shift_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_shift_hours: 8.0,
            database_path: PathBuf::from("timesheet.db"),
            default_warehouse: "Main warehouse".to_string(),
            default_shift_name: "Day".to_string(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file cannot be read,
    /// [`EngineError::ConfigParse`] if it is not valid YAML, or
    /// [`EngineError::InvalidConfig`] if a value is out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
                path: path_str,
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.default_shift_hours.is_finite() || self.default_shift_hours <= 0.0 {
            return Err(EngineError::InvalidConfig {
                field: "default_shift_hours".to_string(),
                message: "must be a positive number".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the trimmed warehouse label, or the configured default when
    /// blank.
    pub fn warehouse_label(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.default_warehouse.clone()
        } else {
            trimmed.to_string()
        }
    }

    /// Returns the trimmed shift label, or the configured default when
    /// blank.
    pub fn shift_label(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.default_shift_name.clone()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_shift_hours, 8.0);
        assert_eq!(config.database_path, PathBuf::from("timesheet.db"));
        assert_eq!(config.default_warehouse, "Main warehouse");
        assert_eq!(config.default_shift_name, "Day");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_overrides_named_fields_only() {
        let path = write_temp_config(
            "timesheet_engine_config_partial.yaml",
            "default_shift_hours: 12\ndefault_shift_name: Night\n",
        );
        let config = EngineConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.default_shift_hours, 12.0);
        assert_eq!(config.default_shift_name, "Night");
        // Unnamed fields keep their defaults.
        assert_eq!(config.default_warehouse, "Main warehouse");
    }

    #[test]
    fn test_load_missing_file_is_config_not_found() {
        let result = EngineConfig::load("/definitely/not/there.yaml");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_yaml_is_parse_error() {
        let path = write_temp_config(
            "timesheet_engine_config_bad.yaml",
            "default_shift_hours: [not a number\n",
        );
        let result = EngineConfig::load(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(EngineError::ConfigParse { .. })));
    }

    #[test]
    fn test_load_rejects_non_positive_hours() {
        let path = write_temp_config(
            "timesheet_engine_config_zero_hours.yaml",
            "default_shift_hours: 0\n",
        );
        let result = EngineConfig::load(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { field, .. }) if field == "default_shift_hours"
        ));
    }

    #[test]
    fn test_labels_fall_back_to_defaults_when_blank() {
        let config = EngineConfig::default();
        assert_eq!(config.warehouse_label("  "), "Main warehouse");
        assert_eq!(config.warehouse_label(" North "), "North");
        assert_eq!(config.shift_label(""), "Day");
        assert_eq!(config.shift_label("Night"), "Night");
    }
}
