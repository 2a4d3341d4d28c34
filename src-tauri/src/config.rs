//! Application Configuration
//!
//! Loaded from `ops_hub.config.json` in the app config directory. Every
//! field has a default, so a partial file is fine and a missing or broken
//! one falls back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "ops_hub.config.json";
pub const DB_PATH_ENV: &str = "OPS_HUB_DB_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file name inside the app data directory
    pub database_file: String,
    /// Log file prefix
    pub log_app_name: String,
    /// Max rows returned by one list call
    pub page_size: u32,
    pub max_log_files: usize,
    pub max_log_file_bytes: u64,
    /// Absolute database path from the environment; wins over `database_file`
    #[serde(skip)]
    pub database_override: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_file: "ops_hub.db".to_string(),
            log_app_name: "OpsHub".to_string(),
            page_size: 100,
            max_log_files: 5,
            max_log_file_bytes: 1024 * 1024,
            database_override: None,
        }
    }
}

impl AppConfig {
    /// Load config from `config_dir`, then apply environment overrides.
    /// A file that cannot be used yields the defaults plus a warning to log
    /// once logging is up.
    pub fn load(config_dir: &Path) -> (Self, Option<String>) {
        let (mut config, warning) = match Self::load_from_file(&config_dir.join(CONFIG_FILE_NAME)) {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(warning) => (Self::default(), Some(warning)),
        };
        config.apply_db_override(std::env::var(DB_PATH_ENV).ok());
        (config, warning)
    }

    /// Load config from file only (no env overrides); `Ok(None)` if absent
    pub fn load_from_file(path: &Path) -> Result<Option<Self>, String> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        serde_json::from_str::<Self>(&content)
            .map(|config| Some(config.sanitized()))
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }

    fn apply_db_override(&mut self, value: Option<String>) {
        self.database_override = value.filter(|v| !v.trim().is_empty()).map(PathBuf::from);
    }

    /// Zero limits would disable listing and logging entirely
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.page_size == 0 {
            self.page_size = defaults.page_size;
        }
        if self.max_log_file_bytes == 0 {
            self.max_log_file_bytes = defaults.max_log_file_bytes;
        }
        if self.database_file.trim().is_empty() {
            self.database_file = defaults.database_file;
        }
        self
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        match &self.database_override {
            Some(path) => path.clone(),
            None => data_dir.join(&self.database_file),
        }
    }

    pub fn logger_config(&self) -> rolling_logger::LoggerConfig {
        rolling_logger::LoggerConfig {
            max_file_bytes: self.max_log_file_bytes,
            max_files: self.max_log_files,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load_from_file(&dir.path().join(CONFIG_FILE_NAME)), Ok(None));
        let (config, warning) = AppConfig::load(dir.path());
        assert!(warning.is_none());
        assert_eq!(config.page_size, 100);
        assert_eq!(config.log_app_name, "OpsHub");
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ page_size: ").unwrap();
        assert!(AppConfig::load_from_file(&path).is_err());

        let (config, warning) = AppConfig::load(dir.path());
        assert!(warning.unwrap().contains("Failed to parse"));
        assert_eq!(config.database_file, "ops_hub.db");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"page_size": 25, "log_app_name": "Hub"}"#).unwrap();
        let config = AppConfig::load_from_file(&path).unwrap().unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_app_name, "Hub");
        assert_eq!(config.database_file, "ops_hub.db");
    }

    #[test]
    fn test_zero_page_size_is_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"page_size": 0}"#).unwrap();
        assert_eq!(AppConfig::load_from_file(&path).unwrap().unwrap().page_size, 100);
    }

    #[test]
    fn test_database_path_override() {
        let mut config = AppConfig::default();
        let data_dir = Path::new("/data");
        assert_eq!(config.database_path(data_dir), data_dir.join("ops_hub.db"));

        config.apply_db_override(Some("/tmp/other.db".to_string()));
        assert_eq!(config.database_path(data_dir), PathBuf::from("/tmp/other.db"));

        config.apply_db_override(Some("  ".to_string()));
        assert_eq!(config.database_path(data_dir), data_dir.join("ops_hub.db"));
    }

    #[test]
    fn test_logger_limits() {
        let config = AppConfig { max_log_files: 2, max_log_file_bytes: 512, ..Default::default() };
        let logger = config.logger_config();
        assert_eq!(logger.max_files, 2);
        assert_eq!(logger.max_file_bytes, 512);
    }
}
