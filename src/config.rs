//! Report Configuration Module
//! Resolves input file locations and report sizing from an optional JSON file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "covid_dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Input files and report sizing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub full_csv: String,
    pub icu_csv: String,
    pub testing_csv: String,
    pub vaccination_csv: String,
    pub preview_rows: usize,
    pub top_n: usize,
    /// Rows scanned to infer column types; `None` scans the whole file.
    pub infer_schema_rows: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            full_csv: "covid_daily_full.csv".to_string(),
            icu_csv: "covid_daily_hospital_icu.csv".to_string(),
            testing_csv: "covid_daily_testing.csv".to_string(),
            vaccination_csv: "covid_daily_vaccinations.csv".to_string(),
            preview_rows: 5,
            top_n: 10,
            infer_schema_rows: None,
        }
    }
}

impl ReportConfig {
    /// Load config from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn full_path(&self) -> PathBuf {
        self.data_dir.join(&self.full_csv)
    }

    pub fn icu_path(&self) -> PathBuf {
        self.data_dir.join(&self.icu_csv)
    }

    pub fn testing_path(&self) -> PathBuf {
        self.data_dir.join(&self.testing_csv)
    }

    pub fn vaccination_path(&self) -> PathBuf {
        self.data_dir.join(&self.vaccination_csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.full_path(), PathBuf::from("./covid_daily_full.csv"));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_dir": "data", "top_n": 5 }"#).unwrap();

        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.infer_schema_rows, None);
        assert_eq!(config.icu_path(), PathBuf::from("data/covid_daily_hospital_icu.csv"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ top_n: ").unwrap();

        assert!(matches!(
            ReportConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
