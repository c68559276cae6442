//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default CSV file used by the shell and the file-based commands
pub const DEFAULT_CSV_PATH: &str = "inventory.csv";

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".invtrack.yaml";

/// invtrack configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV file used for save/load
    pub csv_path: Option<PathBuf>,

    /// Default output format for listings
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(Self::global_config_path().as_deref(), &cwd)
    }

    /// Load configuration using an explicit global config path and working
    /// directory
    pub fn load_from(global_path: Option<&Path>, cwd: &Path) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/invtrack/config.yaml)
        if let Some(global) = global_path.and_then(Self::read_file) {
            config.merge(global);
        }

        // 3. Local config (./.invtrack.yaml)
        if let Some(local) = Self::read_file(&cwd.join(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(path) = std::env::var("INVTRACK_CSV_PATH") {
            if !path.trim().is_empty() {
                config.csv_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(format) = std::env::var("INVTRACK_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "invtrack")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.csv_path.is_some() {
            self.csv_path = other.csv_path;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// CSV path to use, falling back to `inventory.csv`
    pub fn csv_path(&self) -> PathBuf {
        self.csv_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_files() {
        let tmp = tempdir().unwrap();
        let config = Config::load_from(None, tmp.path());
        if std::env::var("INVTRACK_CSV_PATH").is_err() {
            assert_eq!(config.csv_path(), PathBuf::from(DEFAULT_CSV_PATH));
        }
    }

    #[test]
    fn test_local_overrides_global() {
        let tmp = tempdir().unwrap();
        let global = tmp.path().join("global.yaml");
        std::fs::write(&global, "csv_path: global.csv\ndefault_format: json\n").unwrap();
        std::fs::write(tmp.path().join(LOCAL_CONFIG_FILE), "csv_path: local.csv\n").unwrap();

        let config = Config::load_from(Some(&global), tmp.path());
        if std::env::var("INVTRACK_CSV_PATH").is_err() {
            assert_eq!(config.csv_path(), PathBuf::from("local.csv"));
        }
        if std::env::var("INVTRACK_FORMAT").is_err() {
            assert_eq!(config.default_format.as_deref(), Some("json"));
        }
    }

    #[test]
    fn test_invalid_config_is_ignored() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join(LOCAL_CONFIG_FILE), "csv_path: [unclosed\n").unwrap();
        let config = Config::load_from(None, tmp.path());
        if std::env::var("INVTRACK_CSV_PATH").is_err() {
            assert_eq!(config.csv_path(), PathBuf::from(DEFAULT_CSV_PATH));
        }
    }
}
