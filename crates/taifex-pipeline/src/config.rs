//! Pipeline configuration.

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use taifex_types::SymbolSet;
use thiserror::Error;

/// Errors that can occur while loading or applying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config '{path}': {source}")]
    ReadFile {
        /// The configuration path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config '{path}': {source}")]
    ParseJson {
        /// The configuration path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The symbol allow-list is empty.
    #[error("At least one symbol must be configured")]
    NoSymbols,

    /// Failed to create a store directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Directories and filters for one pipeline run.
///
/// Every field has a default, so a configuration file only needs to name
/// what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where the browser drops downloaded archives.
    pub download_dir: PathBuf,
    /// Archive store.
    pub zip_dir: PathBuf,
    /// Extracted report store.
    pub csv_dir: PathBuf,
    /// K-line output directory.
    pub kline_dir: PathBuf,
    /// Symbols that are aggregated.
    pub symbols: SymbolSet,
    /// File name prefix of report archives.
    pub archive_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let mut config = Self::with_base_dir(&Self::default_base_dir());
        if let Some(downloads) = UserDirs::new().and_then(|u| u.download_dir().map(Path::to_path_buf)) {
            config.download_dir = downloads;
        }
        config
    }
}

impl PipelineConfig {
    /// Returns a configuration with every directory under `base`.
    #[must_use]
    pub fn with_base_dir(base: &Path) -> Self {
        Self {
            download_dir: base.join("downloads"),
            zip_dir: base.join("tmpzip"),
            csv_dir: base.join("tmpcsv"),
            kline_dir: base.join("klines"),
            symbols: SymbolSet::default(),
            archive_prefix: "Daily_".to_string(),
        }
    }

    /// Returns the default base directory for stores.
    ///
    /// Uses the platform data directory (e.g. `~/.local/share/taifex-kline/`
    /// on Linux), falling back to `./.taifex-kline/`.
    #[must_use]
    pub fn default_base_dir() -> PathBuf {
        ProjectDirs::from("", "", "taifex-kline").map_or_else(
            || PathBuf::from(".taifex-kline"),
            |proj_dirs| proj_dirs.data_dir().to_path_buf(),
        )
    }

    /// Loads a JSON configuration file, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Checks the configuration for values no run can work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSymbols`] if the allow-list is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        Ok(())
    }
}
