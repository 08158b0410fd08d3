//! # Configuration
//!
//! Blocknote configuration is a [`confique`] struct, loaded in layers.
//!
//! ## Resolution Order
//!
//! Highest priority first:
//! 1. **Programmatic overrides**: e.g. the CLI's `--api-base` flag.
//! 2. **Environment variables**: `BLOCKNOTE_API_BASE`, `BLOCKNOTE_SAVE_DEBOUNCE_MS`,
//!    `BLOCKNOTE_REQUEST_TIMEOUT_SECS`.
//! 3. **Config file**: `blocknote.toml` in the OS config directory (via `directories`),
//!    or an explicit path.
//! 4. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_base` | `http://localhost:8000` | Base URL of the notes service |
//! | `save_debounce_ms` | `400` | Quiet period before an edited block is saved |
//! | `request_timeout_secs` | `15` | Per-request HTTP timeout |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BlocknoteError, Result};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const CONFIG_FILE_NAME: &str = "blocknote.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlocknoteConfig {
    /// Base URL of the notes service.
    #[config(env = "BLOCKNOTE_API_BASE", default = "http://localhost:8000")]
    pub api_base: String,

    /// Quiet period, in milliseconds, before an edited block is saved.
    #[config(env = "BLOCKNOTE_SAVE_DEBOUNCE_MS", default = 400)]
    pub save_debounce_ms: u64,

    /// Per-request HTTP timeout, in seconds.
    #[config(env = "BLOCKNOTE_REQUEST_TIMEOUT_SECS", default = 15)]
    pub request_timeout_secs: u64,
}

impl Default for BlocknoteConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            save_debounce_ms: 400,
            request_timeout_secs: 15,
        }
    }
}

impl BlocknoteConfig {
    /// Loads env and file layers over the defaults.
    ///
    /// With `file` set, only that file is read; otherwise the OS config directory
    /// is used when it exists. A missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file.map(Path::to_path_buf).or_else(default_config_path) {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| BlocknoteError::Config(e.to_string()))
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// `blocknote.toml` inside the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "blocknote").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BlocknoteConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.save_debounce(), Duration::from_millis(400));
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "save_debounce_ms = 50").unwrap();

        let config = BlocknoteConfig::load(Some(&path)).unwrap();
        assert_eq!(config.save_debounce_ms, 50);
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BlocknoteConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.save_debounce_ms, 400);
    }

    #[test]
    fn test_with_api_base() {
        let config = BlocknoteConfig::default().with_api_base("http://example.test");
        assert_eq!(config.api_base, "http://example.test");
    }
}
