//! Configuration for yamlpatch.
//!
//! Settings live in `~/.config/yamlpatch/config.toml`. Every field is
//! optional in the file and falls back to its default.
//!
//! # Example
//!
//! ```
//! use yamlpatch::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.log_level, "warn");
//! assert!(config.trailing_newline);
//!
//! let custom = Config {
//!     create_backup: true,
//!     ..Config::default()
//! };
//! assert!(custom.create_backup);
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the yamlpatch binary.
///
/// # Fields
///
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "warn")
/// * `create_backup` - Create .bak files before in-place saves (default: false)
/// * `default_ops_files` - Ops files applied before the ones given on the command line (default: none)
/// * `trailing_newline` - End emitted YAML with a newline (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Create .bak files before in-place saves
    #[serde(default)]
    pub create_backup: bool,

    /// Ops files applied before the ones given on the command line
    #[serde(default)]
    pub default_ops_files: Vec<PathBuf>,

    /// End emitted YAML with a newline
    #[serde(default = "default_trailing_newline")]
    pub trailing_newline: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_trailing_newline() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            create_backup: false,
            default_ops_files: Vec::new(),
            trailing_newline: default_trailing_newline(),
        }
    }
}

impl Config {
    /// `~/.config/yamlpatch/config.toml`, or `None` without a home directory.
    pub fn config_path() -> Option<PathBuf> {
        Some(dirs::home_dir()?.join(".config").join("yamlpatch").join("config.toml"))
    }

    /// Reads the default config file, falling back to defaults when it is
    /// absent or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.is_file())
            .and_then(|path| Self::load_from(path).ok())
            .unwrap_or_default()
    }

    /// Loads configuration from `path`, failing on a missing or invalid file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Writes this configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(path),
            None => anyhow::bail!("No home directory to store the config file in"),
        }
    }

    /// Writes this configuration to `path` as TOML, creating parent
    /// directories as needed.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let target = path.as_ref();
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create '{}'", dir.display()))?;
        }
        let text = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(target, text)
            .with_context(|| format!("Failed to write config file '{}'", target.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("create_backup = true\n").unwrap();
        assert!(config.create_backup);
        assert_eq!(config.log_level, "warn");
        assert!(config.trailing_newline);
    }
}
