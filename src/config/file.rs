//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/sysprobe/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by the environment and by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > environment > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! path = "~/Downloads"
//!
//! [scanning]
//! verbose = true
//! max_depth = 10
//!
//! [report]
//! categories_only = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration.
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default directory whose files are categorised
    pub path: Option<PathBuf>,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,

    /// Report options
    #[serde(default)]
    pub report: FileReportConfig,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileScanConfig {
    /// Whether to list skipped files after the scan
    pub verbose: Option<bool>,

    /// Maximum directory depth to walk
    pub max_depth: Option<usize>,
}

/// Report options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileReportConfig {
    /// Only print the file categories, omitting the host sections
    pub categories_only: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use sysprobe::config::file::expand_tilde;
/// let absolute = PathBuf::from("/absolute/path");
/// assert_eq!(expand_tilde(&absolute), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/sysprobe/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    ///
    /// Returns `None` if the config directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sysprobe").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read, or if it
    /// contains invalid TOML.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.path.is_none());
        assert!(config.scanning.verbose.is_none());
        assert!(config.scanning.max_depth.is_none());
        assert!(config.report.categories_only.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
path = "~/Downloads"

[scanning]
verbose = true
max_depth = 4

[report]
categories_only = true
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.path, Some(PathBuf::from("~/Downloads")));
        assert_eq!(config.scanning.verbose, Some(true));
        assert_eq!(config.scanning.max_depth, Some(4));
        assert_eq!(config.report.categories_only, Some(true));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r"
[scanning]
verbose = true
";

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert!(config.path.is_none());
        assert_eq!(config.scanning.verbose, Some(true));
        assert!(config.scanning.max_depth.is_none());
        assert!(config.report.categories_only.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(config.path.is_none());
        assert!(config.scanning.verbose.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let toml_content = r#"
[scanning]
max_depth = "deep"
"#;
        let result = toml::from_str::<FileConfig>(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = FileConfig::load_from(&tmp.path().join("config.toml")).unwrap();

        assert!(config.path.is_none());
    }

    #[test]
    fn test_load_from_reads_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("config.toml");
        std::fs::write(&file, "path = \"/srv/data\"\n").unwrap();

        let config = FileConfig::load_from(&file).unwrap();
        assert_eq!(config.path, Some(PathBuf::from("/srv/data")));
    }

    #[test]
    fn test_load_from_malformed_file_errors() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("config.toml");
        std::fs::write(&file, "[scanning\nverbose = ").unwrap();

        let err = FileConfig::load_from(&file).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with(Path::new("sysprobe").join("config.toml")));
        }
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let expanded = expand_tilde(Path::new("~/Downloads"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Downloads"));
        }
    }

    #[test]
    fn test_expand_tilde_bare() {
        let expanded = expand_tilde(Path::new("~"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home);
        }
    }

    #[test]
    fn test_expand_tilde_no_effect_on_non_tilde() {
        let relative = PathBuf::from("some/relative/path");
        assert_eq!(expand_tilde(&relative), relative);

        let absolute = PathBuf::from("/usr/local/share");
        assert_eq!(expand_tilde(&absolute), absolute);
    }
}
