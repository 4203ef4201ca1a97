//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their
//! defaults using the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sysprobe::config::file::{FileConfig, expand_tilde};
use sysprobe::config::{ReportOptions, ScanOptions};

/// Environment variable naming the directory to analyse.
pub const PATH_ENV: &str = "ANALYZE_PATH";

/// Command-line arguments for controlling directory scanning behavior.
#[derive(Parser)]
struct ScanningArgs {
    /// List files and directories that were skipped while scanning
    ///
    /// Files that disappear or cannot be read during the walk are always left
    /// out of the totals. With this flag each one is printed to stderr.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Maximum directory depth to scan
    ///
    /// A value of 1 only counts the immediate children of the root directory.
    /// When not set, the scan is unlimited.
    #[arg(long)]
    max_depth: Option<usize>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "sysprobe")]
#[command(
    about = "Report host system information and break down disk usage under a directory by file extension"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory whose files are categorised
    ///
    /// Falls back to the `ANALYZE_PATH` environment variable, then to the
    /// `path` key of the config file, then to the current directory.
    path: Option<PathBuf>,

    /// Print the report as a single JSON object
    #[arg(long)]
    json: bool,

    /// Only report file categories, skipping the system, CPU, memory and disk sections
    #[arg(short = 'c', long)]
    categories_only: bool,

    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Resolve the directory to analyse.
    ///
    /// Priority: CLI argument > `env_path` (the `ANALYZE_PATH` value) > config
    /// file `path` > current directory (`.`). An empty environment value is
    /// ignored. Tilde expansion is applied to the config-file path.
    #[must_use]
    pub fn root(&self, config: &FileConfig, env_path: Option<PathBuf>) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }

        if let Some(path) = env_path.filter(|p| !p.as_os_str().is_empty()) {
            return path;
        }

        config
            .path
            .as_deref()
            .map_or_else(|| PathBuf::from("."), expand_tilde)
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **verbose**: CLI flag `||` config value `||` `false`
    /// - **`max_depth`**: CLI > config > unlimited
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            max_depth: self.scanning.max_depth.or(config.scanning.max_depth),
        }
    }

    /// Extract report options from CLI args and config file.
    #[must_use]
    pub fn report_options(&self, config: &FileConfig) -> ReportOptions {
        ReportOptions {
            json: self.json,
            categories_only: self.categories_only
                || config.report.categories_only.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysprobe::config::file::{FileReportConfig, FileScanConfig};

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["sysprobe"]);
        let config = FileConfig::default();

        assert!(args.subcommand.is_none());
        assert_eq!(args.root(&config, None), PathBuf::from("."));

        let scan_opts = args.scan_options(&config);
        assert!(!scan_opts.verbose);
        assert!(scan_opts.max_depth.is_none());

        let report_opts = args.report_options(&config);
        assert!(!report_opts.json);
        assert!(!report_opts.categories_only);
    }

    #[test]
    fn test_positional_path() {
        let args = Cli::parse_from(["sysprobe", "/srv/data"]);

        assert_eq!(
            args.root(&FileConfig::default(), None),
            PathBuf::from("/srv/data")
        );
    }

    #[test]
    fn test_cli_path_beats_environment() {
        let args = Cli::parse_from(["sysprobe", "/from/cli"]);
        let root = args.root(&FileConfig::default(), Some(PathBuf::from("/from/env")));

        assert_eq!(root, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_environment_beats_config() {
        let args = Cli::parse_from(["sysprobe"]);
        let config = FileConfig {
            path: Some(PathBuf::from("/from/config")),
            ..FileConfig::default()
        };

        assert_eq!(
            args.root(&config, Some(PathBuf::from("/from/env"))),
            PathBuf::from("/from/env")
        );
    }

    #[test]
    fn test_empty_environment_is_ignored() {
        let args = Cli::parse_from(["sysprobe"]);
        let config = FileConfig {
            path: Some(PathBuf::from("/from/config")),
            ..FileConfig::default()
        };

        assert_eq!(
            args.root(&config, Some(PathBuf::new())),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_config_path_with_tilde_expansion() {
        let args = Cli::parse_from(["sysprobe"]);
        let config = FileConfig {
            path: Some(PathBuf::from("~/Downloads")),
            ..FileConfig::default()
        };

        if let Some(home) = dirs::home_dir() {
            assert_eq!(args.root(&config, None), home.join("Downloads"));
        }
    }

    #[test]
    fn test_scanning_flags() {
        let args = Cli::parse_from(["sysprobe", "-v", "--max-depth", "3"]);
        let scan_opts = args.scan_options(&FileConfig::default());

        assert!(scan_opts.verbose);
        assert_eq!(scan_opts.max_depth, Some(3));
    }

    #[test]
    fn test_config_values_used_when_cli_absent() {
        let args = Cli::parse_from(["sysprobe"]);
        let config = FileConfig {
            path: None,
            scanning: FileScanConfig {
                verbose: Some(true),
                max_depth: Some(5),
            },
            report: FileReportConfig {
                categories_only: Some(true),
            },
        };

        let scan_opts = args.scan_options(&config);
        assert!(scan_opts.verbose);
        assert_eq!(scan_opts.max_depth, Some(5));
        assert!(args.report_options(&config).categories_only);
    }

    #[test]
    fn test_cli_overrides_config_values() {
        let args = Cli::parse_from(["sysprobe", "--max-depth", "1"]);
        let config = FileConfig {
            scanning: FileScanConfig {
                verbose: None,
                max_depth: Some(8),
            },
            ..FileConfig::default()
        };

        assert_eq!(args.scan_options(&config).max_depth, Some(1));
    }

    #[test]
    fn test_report_flags() {
        let args = Cli::parse_from(["sysprobe", "--json", "--categories-only"]);
        let report_opts = args.report_options(&FileConfig::default());

        assert!(args.json());
        assert!(report_opts.json);
        assert!(report_opts.categories_only);
        assert!(!report_opts.include_host());
    }

    #[test]
    fn test_short_flags() {
        let args = Cli::parse_from(["sysprobe", "-c", "-v"]);
        let config = FileConfig::default();

        assert!(args.report_options(&config).categories_only);
        assert!(args.scan_options(&config).verbose);
    }

    #[test]
    fn test_config_subcommands() {
        let args = Cli::parse_from(["sysprobe", "config", "path"]);
        assert!(matches!(
            args.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Path
            })
        ));

        let args = Cli::parse_from(["sysprobe", "config", "show"]);
        assert!(matches!(
            args.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Show
            })
        ));
    }
}
