mod cli;

use std::{env, path::PathBuf, process::exit};

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand, PATH_ENV};
use colored::Colorize;
use sysprobe::{
    aggregator::Aggregator, config::FileConfig, output::JsonOutput, report::render_categories,
    system,
};

/// Entry point for the sysprobe application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, collects the host sections, walks the target directory
/// and prints the report either as text or as JSON.
///
/// # Errors
///
/// Returns errors from the `config` subcommand or from JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);

    let root = args.root(&file_config, env::var_os(PATH_ENV).map(PathBuf::from));
    let scan_options = args.scan_options(&file_config);
    let report_options = args.report_options(&file_config);
    let verbose = scan_options.verbose;

    let system_report = report_options.include_host().then(system::collect);

    if !json_mode && let Some(report) = &system_report {
        print_section(&system::render_host(&report.host));
        print_section(&system::render_cpu(&report.cpu));
        print_section(&system::render_memory(&report.memory));
        print_section(&system::render_disks(&report.disks));
    }

    let scan = Aggregator::new(scan_options)
        .with_quiet(json_mode)
        .scan(&root);

    if json_mode {
        let output = JsonOutput::new(
            system_report,
            &root,
            &scan.categories,
            scan.files_counted,
            scan.skipped.len(),
        );
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_section(&render_categories(&scan.categories));

    if verbose {
        eprintln!(
            "{}",
            format!(
                "Counted {} files under {} ({} skipped)",
                scan.files_counted,
                root.display(),
                scan.skipped.len()
            )
            .dimmed()
        );
    }

    Ok(())
}

/// Print a rendered section, with its title line in bold.
fn print_section(lines: &[String]) {
    let Some((title, body)) = lines.split_first() else {
        return;
    };

    println!("{}", title.bold());
    for line in body {
        println!("{line}");
    }
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# sysprobe configuration
# All values shown are their defaults. Uncomment and change as needed.

# Directory whose files are categorised (defaults to the current directory).
# The ANALYZE_PATH environment variable and the PATH argument take priority.
# path = "."

[scanning]
# Print files and directories skipped during the scan
# verbose = false

# Maximum directory depth to scan (unlimited when not set)
# max_depth = 10

[report]
# Only report file categories, skipping the host sections
# categories_only = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let path = config.path.as_ref().map_or_else(
        || "\".\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let max_depth = config
        .scanning
        .max_depth
        .map_or_else(|| "unlimited  (default)".to_string(), |v| v.to_string());

    format!(
        "\
path            = {path}

[scanning]
verbose         = {verbose}
max_depth       = {max_depth}

[report]
categories_only = {categories_only}",
        verbose = show_bool(config.scanning.verbose, false),
        categories_only = show_bool(config.report.categories_only, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();

        assert!(config.path.is_none());
        assert!(config.scanning.verbose.is_none());
        assert!(config.scanning.max_depth.is_none());
        assert!(config.report.categories_only.is_none());
    }

    #[test]
    fn test_format_config_shows_defaults() {
        let rendered = format_config(&FileConfig::default());

        assert!(rendered.contains("path            = \".\"  (default)"));
        assert!(rendered.contains("verbose         = false  (default)"));
        assert!(rendered.contains("max_depth       = unlimited  (default)"));
    }

    #[test]
    fn test_format_config_shows_file_values() {
        let config: FileConfig =
            toml::from_str("path = \"/srv\"\n[scanning]\nmax_depth = 2\n").unwrap();
        let rendered = format_config(&config);

        assert!(rendered.contains("path            = \"/srv\""));
        assert!(rendered.contains("max_depth       = 2"));
    }
}
