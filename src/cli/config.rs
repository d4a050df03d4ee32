//! Configuration management CLI commands.

use crate::cli::common::{load_user_config, print_json, CliError, CliResult};
use crate::config::{Config, SETTABLE_KEYS};
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set a configuration value
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set a configuration value
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Dotted key, e.g. check.overlap_mode
    #[arg(value_name = "KEY")]
    key: String,

    /// New value (an empty string clears a path)
    #[arg(value_name = "VALUE")]
    value: String,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_user_config()?;
        let config_file = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))?;

        if self.json {
            print_json(&ConfigOutput {
                config_file: config_file.to_string_lossy().to_string(),
                config: &config,
            })?;
        } else {
            output_human_readable(&config, &config_file.to_string_lossy());
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = load_user_config()?;

        config
            .set(&self.key, &self.value)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, config_file: &str) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!("File: {config_file}");
    println!();

    println!("Paths:");
    match &config.paths.style_guide {
        Some(path) => println!("  Style Guide: {}", path.display()),
        None => println!("  Style Guide: (built-in)"),
    }
    match &config.paths.output_dir {
        Some(path) => println!("  Output Directory: {}", path.display()),
        None => println!("  Output Directory: (current directory)"),
    }
    println!();

    println!("Check:");
    println!("  Overlap Mode: {}", config.check.overlap_mode);
    println!("  Overlap Tolerance: {}", config.check.overlap_tolerance);
    println!();

    println!("Render:");
    println!("  Pixels Per Unit: {}", config.render.pixels_per_unit);
    println!("  ASCII Columns: {}", config.render.ascii_columns);
    println!("  Show Labels: {}", config.render.show_labels);
    println!();

    println!("Settable keys: {}", SETTABLE_KEYS.join(", "));
}
