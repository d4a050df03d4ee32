//! Export command for writing the resolved configuration back to YAML.

use crate::cli::common::{
    load_and_validate, load_style_guide, load_user_config, CliError, CliResult,
};
use crate::constants::APP_BINARY_NAME;
use crate::parser::save_arena_config;
use clap::Args;
use std::path::{Path, PathBuf};

/// Export a configuration with every default filled in
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Path to the arena configuration YAML file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Output path for the YAML file (defaults to [config_name]_resolved_[date].yaml)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Style guide YAML file (overrides the configured and built-in ones)
    #[arg(long, value_name = "FILE")]
    pub style_guide: Option<PathBuf>,

    /// Export even when the configuration has errors
    #[arg(long)]
    pub force: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let user_config = load_user_config()?;
        let style_guide = load_style_guide(self.style_guide.as_deref(), &user_config)?;
        let checked = load_and_validate(
            &self.config,
            &style_guide,
            user_config.check.validator_options(),
        )?;

        let report = &checked.validation.report;
        if !report.is_valid() && !self.force {
            return Err(CliError::validation(format!(
                "Configuration has {} error(s); run `{APP_BINARY_NAME} check` for details or pass --force",
                report.error_count()
            )));
        }

        let output_path = self.get_output_path();
        save_arena_config(&checked.config.arenas, &checked.validation.items, &output_path)
            .map_err(|e| CliError::io(format!("Failed to write output file: {e:#}")))?;

        println!("✓ Exported configuration to: {}", output_path.display());

        Ok(())
    }

    /// Get the output file path (either user-specified or auto-generated)
    fn get_output_path(&self) -> PathBuf {
        if let Some(ref path) = self.output {
            return path.clone();
        }

        // Auto-generate filename: [config_name]_resolved_[date].yaml
        let date = chrono::Local::now().format("%Y-%m-%d");
        let stem = self
            .config
            .file_stem()
            .map_or_else(|| "arena".to_string(), |stem| stem.to_string_lossy().replace(' ', "_"));

        self.config
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(format!("{stem}_resolved_{date}.yaml"))
    }
}
