//! Run command: check a configuration, then plot every arena.

use crate::cli::check::{check_outcome, print_human_report};
use crate::cli::common::{load_and_validate, load_style_guide, load_user_config, CliResult};
use crate::cli::render::{render_svgs, select_arenas, svg_options};
use clap::Args;
use std::path::PathBuf;

/// Check a configuration and render all of its arenas
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Path to the arena configuration YAML file
    #[arg(value_name = "FILE")]
    pub config: PathBuf,

    /// Directory for the SVG plots (defaults to the configured output directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Style guide YAML file (overrides the configured and built-in ones)
    #[arg(long, value_name = "FILE")]
    pub style_guide: Option<PathBuf>,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = load_user_config()?;
        let style_guide = load_style_guide(self.style_guide.as_deref(), &config)?;
        let options = config.check.validator_options();

        let checked = load_and_validate(&self.config, &style_guide, options)?;
        print_human_report(&checked, options);

        let arenas = select_arenas(&checked, None)?;
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = Some(dir.clone());
        }
        // Always one file per arena, named after the configuration
        let written = render_svgs(
            &checked,
            &arenas,
            None,
            &config,
            &svg_options(&config, true),
        )?;

        println!();
        for path in &written {
            println!("✓ Rendered arena to: {}", path.display());
        }

        check_outcome(&checked.validation.report, false)
    }
}
