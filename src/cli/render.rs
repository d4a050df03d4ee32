//! Render command: draw arenas as SVG plots or a terminal preview.

use crate::cli::check::checked_tolerance;
use crate::cli::common::{
    load_and_validate, load_style_guide, load_user_config, CheckedConfig, CliError, CliResult,
};
use crate::config::Config;
use crate::constants::APP_BINARY_NAME;
use crate::export::{render_arena_ascii, save_arena_svg, SvgRenderOptions};
use crate::validator::OverlapMode;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render arenas of a configuration as SVG plots
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Path to the arena configuration YAML file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Output file for a single arena, or directory for several
    /// (defaults to [config_name]_arena[N].svg in the configured output directory)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print a text preview to the terminal instead of writing SVG files
    #[arg(long)]
    pub ascii: bool,

    /// Only render this arena
    #[arg(long, value_name = "N")]
    pub arena: Option<usize>,

    /// Use the exact separating-axis overlap test instead of bounding boxes
    #[arg(long)]
    pub exact: bool,

    /// Style guide YAML file (overrides the configured and built-in ones)
    #[arg(long, value_name = "FILE")]
    pub style_guide: Option<PathBuf>,

    /// Overlap depth below which footprints are considered touching
    #[arg(long, value_name = "UNITS")]
    pub tolerance: Option<f64>,

    /// Leave item names off the plot
    #[arg(long)]
    pub no_labels: bool,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let user_config = load_user_config()?;
        let style_guide = load_style_guide(self.style_guide.as_deref(), &user_config)?;

        let mut options = user_config.check.validator_options();
        if self.exact {
            options.overlap_mode = OverlapMode::Exact;
        }
        if let Some(tolerance) = self.tolerance {
            options.tolerance = checked_tolerance(tolerance)?;
        }

        let checked = load_and_validate(&self.config, &style_guide, options)?;
        let arenas = select_arenas(&checked, self.arena)?;

        if self.ascii {
            for arena in &arenas {
                print!(
                    "{}",
                    render_arena_ascii(&checked.validation, *arena, user_config.render.ascii_columns)
                );
            }
        } else {
            let svg_options = svg_options(&user_config, !self.no_labels);
            let written =
                render_svgs(&checked, &arenas, self.output.as_deref(), &user_config, &svg_options)?;
            for path in &written {
                println!("✓ Rendered arena to: {}", path.display());
            }
        }

        let report = &checked.validation.report;
        if !report.is_clean() {
            eprintln!(
                "{} errors, {} warnings (run `{APP_BINARY_NAME} check` for details)",
                report.error_count(),
                report.warning_count()
            );
        }

        Ok(())
    }
}

/// SVG options from the user configuration.
pub(crate) fn svg_options(config: &Config, show_labels: bool) -> SvgRenderOptions {
    SvgRenderOptions::default()
        .with_scale(config.render.pixels_per_unit)
        .with_labels(show_labels && config.render.show_labels)
}

/// Arenas to draw: the requested one, or all of them.
pub(crate) fn select_arenas(checked: &CheckedConfig, requested: Option<usize>) -> CliResult<Vec<usize>> {
    let available: Vec<usize> = checked.config.arenas.iter().map(|arena| arena.index).collect();

    match requested {
        Some(arena) if available.contains(&arena) => Ok(vec![arena]),
        Some(arena) => Err(CliError::validation(format!(
            "Arena {arena} not found (available: {})",
            available
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ))),
        None => Ok(available),
    }
}

/// Writes one SVG per arena and returns the files written.
pub(crate) fn render_svgs(
    checked: &CheckedConfig,
    arenas: &[usize],
    output: Option<&Path>,
    config: &Config,
    options: &SvgRenderOptions,
) -> CliResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(arenas.len());

    for &arena in arenas {
        let path = get_output_path(&checked.path, arena, arenas.len(), output, config);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::io(format!("Failed to create directory {}: {e}", parent.display()))
            })?;
        }
        save_arena_svg(&checked.validation, arena, options, &path)
            .map_err(|e| CliError::io(format!("Failed to write plot: {e:#}")))?;
        info!(arena, path = %path.display(), "Wrote arena plot");
        written.push(path);
    }

    Ok(written)
}

/// Output file for one arena.
///
/// An explicit output is a file when a single arena is drawn and a directory
/// otherwise. Without one, files go to the configured output directory (or
/// the current directory) as `[config_name]_arena[N].svg`.
fn get_output_path(
    config_path: &Path,
    arena: usize,
    arena_count: usize,
    output: Option<&Path>,
    config: &Config,
) -> PathBuf {
    let stem = config_path
        .file_stem()
        .map_or_else(|| "arena".to_string(), |stem| stem.to_string_lossy().into_owned());
    let file_name = format!("{stem}_arena{arena}.svg");

    match output {
        Some(path) if arena_count == 1 => path.to_path_buf(),
        Some(dir) => dir.join(file_name),
        None => config
            .paths
            .output_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
            .join(file_name),
    }
}
