//! AAI Assist - arena configuration checker for Animal-AI
//!
//! Validates arena YAML files against the item style guide, reports
//! parameter problems and overlapping items, and plots each arena.

use aai_assist::cli::{
    CheckArgs, CliResult, ConfigArgs, ExportArgs, RenderArgs, RunArgs, TypesArgs,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// AAI Assist - arena configuration checker for Animal-AI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an arena configuration
    Check(CheckArgs),
    /// Draw arenas as SVG plots or a text preview
    Render(RenderArgs),
    /// Check a configuration, then render every arena
    Run(RunArgs),
    /// Write the configuration back with defaults filled in
    Export(ExportArgs),
    /// List item types with their defaults and ranges
    Types(TypesArgs),
    /// Show or change user configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Check(args) => args.execute(),
            Self::Render(args) => args.execute(),
            Self::Run(args) => args.execute(),
            Self::Export(args) => args.execute(),
            Self::Types(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for reports and JSON
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.code());
    }
}
