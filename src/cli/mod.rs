//! CLI command handlers for AAI Assist.
//!
//! Each subcommand loads an arena configuration, validates it against the
//! style guide, and reports or draws the result. Handlers return
//! [`CliResult`] so `main` can map failures to exit codes.

pub mod check;
pub mod common;
pub mod config;
pub mod export;
pub mod render;
pub mod run;
pub mod types;

// Re-export types used by main.rs and tests
pub use check::CheckArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use render::RenderArgs;
pub use run::RunArgs;
pub use types::TypesArgs;
