//! Shared types and helpers for CLI commands.

use crate::config::Config;
use crate::models::ArenaConfig;
use crate::parser::load_arena_config;
use crate::style_guide::StyleGuide;
use crate::validator::{Problem, Severity, Validation, Validator, ValidatorOptions};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed and found no errors
    Success = 0,
    /// The input was read but failed validation
    ValidationError = 1,
    /// The input could not be read or parsed, or output could not be written
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by command handlers, carrying the exit code to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// A fatal I/O or parse failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// A validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Numeric process exit code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.exit_code.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the user configuration, treating failures as fatal.
pub fn load_user_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Loads the style guide: an explicit path wins over the configured one,
/// which wins over the built-in catalogue.
pub fn load_style_guide(explicit: Option<&Path>, config: &Config) -> CliResult<StyleGuide> {
    let path = explicit.or(config.paths.style_guide.as_deref());
    let guide = match path {
        Some(path) => StyleGuide::from_path(path),
        None => StyleGuide::builtin(),
    }
    .map_err(|e| CliError::io(format!("Failed to load style guide: {e}")))?;

    debug!(
        source = %path.map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
        types = guide.len(),
        "Style guide ready"
    );
    Ok(guide)
}

/// Everything a command needs after loading and validating a file.
#[derive(Debug)]
pub struct CheckedConfig {
    /// File the configuration was read from
    pub path: PathBuf,
    /// Parsed configuration
    pub config: ArenaConfig,
    /// Validation outcome
    pub validation: Validation,
}

/// Parses and validates an arena configuration.
///
/// Parse failures are fatal (exit code 2); data problems end up in the
/// returned report.
pub fn load_and_validate(
    path: &Path,
    style_guide: &StyleGuide,
    options: ValidatorOptions,
) -> CliResult<CheckedConfig> {
    let config = load_arena_config(path)
        .map_err(|e| CliError::io(format!("Failed to load arena configuration: {e}")))?;
    let validation = Validator::new(style_guide)
        .with_options(options)
        .validate(&config);

    Ok(CheckedConfig {
        path: path.to_path_buf(),
        config,
        validation,
    })
}

/// One problem in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemEntry {
    /// Item index
    pub index: usize,
    /// Item display name
    pub item: String,
    /// Arena the item is placed in
    pub arena: usize,
    /// Problem severity
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// Structured problem data (includes `kind`)
    #[serde(flatten)]
    pub problem: Problem,
}

/// JSON output of `check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    /// True when there are no errors
    pub valid: bool,
    /// Configuration file
    pub config: String,
    /// Number of arenas
    pub arenas: usize,
    /// Number of items
    pub items: usize,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Every problem, in item order
    pub problems: Vec<ProblemEntry>,
}

impl CheckResponse {
    /// Builds the response for a checked configuration.
    #[must_use]
    pub fn from_checked(checked: &CheckedConfig) -> Self {
        let report = &checked.validation.report;
        let problems = report
            .iter()
            .map(|(index, problem)| {
                let item = &checked.validation.items[index];
                ProblemEntry {
                    index,
                    item: item.name.clone(),
                    arena: item.arena,
                    severity: problem.severity(),
                    message: problem.to_string(),
                    problem: problem.clone(),
                }
            })
            .collect();

        Self {
            valid: report.is_valid(),
            config: checked.path.display().to_string(),
            arenas: checked.config.arenas.len(),
            items: checked.config.items.len(),
            errors: report.error_count(),
            warnings: report.warning_count(),
            problems,
        }
    }
}

/// Serializes a value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
