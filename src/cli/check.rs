//! Check command: validate an arena configuration against the style guide.

use crate::cli::common::{
    load_and_validate, load_style_guide, load_user_config, print_json, CheckResponse,
    CheckedConfig, CliError, CliResult,
};
use crate::validator::{OverlapMode, ValidationReport, ValidatorOptions};
use clap::Args;
use std::path::PathBuf;

/// Validate an arena configuration file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Path to the arena configuration YAML file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,

    /// Use the exact separating-axis overlap test instead of bounding boxes
    #[arg(long)]
    pub exact: bool,

    /// Style guide YAML file (overrides the configured and built-in ones)
    #[arg(long, value_name = "FILE")]
    pub style_guide: Option<PathBuf>,

    /// Overlap depth below which footprints are considered touching
    #[arg(long, value_name = "UNITS")]
    pub tolerance: Option<f64>,
}

impl CheckArgs {
    /// Execute the check command
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

        if self.json {
            print_json(&CheckResponse::from_checked(&checked))?;
        } else {
            print_human_report(&checked, options);
        }

        check_outcome(&checked.validation.report, self.strict)
    }
}

/// Rejects negative or non-finite tolerances.
pub(crate) fn checked_tolerance(tolerance: f64) -> CliResult<f64> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(CliError::validation(format!(
            "Overlap tolerance must be a non-negative number, got {tolerance}"
        )))
    }
}

/// Prints the terminal version of the report.
pub(crate) fn print_human_report(checked: &CheckedConfig, options: ValidatorOptions) {
    let report = &checked.validation.report;
    if report.is_valid() {
        println!("✓ Validation passed");
    } else {
        println!("✗ Validation failed");
    }

    println!("\nConfiguration: {}", checked.path.display());
    println!("  Arenas:   {}", checked.config.arenas.len());
    println!("  Items:    {}", checked.config.items.len());
    println!("  Overlaps: {} test", options.overlap_mode);

    if report.is_clean() {
        println!("\nNo problems found");
    } else {
        println!("\nIssues:");
        for line in report.format_message(&checked.validation.names()).lines() {
            println!("  {line}");
        }
    }
}

/// Maps a report to the command result: errors always fail, warnings only
/// under `strict`.
pub(crate) fn check_outcome(report: &ValidationReport, strict: bool) -> CliResult<()> {
    if !report.is_valid() {
        return Err(CliError::validation(format!(
            "Validation failed with {} error(s)",
            report.error_count()
        )));
    }

    if strict && report.warning_count() > 0 {
        return Err(CliError::validation(format!(
            "{} warning(s) found in strict mode",
            report.warning_count()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::common::ExitCode;
    use crate::validator::Problem;

    fn warning_report() -> ValidationReport {
        let mut report = ValidationReport::new();
        report.add(
            0,
            Problem::OutOfRange {
                param: "size.x".to_string(),
                value: 50.0,
                min: 0.0,
                max: 40.0,
            },
        );
        report
    }

    #[test]
    fn test_outcome_warnings_pass_unless_strict() {
        let report = warning_report();
        assert!(check_outcome(&report, false).is_ok());
        let err = check_outcome(&report, true).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::ValidationError);
    }

    #[test]
    fn test_outcome_errors_fail() {
        let mut report = ValidationReport::new();
        report.add(
            1,
            Problem::UnknownType {
                type_name: "Unicorn".to_string(),
            },
        );
        let err = check_outcome(&report, false).unwrap_err();
        assert!(err.message.contains("1 error"));
    }

    #[test]
    fn test_tolerance_must_be_non_negative() {
        assert!(checked_tolerance(0.0).is_ok());
        assert!(checked_tolerance(-1.0).is_err());
        assert!(checked_tolerance(f64::NAN).is_err());
    }
}
