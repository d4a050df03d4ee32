//! Validation problems and the per-item report.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::models::ParamValue;
use nalgebra::Vector2;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// How serious a problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The arena cannot be loaded as written
    Error,
    /// The arena loads but probably not as intended
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single data-level problem found on one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    /// The item type is not in the style guide.
    UnknownType {
        /// Type name as written
        type_name: String,
    },
    /// A parameter has neither a value nor a default.
    MissingParameter {
        /// Parameter name
        param: String,
    },
    /// A parameter that must be a finite number holds something else.
    WrongType {
        /// Parameter name
        param: String,
        /// Value as written
        value: ParamValue,
    },
    /// A parameter lies outside its valid range.
    OutOfRange {
        /// Parameter name
        param: String,
        /// Value as written
        value: f64,
        /// Range minimum
        min: f64,
        /// Range maximum
        max: f64,
    },
    /// The item's footprint intersects a later item in the same arena.
    Overlap {
        /// Index of the other item
        other: usize,
        /// Display name of the other item
        other_name: String,
        /// Penetration depth
        depth: f64,
        /// Minimum translation separating the pair (exact mode only)
        #[serde(skip_serializing_if = "Option::is_none")]
        translation: Option<Vector2<f64>>,
    },
}

impl Problem {
    /// Severity of this kind of problem.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnknownType { .. } | Self::MissingParameter { .. } | Self::WrongType { .. } => {
                Severity::Error
            }
            Self::OutOfRange { .. } | Self::Overlap { .. } => Severity::Warning,
        }
    }

    /// Short identifier of the problem kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "unknown_type",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::WrongType { .. } => "wrong_type",
            Self::OutOfRange { .. } => "out_of_range",
            Self::Overlap { .. } => "overlap",
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { type_name } => {
                write!(f, "unknown item type '{type_name}'")
            }
            Self::MissingParameter { param } => {
                write!(f, "{param} is required but missing")
            }
            Self::WrongType { param, value } => {
                write!(f, "{param} must be a finite number, found {value}")
            }
            Self::OutOfRange {
                param,
                value,
                min,
                max,
            } => write!(f, "{param} = {value} is outside [{min}, {max}]"),
            Self::Overlap {
                other,
                other_name,
                depth,
                translation,
            } => {
                write!(f, "overlaps {other_name} (#{other}) by {depth:.3}")?;
                if let Some(mtv) = translation {
                    write!(f, ", move by ({:.3}, {:.3}) to separate", mtv.x, mtv.y)?;
                }
                Ok(())
            }
        }
    }
}

/// Problems keyed by item index.
///
/// Built fresh by each validation run. Items without problems have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    problems: BTreeMap<usize, Vec<Problem>>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            problems: BTreeMap::new(),
        }
    }

    /// Records a problem on an item.
    pub fn add(&mut self, index: usize, problem: Problem) {
        trace!(index, kind = problem.kind(), severity = %problem.severity(), "{problem}");
        self.problems.entry(index).or_default().push(problem);
    }

    /// Problems recorded on one item.
    #[must_use]
    pub fn problems_for(&self, index: usize) -> &[Problem] {
        self.problems.get(&index).map(Vec::as_slice).unwrap_or_default()
    }

    /// True when no problems were found at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// True when there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// All problems with their item index, in item order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Problem)> {
        self.problems
            .iter()
            .flat_map(|(index, problems)| problems.iter().map(move |problem| (*index, problem)))
    }

    /// Total number of problems.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.problems.values().map(Vec::len).sum()
    }

    /// Number of error-severity problems.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-severity problems.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.iter()
            .filter(|(_, problem)| problem.severity() == severity)
            .count()
    }

    /// True when the item takes part in an overlap, on either side of the pair.
    #[must_use]
    pub fn is_overlapping(&self, index: usize) -> bool {
        self.iter().any(|(owner, problem)| match problem {
            Problem::Overlap { other, .. } => owner == index || *other == index,
            _ => false,
        })
    }

    /// Formats the report for the terminal.
    ///
    /// `names` maps item indices to display names; items missing from it are
    /// shown by index only.
    #[must_use]
    pub fn format_message(&self, names: &BTreeMap<usize, String>) -> String {
        let mut message = String::new();

        for (index, problems) in &self.problems {
            match names.get(index) {
                Some(name) => message.push_str(&format!("#{index} {name}:\n")),
                None => message.push_str(&format!("#{index}:\n")),
            }
            for problem in problems {
                message.push_str(&format!("  {}: {}\n", problem.severity(), problem));
            }
        }

        message.push_str(&format!(
            "{} errors, {} warnings\n",
            self.error_count(),
            self.warning_count()
        ));
        message
    }
}
