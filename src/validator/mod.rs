//! Configuration validation.
//!
//! Checks every item against the style guide (known type, parameter types,
//! ranges), fills in defaults, and looks for overlapping items within each
//! arena. Problems are collected into a [`ValidationReport`]; nothing here
//! aborts on bad data.

pub mod checker;
pub mod overlap;
pub mod report;

pub use checker::{ResolvedItem, Validation, Validator, ValidatorOptions};
pub use overlap::{find_overlaps, overlap_between, OverlapFinding, OverlapMode};
pub use report::{Problem, Severity, ValidationReport};
