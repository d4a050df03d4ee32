//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the Animal-AI arena dimensions.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "AAI Config Assistant";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "aai-assist";

/// Name of the per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = "AaiAssist";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "AAI_ASSIST_CONFIG_DIR";

/// Side length of the square Animal-AI arena floor.
pub const ARENA_SIZE: f64 = 40.0;

/// Overlap depths at or below this value are treated as touching, not overlapping.
pub const DEFAULT_OVERLAP_TOLERANCE: f64 = 1e-8;

/// Arena pass mark used when a configuration omits `passMark`.
pub const DEFAULT_PASS_MARK: f64 = 0.0;

/// Arena time limit used when a configuration omits `timeLimit`.
pub const DEFAULT_TIME_LIMIT: f64 = 1000.0;
