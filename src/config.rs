//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving user configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_OVERLAP_TOLERANCE};
use crate::parser::atomic_write;
use crate::validator::{OverlapMode, ValidatorOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Style guide file replacing the built-in catalogue
    #[serde(default)]
    pub style_guide: Option<PathBuf>,
    /// Directory SVG plots are written to (current directory when unset)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Validation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Penetration depth at or below which footprints count as touching
    #[serde(default = "default_overlap_tolerance")]
    pub overlap_tolerance: f64,
    /// Intersection test used for overlaps
    #[serde(default)]
    pub overlap_mode: OverlapMode,
}

fn default_overlap_tolerance() -> f64 {
    DEFAULT_OVERLAP_TOLERANCE
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            overlap_tolerance: default_overlap_tolerance(),
            overlap_mode: OverlapMode::default(),
        }
    }
}

impl CheckConfig {
    /// Validator options described by this section.
    #[must_use]
    pub const fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            overlap_mode: self.overlap_mode,
            tolerance: self.overlap_tolerance,
        }
    }
}

/// Rendering preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// SVG pixels per arena unit
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f64,
    /// Width of the terminal preview in characters
    #[serde(default = "default_ascii_columns")]
    pub ascii_columns: usize,
    /// Draw item names in SVG plots
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,
}

fn default_pixels_per_unit() -> f64 {
    15.0
}

fn default_ascii_columns() -> usize {
    60
}

fn default_show_labels() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: default_pixels_per_unit(),
            ascii_columns: default_ascii_columns(),
            show_labels: default_show_labels(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/AaiAssist/config.toml`
/// - macOS: `~/Library/Application Support/AaiAssist/config.toml`
/// - Windows: `%APPDATA%\AaiAssist\config.toml`
///
/// The directory can be overridden with the `AAI_ASSIST_CONFIG_DIR`
/// environment variable.
///
/// # Validation
///
/// - `style_guide` must exist if set
/// - `overlap_tolerance` must be finite and non-negative
/// - `pixels_per_unit` must be positive
/// - `ascii_columns` must be at least 10
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Validation settings
    #[serde(default)]
    pub check: CheckConfig,
    /// Rendering preferences
    #[serde(default)]
    pub render: RenderConfig,
}

/// Keys accepted by [`Config::set`].
pub const SETTABLE_KEYS: [&str; 7] = [
    "paths.style_guide",
    "paths.output_dir",
    "check.overlap_tolerance",
    "check.overlap_mode",
    "render.pixels_per_unit",
    "render.ascii_columns",
    "render.show_labels",
];

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// Uses `AAI_ASSIST_CONFIG_DIR` when set, otherwise the platform config
    /// directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file using atomic write.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).with_context(|| {
                format!("Failed to create config directory: {}", config_dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        atomic_write(config_path, &content)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(style_guide) = &self.paths.style_guide {
            if !style_guide.is_file() {
                anyhow::bail!("Style guide file does not exist: {}", style_guide.display());
            }
        }

        let tolerance = self.check.overlap_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            anyhow::bail!("Overlap tolerance must be a non-negative number, got {tolerance}");
        }

        let scale = self.render.pixels_per_unit;
        if !scale.is_finite() || scale <= 0.0 {
            anyhow::bail!("Pixels per unit must be positive, got {scale}");
        }

        if self.render.ascii_columns < 10 {
            anyhow::bail!(
                "ASCII preview needs at least 10 columns, got {}",
                self.render.ascii_columns
            );
        }

        Ok(())
    }

    /// Sets a single value by its dotted key, e.g. `check.overlap_mode`.
    ///
    /// Path values may be set to an empty string to clear them. The result
    /// is validated before it is accepted.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "paths.style_guide" => updated.paths.style_guide = optional_path(value),
            "paths.output_dir" => updated.paths.output_dir = optional_path(value),
            "check.overlap_tolerance" => {
                updated.check.overlap_tolerance = value
                    .parse()
                    .with_context(|| format!("Invalid number for {key}: {value}"))?;
            }
            "check.overlap_mode" => {
                updated.check.overlap_mode = value.parse().map_err(anyhow::Error::msg)?;
            }
            "render.pixels_per_unit" => {
                updated.render.pixels_per_unit = value
                    .parse()
                    .with_context(|| format!("Invalid number for {key}: {value}"))?;
            }
            "render.ascii_columns" => {
                updated.render.ascii_columns = value
                    .parse()
                    .with_context(|| format!("Invalid column count for {key}: {value}"))?;
            }
            "render.show_labels" => {
                updated.render.show_labels = value
                    .parse()
                    .with_context(|| format!("Expected true or false for {key}: {value}"))?;
            }
            _ => anyhow::bail!(
                "Unknown configuration key: {key}\n\nValid keys: {}",
                SETTABLE_KEYS.join(", ")
            ),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}
