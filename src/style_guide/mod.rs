//! Item type catalogue: allowed types, parameter defaults, and valid ranges.
//!
//! The built-in catalogue is embedded in the binary from `style_guide.yaml`.
//! A file with the same schema can be loaded instead to check configurations
//! against a different Animal-AI release.

use crate::geometry::FootprintShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Inclusive numeric range for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    /// Smallest allowed value
    pub min: f64,
    /// Largest allowed value
    pub max: f64,
}

impl ParamRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Everything the style guide knows about one item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleGuideEntry {
    /// Outline used for overlap checks and drawing
    pub shape: FootprintShape,
    /// Default value per parameter
    pub defaults: BTreeMap<String, f64>,
    /// Valid range per parameter
    pub ranges: BTreeMap<String, ParamRange>,
}

/// Errors raised while loading a style guide.
#[derive(Debug, Error)]
pub enum StyleGuideError {
    /// The file does not exist.
    #[error("style guide not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be read.
    #[error("failed to read style guide {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not match the schema.
    #[error("invalid style guide: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// The document declares no item types.
    #[error("style guide declares no item types")]
    Empty,

    /// A range has `min > max`.
    #[error("invalid range for {item_type} {param}: min {min} is greater than max {max}")]
    InvalidRange {
        /// Item type
        item_type: String,
        /// Parameter name
        param: String,
        /// Declared minimum
        min: f64,
        /// Declared maximum
        max: f64,
    },

    /// A default lies outside the parameter's own range.
    #[error("default {value} for {item_type} {param} lies outside [{min}, {max}]")]
    DefaultOutOfRange {
        /// Item type
        item_type: String,
        /// Parameter name
        param: String,
        /// Declared default
        value: f64,
        /// Range minimum
        min: f64,
        /// Range maximum
        max: f64,
    },
}

/// On-disk schema.
#[derive(Debug, Deserialize)]
struct StyleGuideDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    shared: SharedSection,
    items: BTreeMap<String, EntryDocument>,
}

#[derive(Debug, Default, Deserialize)]
struct SharedSection {
    #[serde(default)]
    defaults: BTreeMap<String, f64>,
    #[serde(default)]
    ranges: BTreeMap<String, ParamRange>,
}

#[derive(Debug, Deserialize)]
struct EntryDocument {
    #[serde(default)]
    shape: FootprintShape,
    #[serde(default)]
    defaults: BTreeMap<String, f64>,
    #[serde(default)]
    ranges: BTreeMap<String, ParamRange>,
}

/// The authoritative catalogue of item types.
///
/// Immutable after loading; shared by reference between the validator and
/// the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleGuide {
    version: Option<String>,
    entries: BTreeMap<String, StyleGuideEntry>,
}

impl StyleGuide {
    /// Loads the catalogue embedded in the binary.
    pub fn builtin() -> Result<Self, StyleGuideError> {
        Self::from_yaml_str(include_str!("style_guide.yaml"))
    }

    /// Loads a catalogue from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self, StyleGuideError> {
        if !path.exists() {
            return Err(StyleGuideError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| StyleGuideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let guide = Self::from_yaml_str(&content)?;
        debug!(
            path = %path.display(),
            types = guide.len(),
            "Loaded style guide"
        );
        Ok(guide)
    }

    /// Parses a catalogue from YAML text.
    ///
    /// Shared defaults and ranges are merged into every entry; values given
    /// on the entry take precedence.
    pub fn from_yaml_str(content: &str) -> Result<Self, StyleGuideError> {
        let document: StyleGuideDocument = serde_yml::from_str(content)?;
        if document.items.is_empty() {
            return Err(StyleGuideError::Empty);
        }

        let mut entries = BTreeMap::new();
        for (item_type, entry) in document.items {
            let mut defaults = document.shared.defaults.clone();
            defaults.extend(entry.defaults);
            let mut ranges = document.shared.ranges.clone();
            ranges.extend(entry.ranges);

            check_entry(&item_type, &defaults, &ranges)?;

            entries.insert(
                item_type,
                StyleGuideEntry {
                    shape: entry.shape,
                    defaults,
                    ranges,
                },
            );
        }

        Ok(Self {
            version: document.version,
            entries,
        })
    }

    /// Version string declared by the document, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Number of item types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalogue has no item types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `type_name` is a catalogued item type.
    #[must_use]
    pub fn is_known(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Full entry for an item type.
    #[must_use]
    pub fn entry(&self, type_name: &str) -> Option<&StyleGuideEntry> {
        self.entries.get(type_name)
    }

    /// Default values for an item type.
    #[must_use]
    pub fn defaults(&self, type_name: &str) -> Option<&BTreeMap<String, f64>> {
        self.entry(type_name).map(|entry| &entry.defaults)
    }

    /// Default value of one parameter, if the type declares one.
    #[must_use]
    pub fn default_value(&self, type_name: &str, param: &str) -> Option<f64> {
        self.defaults(type_name)?.get(param).copied()
    }

    /// Valid range of one parameter, if the type declares one.
    #[must_use]
    pub fn valid_range(&self, type_name: &str, param: &str) -> Option<ParamRange> {
        self.entry(type_name)?.ranges.get(param).copied()
    }

    /// Footprint outline of an item type.
    #[must_use]
    pub fn shape(&self, type_name: &str) -> Option<FootprintShape> {
        self.entry(type_name).map(|entry| entry.shape)
    }

    /// Item type names in alphabetical order.
    pub fn item_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in alphabetical order of type name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &StyleGuideEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

fn check_entry(
    item_type: &str,
    defaults: &BTreeMap<String, f64>,
    ranges: &BTreeMap<String, ParamRange>,
) -> Result<(), StyleGuideError> {
    for (param, range) in ranges {
        if range.min > range.max {
            return Err(StyleGuideError::InvalidRange {
                item_type: item_type.to_string(),
                param: param.clone(),
                min: range.min,
                max: range.max,
            });
        }
    }
    for (param, &value) in defaults {
        if let Some(range) = ranges.get(param) {
            if !range.contains(value) {
                return Err(StyleGuideError::DefaultOutOfRange {
                    item_type: item_type.to_string(),
                    param: param.clone(),
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
    }
    Ok(())
}
