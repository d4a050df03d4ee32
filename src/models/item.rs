//! Arena items as parsed from a configuration file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Flattened parameter names used for every item.
///
/// Animal-AI nests parameters as `!Vector3`/`!RGB` mappings; the parser
/// flattens them to `<group>.<component>` so they can be looked up uniformly.
pub mod params {
    /// Centre of the lower base along the arena x axis.
    pub const POSITION_X: &str = "position.x";
    /// Height of the lower base above the floor.
    pub const POSITION_Y: &str = "position.y";
    /// Centre of the lower base along the arena z axis.
    pub const POSITION_Z: &str = "position.z";
    /// Clockwise yaw in degrees.
    pub const ROTATION: &str = "rotation";
    /// Extent along x.
    pub const SIZE_X: &str = "size.x";
    /// Vertical extent.
    pub const SIZE_Y: &str = "size.y";
    /// Extent along z.
    pub const SIZE_Z: &str = "size.z";
    /// Red colour channel.
    pub const COLOUR_R: &str = "colour.r";
    /// Green colour channel.
    pub const COLOUR_G: &str = "colour.g";
    /// Blue colour channel.
    pub const COLOUR_B: &str = "colour.b";

    /// Every parameter an item can carry, in report order.
    pub const ALL: [&str; 10] = [
        POSITION_X, POSITION_Y, POSITION_Z, ROTATION, SIZE_X, SIZE_Y, SIZE_Z, COLOUR_R, COLOUR_G,
        COLOUR_B,
    ];
}

/// A raw parameter value from the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric value (integers are widened)
    Number(f64),
    /// Text or boolean, kept verbatim
    Text(String),
    /// A list, mapping or tagged value, kept as its kind ("a mapping")
    Composite(String),
}

impl ParamValue {
    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) | Self::Composite(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "\"{text}\""),
            Self::Composite(kind) => write!(f, "{kind}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single placed object from one configuration entry.
///
/// Items are immutable once parsed. Only the parameters present in the file
/// are recorded; defaults are applied later by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    arena: usize,
    group: usize,
    type_name: String,
    name: String,
    parameters: BTreeMap<String, ParamValue>,
}

impl Item {
    /// Creates an item with no parameters.
    ///
    /// # Arguments
    ///
    /// * `arena` - Index of the arena the item belongs to
    /// * `group` - Index of the `!Item` entry it came from within that arena
    /// * `type_name` - Animal-AI item type (e.g. "Wall")
    /// * `ordinal` - Position of the item within its entry, used for the display name
    #[must_use]
    pub fn new(arena: usize, group: usize, type_name: impl Into<String>, ordinal: usize) -> Self {
        let type_name = type_name.into();
        let name = format!("{type_name} {ordinal}");
        Self {
            arena,
            group,
            type_name,
            name,
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a parameter value.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }

    /// Adds the three position components.
    #[must_use]
    pub fn with_position(self, x: f64, y: f64, z: f64) -> Self {
        self.with_param(params::POSITION_X, x)
            .with_param(params::POSITION_Y, y)
            .with_param(params::POSITION_Z, z)
    }

    /// Adds the three size components.
    #[must_use]
    pub fn with_size(self, x: f64, y: f64, z: f64) -> Self {
        self.with_param(params::SIZE_X, x)
            .with_param(params::SIZE_Y, y)
            .with_param(params::SIZE_Z, z)
    }

    /// Index of the arena this item is placed in.
    #[must_use]
    pub const fn arena(&self) -> usize {
        self.arena
    }

    /// Index of the configuration entry this item came from.
    #[must_use]
    pub const fn group(&self) -> usize {
        self.group
    }

    /// Animal-AI item type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Display name, e.g. "Wall 2".
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a parameter value.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name)
    }

    /// All parameters present in the file.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }
}
