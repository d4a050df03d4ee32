//! Animal-AI arena configuration parsing.
//!
//! Reads the YAML format Animal-AI consumes:
//!
//! ```yaml
//! !ArenaConfig
//! arenas:
//!   0: !Arena
//!     timeLimit: 250
//!     items:
//!     - !Item
//!       name: Wall
//!       positions: [!Vector3 {x: 10, y: 0, z: 10}]
//!       rotations: [45]
//!       sizes: [!Vector3 {x: 1, y: 2, z: 5}]
//!       colors: [!RGB {r: 153, g: 153, b: 153}]
//! ```
//!
//! The custom tags carry no information beyond the structure and are
//! dropped. Every entry of `positions` becomes one [`Item`]; the entries of
//! `rotations`, `sizes`, and `colors` at the same index apply to it.

use crate::models::{params, Arena, ArenaConfig, Item, ParamValue};
use serde_yml::{Mapping, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Keys of an `!Item` entry the parser understands.
const ITEM_KEYS: [&str; 5] = ["name", "positions", "rotations", "sizes", "colors"];

/// Fatal errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The path does not exist.
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The path exists but is a directory or similar.
    #[error("path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// A required key is absent.
    #[error("missing required key '{key}' in {context}")]
    MissingKey {
        /// The key that was expected
        key: String,
        /// Where it was expected, e.g. "arena 0"
        context: String,
    },

    /// A value has the wrong shape, e.g. a list where a mapping is expected.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

/// Loads an arena configuration from a file.
///
/// # Errors
///
/// Returns errors for:
/// - Missing file or a path that is not a regular file
/// - Read failures
/// - Malformed YAML
/// - Missing `arenas`, `items`, or `name` keys
pub fn load_arena_config(path: &Path) -> Result<ArenaConfig, ParseError> {
    if !path.exists() {
        return Err(ParseError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ParseError::NotAFile(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_arena_config_str(&content)?;
    debug!(
        path = %path.display(),
        arenas = config.arenas.len(),
        items = config.items.len(),
        "Parsed arena configuration"
    );
    Ok(config)
}

/// Parses an arena configuration from YAML text.
pub fn parse_arena_config_str(content: &str) -> Result<ArenaConfig, ParseError> {
    let document: Value = serde_yml::from_str(content)?;
    let document = strip_tags(document);

    let root = document
        .as_mapping()
        .ok_or_else(|| ParseError::InvalidStructure("document root must be a mapping".into()))?;

    let arenas = root
        .get("arenas")
        .filter(|value| !value.is_null())
        .ok_or_else(|| ParseError::MissingKey {
            key: "arenas".into(),
            context: "document".into(),
        })?;

    let mut config = ArenaConfig::new();
    for (index, arena) in arena_entries(arenas)? {
        parse_arena(index, arena, &mut config)?;
    }
    Ok(config)
}

/// Removes YAML tags recursively, keeping the tagged values.
fn strip_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => strip_tags(tagged.value),
        Value::Sequence(sequence) => Value::Sequence(sequence.into_iter().map(strip_tags).collect()),
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (strip_tags(key), strip_tags(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Arenas in ascending index order.
///
/// Animal-AI writes arenas as a mapping keyed by index; a plain list is
/// accepted as well, indexed by position.
fn arena_entries(arenas: &Value) -> Result<Vec<(usize, &Value)>, ParseError> {
    match arenas {
        Value::Mapping(mapping) => {
            let mut entries = mapping
                .iter()
                .map(|(key, value)| arena_index(key).map(|index| (index, value)))
                .collect::<Result<Vec<_>, _>>()?;
            entries.sort_by_key(|(index, _)| *index);
            if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
                return Err(ParseError::InvalidStructure(format!(
                    "duplicate arena index {}",
                    pair[0].0
                )));
            }
            Ok(entries)
        }
        Value::Sequence(sequence) => Ok(sequence.iter().enumerate().collect()),
        _ => Err(ParseError::InvalidStructure(
            "'arenas' must be a mapping of arena index to arena".into(),
        )),
    }
}

fn arena_index(key: &Value) -> Result<usize, ParseError> {
    let index = match key {
        Value::Number(number) => number.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    index.ok_or_else(|| {
        ParseError::InvalidStructure(format!(
            "arena key {} is not a non-negative integer",
            describe(key)
        ))
    })
}

fn parse_arena(index: usize, value: &Value, config: &mut ArenaConfig) -> Result<(), ParseError> {
    let context = format!("arena {index}");
    let mapping = value
        .as_mapping()
        .ok_or_else(|| ParseError::InvalidStructure(format!("{context} must be a mapping")))?;

    let mut arena = Arena::new(index);
    if let Some(pass_mark) = number_field(mapping, "passMark", &context)? {
        arena.pass_mark = pass_mark;
    }
    if let Some(time_limit) = number_field(mapping, "timeLimit", &context)? {
        arena.time_limit = time_limit;
    } else if let Some(time_limit) = number_field(mapping, "t", &context)? {
        arena.time_limit = time_limit;
    }

    let items = mapping.get("items").ok_or_else(|| ParseError::MissingKey {
        key: "items".into(),
        context: context.clone(),
    })?;
    let groups: &[Value] = match items {
        Value::Sequence(sequence) => sequence.as_slice(),
        Value::Null => &[],
        _ => {
            return Err(ParseError::InvalidStructure(format!(
                "'items' of {context} must be a list"
            )))
        }
    };

    for (group, entry) in groups.iter().enumerate() {
        parse_item_group(index, group, entry, config)?;
    }

    config.arenas.push(arena);
    Ok(())
}

fn parse_item_group(
    arena: usize,
    group: usize,
    value: &Value,
    config: &mut ArenaConfig,
) -> Result<(), ParseError> {
    let context = format!("arena {arena}, item entry {group}");
    let mapping = value
        .as_mapping()
        .ok_or_else(|| ParseError::InvalidStructure(format!("{context} must be a mapping")))?;

    let type_name = match mapping.get("name") {
        Some(Value::String(name)) => name.trim().to_string(),
        Some(Value::Null) | None => {
            return Err(ParseError::MissingKey {
                key: "name".into(),
                context,
            })
        }
        Some(other) => {
            return Err(ParseError::InvalidStructure(format!(
                "{context}: 'name' must be a string, found {}",
                describe(other)
            )))
        }
    };

    for (key, _) in mapping {
        if let Some(key) = key.as_str() {
            if !ITEM_KEYS.contains(&key) {
                debug!(arena, group, key, "Ignoring unsupported item key");
            }
        }
    }

    let positions = list_field(mapping, "positions", &context)?;
    let rotations = list_field(mapping, "rotations", &context)?;
    let sizes = list_field(mapping, "sizes", &context)?;
    let colors = list_field(mapping, "colors", &context)?;

    // An entry without positions is placed at random by Animal-AI
    let count = positions.len().max(1);
    for ordinal in 0..count {
        let mut item = Item::new(arena, group, type_name.as_str(), ordinal);

        if let Some(position) = positions.get(ordinal) {
            item = vector_params(
                item,
                position,
                [
                    ("x", params::POSITION_X),
                    ("y", params::POSITION_Y),
                    ("z", params::POSITION_Z),
                ],
                &context,
            )?;
        }
        if let Some(rotation) = rotations.get(ordinal).and_then(scalar) {
            item = item.with_param(params::ROTATION, rotation);
        }
        if let Some(size) = sizes.get(ordinal) {
            item = vector_params(
                item,
                size,
                [
                    ("x", params::SIZE_X),
                    ("y", params::SIZE_Y),
                    ("z", params::SIZE_Z),
                ],
                &context,
            )?;
        }
        if let Some(colour) = colors.get(ordinal) {
            item = vector_params(
                item,
                colour,
                [
                    ("r", params::COLOUR_R),
                    ("g", params::COLOUR_G),
                    ("b", params::COLOUR_B),
                ],
                &context,
            )?;
        }

        config.items.push(item);
    }

    Ok(())
}

/// Reads an optional numeric field.
fn number_field(mapping: &Mapping, key: &str, context: &str) -> Result<Option<f64>, ParseError> {
    match mapping.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(number.as_f64()),
        Some(other) => Err(ParseError::InvalidStructure(format!(
            "{context}: '{key}' must be a number, found {}",
            describe(other)
        ))),
    }
}

/// Reads an optional list field; absent or null means empty.
fn list_field<'a>(
    mapping: &'a Mapping,
    key: &str,
    context: &str,
) -> Result<&'a [Value], ParseError> {
    match mapping.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Sequence(sequence)) => Ok(sequence.as_slice()),
        Some(other) => Err(ParseError::InvalidStructure(format!(
            "{context}: '{key}' must be a list, found {}",
            describe(other)
        ))),
    }
}

/// Copies the components of a `!Vector3`/`!RGB` mapping onto an item.
fn vector_params(
    mut item: Item,
    value: &Value,
    components: [(&str, &str); 3],
    context: &str,
) -> Result<Item, ParseError> {
    match value {
        Value::Null => Ok(item),
        Value::Mapping(mapping) => {
            for (component, param) in components {
                if let Some(value) = mapping.get(component).and_then(scalar) {
                    item = item.with_param(param, value);
                }
            }
            Ok(item)
        }
        other => Err(ParseError::InvalidStructure(format!(
            "{context}: expected a mapping with {}/{}/{} components, found {}",
            components[0].0,
            components[1].0,
            components[2].0,
            describe(other)
        ))),
    }
}

/// Converts a scalar to a parameter value; `null` means absent.
fn scalar(value: &Value) -> Option<ParamValue> {
    match value {
        Value::Null => None,
        Value::Number(number) => number.as_f64().map(ParamValue::Number),
        Value::String(text) => Some(ParamValue::Text(text.clone())),
        Value::Bool(flag) => Some(ParamValue::Text(flag.to_string())),
        other => Some(ParamValue::Composite(describe(other).to_string())),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
