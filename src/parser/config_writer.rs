//! Arena configuration generation (serialization).
//!
//! Writes resolved items back out in the Animal-AI YAML format, with every
//! default made explicit. Files are written atomically.

use crate::models::{params, Arena};
use crate::validator::ResolvedItem;
use anyhow::{Context, Result};
use serde_yml::value::{Tag, TaggedValue};
use serde_yml::{Mapping, Number, Value};
use std::path::Path;

const POSITION: [&str; 3] = [params::POSITION_X, params::POSITION_Y, params::POSITION_Z];
const SIZE: [&str; 3] = [params::SIZE_X, params::SIZE_Y, params::SIZE_Z];
const COLOUR: [&str; 3] = [params::COLOUR_R, params::COLOUR_G, params::COLOUR_B];

/// Largest magnitude written as a YAML integer (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes a resolved configuration to `path`.
///
/// # Errors
///
/// Returns errors for serialization and file I/O failures, including the
/// final rename.
pub fn save_arena_config(arenas: &[Arena], items: &[ResolvedItem], path: &Path) -> Result<()> {
    let yaml = generate_arena_yaml(arenas, items)?;
    atomic_write(path, &yaml)
}

/// Generates Animal-AI YAML for the given arenas and items.
///
/// Items stay in the `!Item` entry they were parsed from; entries appear in
/// the order of their first item.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn generate_arena_yaml(arenas: &[Arena], items: &[ResolvedItem]) -> Result<String> {
    let mut arena_map = Mapping::new();

    for arena in arenas {
        let entries: Vec<Value> = group_items(items.iter().filter(|item| item.arena == arena.index))
            .iter()
            .map(|group| item_entry(group))
            .collect();

        let mut fields = Mapping::new();
        fields.insert(key("passMark"), number(arena.pass_mark));
        fields.insert(key("timeLimit"), number(arena.time_limit));
        fields.insert(key("items"), Value::Sequence(entries));

        arena_map.insert(
            Value::Number(Number::from(arena.index)),
            tagged("Arena", Value::Mapping(fields)),
        );
    }

    let mut root = Mapping::new();
    root.insert(key("arenas"), Value::Mapping(arena_map));

    serde_yml::to_string(&tagged("ArenaConfig", Value::Mapping(root)))
        .context("Failed to serialize arena configuration")
}

/// Splits items into their `!Item` entries, keeping first-appearance order.
fn group_items<'a>(items: impl Iterator<Item = &'a ResolvedItem>) -> Vec<Vec<&'a ResolvedItem>> {
    let mut groups: Vec<Vec<&ResolvedItem>> = Vec::new();
    for item in items {
        match groups
            .iter_mut()
            .find(|group| group[0].group == item.group && group[0].type_name == item.type_name)
        {
            Some(group) => group.push(item),
            None => groups.push(vec![item]),
        }
    }
    groups
}

/// One `!Item` entry. A list is written only when every item of the entry
/// has a value for it, so the lists stay aligned.
fn item_entry(group: &[&ResolvedItem]) -> Value {
    let mut entry = Mapping::new();
    entry.insert(key("name"), Value::String(group[0].type_name.clone()));

    if let Some(positions) = all_vectors(group, POSITION) {
        entry.insert(key("positions"), vector_list("Vector3", ["x", "y", "z"], &positions));
    }

    let rotations: Vec<f64> = group
        .iter()
        .filter_map(|item| item.value(params::ROTATION))
        .collect();
    if rotations.len() == group.len() {
        entry.insert(
            key("rotations"),
            Value::Sequence(rotations.into_iter().map(number).collect()),
        );
    }

    if let Some(sizes) = all_vectors(group, SIZE) {
        entry.insert(key("sizes"), vector_list("Vector3", ["x", "y", "z"], &sizes));
    }

    if let Some(colours) = all_vectors(group, COLOUR) {
        entry.insert(key("colors"), vector_list("RGB", ["r", "g", "b"], &colours));
    }

    tagged("Item", Value::Mapping(entry))
}

fn all_vectors(group: &[&ResolvedItem], components: [&str; 3]) -> Option<Vec<[f64; 3]>> {
    group.iter().map(|item| item.vector(components)).collect()
}

fn vector_list(tag: &str, names: [&str; 3], vectors: &[[f64; 3]]) -> Value {
    Value::Sequence(
        vectors
            .iter()
            .map(|vector| {
                let mut components = Mapping::new();
                for (name, value) in names.iter().zip(vector) {
                    components.insert(key(name), number(*value));
                }
                tagged(tag, Value::Mapping(components))
            })
            .collect(),
    )
}

fn tagged(tag: &str, value: Value) -> Value {
    Value::Tagged(Box::new(TaggedValue {
        tag: Tag::new(tag),
        value,
    }))
}

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

/// Whole numbers are written as integers; everything else, including
/// infinities and NaN, as YAML floats.
#[allow(clippy::cast_possible_truncation)]
fn number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Value::Number(Number::from(value as i64))
    } else {
        Value::Number(Number::from(value))
    }
}

/// Writes `content` to `path` via a temporary file and rename.
///
/// # Errors
///
/// Returns errors when the temporary file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let extension = path
        .extension()
        .map_or_else(|| "tmp".to_string(), |ext| format!("{}.tmp", ext.to_string_lossy()));
    let temp_path = path.with_extension(extension);

    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
