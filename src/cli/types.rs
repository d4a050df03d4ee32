//! Item type listing from the style guide.

use crate::cli::common::{load_style_guide, load_user_config, print_json, CliResult};
use crate::style_guide::{ParamRange, StyleGuide};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// List the item types known to the style guide
#[derive(Debug, Clone, Args)]
pub struct TypesArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Only show this item type
    #[arg(long, value_name = "TYPE")]
    pub name: Option<String>,

    /// Style guide YAML file (overrides the configured and built-in ones)
    #[arg(long, value_name = "FILE")]
    pub style_guide: Option<PathBuf>,
}

// JSON response types
#[derive(Debug, Serialize)]
struct TypeItem<'a> {
    name: &'a str,
    shape: &'static str,
    defaults: &'a BTreeMap<String, f64>,
    ranges: &'a BTreeMap<String, ParamRange>,
}

#[derive(Debug, Serialize)]
struct ListTypesResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    types: Vec<TypeItem<'a>>,
    count: usize,
}

impl TypesArgs {
    /// Execute the types command
    pub fn execute(&self) -> CliResult<()> {
        let user_config = load_user_config()?;
        let style_guide = load_style_guide(self.style_guide.as_deref(), &user_config)?;

        let response = build_response(&style_guide, self.name.as_deref());

        if self.json {
            print_json(&response)?;
        } else if response.count == 0 {
            println!("No matching item types.");
        } else {
            if let Some(version) = response.version {
                println!("Style guide version {version}");
            }
            println!("Item types ({}):", response.count);
            for item in &response.types {
                println!();
                println!("  {} ({})", item.name, item.shape);
                for (param, range) in item.ranges {
                    let default = item
                        .defaults
                        .get(param)
                        .map_or_else(|| "-".to_string(), ToString::to_string);
                    println!(
                        "    {:<12} default {:<8} range [{}, {}]",
                        param, default, range.min, range.max
                    );
                }
            }
        }

        Ok(())
    }
}

fn build_response<'a>(style_guide: &'a StyleGuide, name: Option<&str>) -> ListTypesResponse<'a> {
    let types: Vec<TypeItem<'a>> = style_guide
        .entries()
        .filter(|(type_name, _)| name.is_none_or(|wanted| wanted == *type_name))
        .map(|(type_name, entry)| TypeItem {
            name: type_name,
            shape: entry.shape.name(),
            defaults: &entry.defaults,
            ranges: &entry.ranges,
        })
        .collect();

    ListTypesResponse {
        version: style_guide.version(),
        count: types.len(),
        types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_response_lists_all_types() {
        let guide = StyleGuide::builtin().unwrap();
        let response = build_response(&guide, None);
        assert_eq!(response.count, guide.len());
        assert!(response.types.iter().any(|item| item.name == "GoodGoal" && item.shape == "circle"));
    }

    #[test]
    fn test_build_response_filters_by_name() {
        let guide = StyleGuide::builtin().unwrap();
        let response = build_response(&guide, Some("Wall"));
        assert_eq!(response.count, 1);
        assert!(response.types[0].ranges.contains_key("size.x"));

        assert_eq!(build_response(&guide, Some("Unicorn")).count, 0);
    }
}
