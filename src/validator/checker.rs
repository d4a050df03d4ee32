//! Per-item validation against the style guide.

use crate::constants::DEFAULT_OVERLAP_TOLERANCE;
use crate::geometry::Footprint;
use crate::models::{params, ArenaConfig, Item, ParamValue, RgbColor};
use crate::style_guide::StyleGuide;
use crate::validator::overlap::{find_overlaps, OverlapMode};
use crate::validator::report::{Problem, ValidationReport};
use nalgebra::Point2;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Knobs for a validation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatorOptions {
    /// Intersection test used for the overlap pass
    pub overlap_mode: OverlapMode,
    /// Penetration depth at or below which footprints count as touching
    pub tolerance: f64,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            overlap_mode: OverlapMode::default(),
            tolerance: DEFAULT_OVERLAP_TOLERANCE,
        }
    }
}

/// An item after defaults have been filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedItem {
    /// Index in the configuration's item sequence
    pub index: usize,
    /// Arena the item is placed in
    pub arena: usize,
    /// `!Item` entry the item came from
    pub group: usize,
    /// Display name
    pub name: String,
    /// Animal-AI item type
    pub type_name: String,
    /// Whether the style guide knows the type
    pub known: bool,
    /// Numeric parameter values, explicit or defaulted
    pub values: BTreeMap<String, f64>,
    /// Floor footprint, when the type is known and the item has a position
    pub footprint: Option<Footprint>,
    /// Fill colour
    pub colour: RgbColor,
}

impl ResolvedItem {
    /// Resolved value of one parameter.
    #[must_use]
    pub fn value(&self, param: &str) -> Option<f64> {
        self.values.get(param).copied()
    }

    /// The three components of a vector parameter, if all are resolved.
    #[must_use]
    pub fn vector(&self, components: [&str; 3]) -> Option<[f64; 3]> {
        Some([
            self.value(components[0])?,
            self.value(components[1])?,
            self.value(components[2])?,
        ])
    }
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct Validation {
    /// Resolved items in configuration order
    pub items: Vec<ResolvedItem>,
    /// Problems found
    pub report: ValidationReport,
}

impl Validation {
    /// Resolved items placed in one arena.
    pub fn items_in_arena(&self, arena: usize) -> impl Iterator<Item = &ResolvedItem> {
        self.items.iter().filter(move |item| item.arena == arena)
    }

    /// Display names keyed by item index, for report formatting.
    #[must_use]
    pub fn names(&self) -> BTreeMap<usize, String> {
        self.items
            .iter()
            .map(|item| (item.index, item.name.clone()))
            .collect()
    }
}

/// Checks configurations against a style guide.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    style_guide: &'a StyleGuide,
    options: ValidatorOptions,
}

impl<'a> Validator<'a> {
    /// Creates a validator with default options.
    #[must_use]
    pub fn new(style_guide: &'a StyleGuide) -> Self {
        Self {
            style_guide,
            options: ValidatorOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub const fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates every item of a configuration.
    ///
    /// Data-level problems never abort the run; each item is checked and the
    /// findings are collected into the report.
    #[must_use]
    pub fn validate(&self, config: &ArenaConfig) -> Validation {
        let mut report = ValidationReport::new();

        let items: Vec<ResolvedItem> = config
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| self.resolve(index, item, &mut report))
            .collect();

        for finding in find_overlaps(&items, self.options.overlap_mode, self.options.tolerance) {
            let other_name = items[finding.second].name.clone();
            report.add(
                finding.first,
                Problem::Overlap {
                    other: finding.second,
                    other_name,
                    depth: finding.depth,
                    translation: finding.translation,
                },
            );
        }

        debug!(
            items = items.len(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            mode = %self.options.overlap_mode,
            "Validation finished"
        );

        Validation { items, report }
    }

    fn resolve(&self, index: usize, item: &Item, report: &mut ValidationReport) -> ResolvedItem {
        let type_name = item.type_name();
        let known = self.style_guide.is_known(type_name);

        let mut values = BTreeMap::new();
        if known {
            for param in params::ALL {
                if let Some(value) = self.resolve_param(index, item, param, report) {
                    values.insert(param.to_string(), value);
                }
            }
        } else {
            report.add(
                index,
                Problem::UnknownType {
                    type_name: type_name.to_string(),
                },
            );
            // Keep what the file says so the item can still be exported
            for (param, value) in item.parameters() {
                if let Some(number) = value.as_number() {
                    values.insert(param.clone(), number);
                }
            }
        }

        let footprint = if known {
            self.footprint(type_name, &values)
        } else {
            None
        };
        let colour = match (
            values.get(params::COLOUR_R),
            values.get(params::COLOUR_G),
            values.get(params::COLOUR_B),
        ) {
            (Some(&r), Some(&g), Some(&b)) => RgbColor::from_channels(r, g, b),
            _ => RgbColor::default(),
        };

        trace!(index, name = item.name(), known, "Resolved item");

        ResolvedItem {
            index,
            arena: item.arena(),
            group: item.group(),
            name: item.name().to_string(),
            type_name: type_name.to_string(),
            known,
            values,
            footprint,
            colour,
        }
    }

    /// Resolves one parameter, recording any problem it has.
    ///
    /// Text, nested and non-finite values are reported and replaced by the
    /// default, if any.
    fn resolve_param(
        &self,
        index: usize,
        item: &Item,
        param: &str,
        report: &mut ValidationReport,
    ) -> Option<f64> {
        let type_name = item.type_name();
        let default = self.style_guide.default_value(type_name, param);

        match item.param(param) {
            Some(ParamValue::Number(value)) if value.is_finite() => {
                if let Some(range) = self.style_guide.valid_range(type_name, param) {
                    if !range.contains(*value) {
                        report.add(
                            index,
                            Problem::OutOfRange {
                                param: param.to_string(),
                                value: *value,
                                min: range.min,
                                max: range.max,
                            },
                        );
                    }
                }
                Some(*value)
            }
            Some(value) => {
                report.add(
                    index,
                    Problem::WrongType {
                        param: param.to_string(),
                        value: value.clone(),
                    },
                );
                default
            }
            None => {
                if default.is_none() {
                    report.add(
                        index,
                        Problem::MissingParameter {
                            param: param.to_string(),
                        },
                    );
                }
                default
            }
        }
    }

    fn footprint(&self, type_name: &str, values: &BTreeMap<String, f64>) -> Option<Footprint> {
        let get = |param: &str| values.get(param).copied();
        let shape = self.style_guide.shape(type_name)?;

        let footprint = Footprint::new(
            Point2::new(get(params::POSITION_X)?, get(params::POSITION_Z)?),
            get(params::SIZE_X)?,
            get(params::SIZE_Z)?,
            get(params::ROTATION).unwrap_or(0.0),
            shape,
        )
        .with_vertical(
            get(params::POSITION_Y).unwrap_or(0.0),
            get(params::SIZE_Y)?,
        );
        Some(footprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Arena;

    fn guide() -> StyleGuide {
        StyleGuide::builtin().unwrap()
    }

    fn config(items: Vec<Item>) -> ArenaConfig {
        ArenaConfig {
            arenas: vec![Arena::new(0), Arena::new(1)],
            items,
        }
    }

    fn wall(ordinal: usize, x: f64, z: f64) -> Item {
        Item::new(0, 0, "Wall", ordinal)
            .with_position(x, 0.0, z)
            .with_size(2.0, 1.0, 2.0)
    }

    #[test]
    fn test_valid_item_has_no_problems() {
        let guide = guide();
        let item = wall(0, 10.0, 10.0)
            .with_param(params::ROTATION, 30.0)
            .with_param(params::COLOUR_R, 10.0)
            .with_param(params::COLOUR_G, 20.0)
            .with_param(params::COLOUR_B, 30.0);
        let validation = Validator::new(&guide).validate(&config(vec![item]));
        assert!(validation.report.is_clean());

        let resolved = &validation.items[0];
        assert_eq!(resolved.value(params::ROTATION), Some(30.0));
        assert_eq!(resolved.colour, RgbColor::new(10, 20, 30));
        assert!(resolved.footprint.is_some());
    }

    #[test]
    fn test_defaults_fill_missing_parameters() {
        let guide = guide();
        let item = Item::new(0, 0, "Wall", 0)
            .with_param(params::POSITION_X, 5.0)
            .with_param(params::POSITION_Z, 5.0);
        let validation = Validator::new(&guide).validate(&config(vec![item]));
        assert!(validation.report.is_clean());

        let resolved = &validation.items[0];
        assert_eq!(
            resolved.value(params::SIZE_X),
            guide.default_value("Wall", params::SIZE_X)
        );
        assert_eq!(resolved.value(params::POSITION_Y), Some(0.0));
        assert_eq!(resolved.colour, RgbColor::new(153, 153, 153));
    }

    #[test]
    fn test_missing_position_without_default() {
        let guide = guide();
        let item = Item::new(0, 0, "Agent", 0);
        let validation = Validator::new(&guide).validate(&config(vec![item]));
        let problems = validation.report.problems_for(0);
        assert_eq!(problems.len(), 2);
        assert!(problems
            .iter()
            .all(|p| matches!(p, Problem::MissingParameter { .. })));
        assert!(validation.items[0].footprint.is_none());
    }

    #[test]
    fn test_out_of_range_reported_once_per_parameter() {
        let guide = guide();
        let item = wall(0, 45.0, 10.0).with_param(params::ROTATION, 400.0);
        let validation = Validator::new(&guide).validate(&config(vec![item]));
        let problems = validation.report.problems_for(0);
        assert_eq!(problems.len(), 2);
        assert!(problems.contains(&Problem::OutOfRange {
            param: params::POSITION_X.into(),
            value: 45.0,
            min: 0.0,
            max: 40.0,
        }));
        assert!(problems.iter().any(
            |p| matches!(p, Problem::OutOfRange { param, .. } if param == params::ROTATION)
        ));
        // The value is still used
        assert_eq!(validation.items[0].value(params::POSITION_X), Some(45.0));
    }

    #[test]
    fn test_non_finite_value_is_wrong_type() {
        let guide = guide();
        let item = wall(0, f64::INFINITY, 10.0);
        let validation = Validator::new(&guide).validate(&config(vec![item]));
        assert!(!validation.report.is_valid());
        let problems = validation.report.problems_for(0);
        assert!(matches!(
            &problems[0],
            Problem::WrongType { param, value: ParamValue::Number(value) }
                if param == params::POSITION_X && value.is_infinite()
        ));
        assert_eq!(problems[0].to_string(), "position.x must be a finite number, found inf");
    }

    #[test]
    fn test_nested_value_reports_its_kind() {
        let guide = guide();
        let item = wall(0, 10.0, 10.0)
            .with_param(params::ROTATION, ParamValue::Composite("a mapping".into()));
        let validation = Validator::new(&guide).validate(&config(vec![item]));
        let message = validation.report.problems_for(0)[0].to_string();
        assert_eq!(message, "rotation must be a finite number, found a mapping");
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let guide = guide();
        let item = wall(0, 40.0, 0.0).with_param(params::ROTATION, 360.0);
        let validation = Validator::new(&guide).validate(&config(vec![item]));
        assert!(validation.report.is_clean());
    }

    #[test]
    fn test_text_value_is_wrong_type() {
        let guide = guide();
        let item = wall(0, 10.0, 10.0).with_param(params::SIZE_X, "big");
        let validation = Validator::new(&guide).validate(&config(vec![item]));
        assert_eq!(
            validation.report.problems_for(0),
            &[Problem::WrongType {
                param: params::SIZE_X.into(),
                value: "big".into(),
            }]
        );
        assert_eq!(
            validation.items[0].value(params::SIZE_X),
            guide.default_value("Wall", params::SIZE_X)
        );
    }

    #[test]
    fn test_unknown_type() {
        let guide = guide();
        let item = Item::new(0, 0, "Unicorn", 0).with_position(10.0, 0.0, 10.0);
        let overlapping = wall(0, 10.0, 10.0);
        let validation = Validator::new(&guide).validate(&config(vec![item, overlapping]));
        assert_eq!(
            validation.report.problems_for(0),
            &[Problem::UnknownType {
                type_name: "Unicorn".into()
            }]
        );
        assert!(!validation.items[0].known);
        assert!(validation.items[0].footprint.is_none());
        assert!(validation.report.problems_for(1).is_empty());
    }

    #[test]
    fn test_overlap_recorded_once_on_lower_index() {
        let guide = guide();
        let validation = Validator::new(&guide).validate(&config(vec![
            wall(0, 10.0, 10.0),
            wall(1, 11.0, 10.0),
            wall(2, 30.0, 30.0),
        ]));
        assert_eq!(validation.report.problem_count(), 1);
        match validation.report.problems_for(0) {
            [Problem::Overlap {
                other, other_name, ..
            }] => {
                assert_eq!(*other, 1);
                assert_eq!(other_name, "Wall 1");
            }
            other => panic!("unexpected problems: {other:?}"),
        }
        assert!(validation.report.problems_for(1).is_empty());
        assert!(validation.report.is_valid());
    }

    #[test]
    fn test_touching_items_do_not_overlap() {
        let guide = guide();
        let validation =
            Validator::new(&guide).validate(&config(vec![wall(0, 10.0, 10.0), wall(1, 12.0, 10.0)]));
        assert!(validation.report.is_clean());
    }

    #[test]
    fn test_items_in_different_arenas_do_not_overlap() {
        let guide = guide();
        let other_arena = Item::new(1, 0, "Wall", 0)
            .with_position(10.0, 0.0, 10.0)
            .with_size(2.0, 1.0, 2.0);
        let validation =
            Validator::new(&guide).validate(&config(vec![wall(0, 10.0, 10.0), other_arena]));
        assert!(validation.report.is_clean());
    }

    #[test]
    fn test_tolerance_option() {
        let guide = guide();
        let items = config(vec![wall(0, 10.0, 10.0), wall(1, 11.9, 10.0)]);

        let strict = Validator::new(&guide).validate(&items);
        assert_eq!(strict.report.problem_count(), 1);

        let lenient = Validator::new(&guide)
            .with_options(ValidatorOptions {
                tolerance: 0.5,
                ..ValidatorOptions::default()
            })
            .validate(&items);
        assert!(lenient.report.is_clean());
    }

    #[test]
    fn test_exact_mode_ignores_bounding_box_overlap() {
        let guide = guide();
        let diagonal = |ordinal: usize, x: f64, z: f64| {
            Item::new(0, 0, "Wall", ordinal)
                .with_position(x, 0.0, z)
                .with_size(10.0, 1.0, 0.5)
                .with_param(params::ROTATION, 45.0)
        };
        let items = config(vec![diagonal(0, 10.0, 10.0), diagonal(1, 11.5, 11.5)]);

        let bbox = Validator::new(&guide).validate(&items);
        assert_eq!(bbox.report.problem_count(), 1);

        let exact = Validator::new(&guide)
            .with_options(ValidatorOptions {
                overlap_mode: OverlapMode::Exact,
                ..ValidatorOptions::default()
            })
            .validate(&items);
        assert!(exact.report.is_clean());
    }
}
