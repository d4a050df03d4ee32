//! Pairwise overlap detection between items of one arena.

use crate::geometry::{segment_overlap, separating_axis_test, Footprint};
use crate::validator::checker::ResolvedItem;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which intersection test decides whether two footprints overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapMode {
    /// Axis-aligned bounding boxes of the rotated footprints
    #[default]
    BoundingBox,
    /// Separating axis test on the rotated rectangles and goal circles
    Exact,
}

impl fmt::Display for OverlapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundingBox => write!(f, "bounding-box"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

impl std::str::FromStr for OverlapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bounding-box" | "bbox" => Ok(Self::BoundingBox),
            "exact" | "sat" => Ok(Self::Exact),
            other => Err(format!(
                "unknown overlap mode '{other}' (expected 'bounding-box' or 'exact')"
            )),
        }
    }
}

/// One overlapping pair, `first < second`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapFinding {
    /// Lower item index
    pub first: usize,
    /// Higher item index
    pub second: usize,
    /// Penetration depth on the floor plane
    pub depth: f64,
    /// Minimum translation moving `second` clear of `first` (exact mode only)
    pub translation: Option<Vector2<f64>>,
}

/// Tests two footprints for overlap.
///
/// Returns the penetration depth (and, in exact mode, the minimum
/// translation vector) when they overlap by more than `tolerance`. Items
/// whose vertical extents do not intersect are stacked, not overlapping.
#[must_use]
pub fn overlap_between(
    a: &Footprint,
    b: &Footprint,
    mode: OverlapMode,
    tolerance: f64,
) -> Option<(f64, Option<Vector2<f64>>)> {
    if segment_overlap(a.vertical_extent(), b.vertical_extent()) <= tolerance {
        return None;
    }

    match mode {
        OverlapMode::BoundingBox => {
            let (box_a, box_b) = (a.bounding_box(), b.bounding_box());
            box_a
                .intersects(&box_b, tolerance)
                .then(|| (box_a.overlap_depth(&box_b), None))
        }
        OverlapMode::Exact => separating_axis_test(a, b, tolerance)
            .map(|separation| (separation.depth, Some(separation.translation()))),
    }
}

/// Finds every overlapping pair of items placed in the same arena.
///
/// Each pair is reported once. Items without a footprint (unknown type or
/// no position) are skipped.
#[must_use]
pub fn find_overlaps(
    items: &[ResolvedItem],
    mode: OverlapMode,
    tolerance: f64,
) -> Vec<OverlapFinding> {
    let placed: Vec<(&ResolvedItem, &Footprint)> = items
        .iter()
        .filter_map(|item| item.footprint.as_ref().map(|footprint| (item, footprint)))
        .collect();

    let mut findings = Vec::new();
    for (i, (a, footprint_a)) in placed.iter().enumerate() {
        for (b, footprint_b) in &placed[i + 1..] {
            if a.arena != b.arena {
                continue;
            }
            if let Some((depth, translation)) =
                overlap_between(footprint_a, footprint_b, mode, tolerance)
            {
                let (first, second) = if a.index < b.index {
                    (a.index, b.index)
                } else {
                    (b.index, a.index)
                };
                findings.push(OverlapFinding {
                    first,
                    second,
                    depth,
                    translation,
                });
            }
        }
    }
    findings
}
