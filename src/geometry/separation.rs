//! Separating axis test between footprints.
//!
//! Two convex shapes are disjoint if and only if there is an axis on which
//! their projections do not overlap. For rectangles only the edge normals of
//! both shapes need checking; a circle adds the axis towards the nearest
//! polygon vertex (or towards the other circle's centre).
//!
//! L/U/J objects are tested with their bounding rectangle, which keeps the
//! shapes convex.

use crate::geometry::footprint::{segment_overlap, Footprint, FootprintShape};
use nalgebra::{Rotation2, Vector2};

/// Minimum translation needed to separate two overlapping footprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    /// Overlap distance along `axis`
    pub depth: f64,
    /// Unit axis, oriented from the first footprint towards the second
    pub axis: Vector2<f64>,
}

impl Separation {
    /// The minimum translation vector (`axis * depth`).
    #[must_use]
    pub fn translation(&self) -> Vector2<f64> {
        self.axis * self.depth
    }
}

/// Tests two footprints for overlap on the floor plane.
///
/// Returns `None` when some axis separates the shapes by more than
/// `-tolerance` (touching counts as separated), otherwise the axis with the
/// smallest overlap. Vertical extents are not considered here.
#[must_use]
pub fn separating_axis_test(a: &Footprint, b: &Footprint, tolerance: f64) -> Option<Separation> {
    let mut best: Option<Separation> = None;

    for axis in candidate_axes(a, b) {
        let overlap = segment_overlap(project(a, &axis), project(b, &axis));
        if overlap <= tolerance {
            return None;
        }
        if best.map_or(true, |current| overlap < current.depth) {
            best = Some(Separation {
                depth: overlap,
                axis,
            });
        }
    }

    best.map(|separation| orient(separation, a, b))
}

/// Edge normals of a rectangle rotated clockwise by `rotation` degrees.
fn rectangle_axes(rotation: f64) -> [Vector2<f64>; 2] {
    let turn = Rotation2::new(-rotation.to_radians());
    [turn * Vector2::x(), turn * Vector2::y()]
}

fn candidate_axes(a: &Footprint, b: &Footprint) -> Vec<Vector2<f64>> {
    let mut axes: Vec<Vector2<f64>> = Vec::with_capacity(4);

    let mut push = |axis: Vector2<f64>| {
        // Parallel axes give identical projections
        let duplicate = axes.iter().any(|existing| existing.perp(&axis).abs() < 1e-12);
        if !duplicate {
            axes.push(axis);
        }
    };

    for footprint in [a, b] {
        if footprint.shape != FootprintShape::Circle {
            for axis in rectangle_axes(footprint.rotation) {
                push(axis);
            }
        }
    }

    match (a.shape == FootprintShape::Circle, b.shape == FootprintShape::Circle) {
        (true, true) => {
            let axis = (b.center - a.center)
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(Vector2::x);
            push(axis);
        }
        (true, false) => push(circle_to_polygon_axis(a, b)),
        (false, true) => push(circle_to_polygon_axis(b, a)),
        (false, false) => {}
    }

    axes
}

/// Axis from the circle centre to the closest polygon vertex.
fn circle_to_polygon_axis(circle: &Footprint, polygon: &Footprint) -> Vector2<f64> {
    polygon
        .vertices()
        .iter()
        .map(|vertex| vertex - circle.center)
        .min_by(|lhs, rhs| lhs.norm().total_cmp(&rhs.norm()))
        .and_then(|offset| offset.try_normalize(f64::EPSILON))
        .unwrap_or_else(Vector2::x)
}

/// Projects a footprint onto a unit axis.
fn project(footprint: &Footprint, axis: &Vector2<f64>) -> (f64, f64) {
    if footprint.shape == FootprintShape::Circle {
        let centre = footprint.center.coords.dot(axis);
        let r = footprint.radius();
        return (centre - r, centre + r);
    }
    footprint
        .vertices()
        .iter()
        .map(|vertex| vertex.coords.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
            (min.min(d), max.max(d))
        })
}

fn orient(separation: Separation, a: &Footprint, b: &Footprint) -> Separation {
    if (b.center - a.center).dot(&separation.axis) < 0.0 {
        Separation {
            depth: separation.depth,
            axis: -separation.axis,
        }
    } else {
        separation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    const TOLERANCE: f64 = 1e-8;

    fn rect(x: f64, z: f64, length: f64, width: f64, rotation: f64) -> Footprint {
        Footprint::new(
            Point2::new(x, z),
            length,
            width,
            rotation,
            FootprintShape::Rectangle,
        )
    }

    fn circle(x: f64, z: f64, diameter: f64) -> Footprint {
        Footprint::new(
            Point2::new(x, z),
            diameter,
            diameter,
            0.0,
            FootprintShape::Circle,
        )
    }

    #[test]
    fn test_identical_rotated_rectangles_overlap() {
        let a = rect(2.0, 3.5, 1.0, 2.0, 315.0);
        let b = rect(2.0, 3.5, 2.0, 2.0, 325.0);
        assert!(separating_axis_test(&a, &b, TOLERANCE).is_some());
    }

    #[test]
    fn test_far_apart_rectangles_do_not_overlap() {
        let a = rect(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect(10.0, 10.0, 2.0, 2.0, 0.0);
        assert!(separating_axis_test(&a, &b, TOLERANCE).is_none());
    }

    #[test]
    fn test_mtv_points_from_first_to_second() {
        let a = rect(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect(1.5, 0.0, 2.0, 2.0, 0.0);
        let separation = separating_axis_test(&a, &b, TOLERANCE).unwrap();
        assert!((separation.depth - 0.5).abs() < 1e-9);
        let mtv = separation.translation();
        assert!((mtv.x - 0.5).abs() < 1e-9);
        assert!(mtv.y.abs() < 1e-9);
    }

    #[test]
    fn test_rotated_rectangles_with_overlapping_boxes_can_be_separate() {
        // Two thin diagonal walls side by side: their bounding boxes overlap
        // but the walls themselves do not.
        let a = rect(10.0, 10.0, 10.0, 0.5, 45.0);
        let b = rect(11.5, 11.5, 10.0, 0.5, 45.0);
        assert!(a.bounding_box().intersects(&b.bounding_box(), TOLERANCE));
        assert!(separating_axis_test(&a, &b, TOLERANCE).is_none());
    }

    #[test]
    fn test_touching_rectangles_are_separate() {
        let a = rect(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect(2.0, 0.0, 2.0, 2.0, 0.0);
        assert!(separating_axis_test(&a, &b, TOLERANCE).is_none());
    }

    #[test]
    fn test_circle_near_rectangle_corner() {
        let wall = rect(0.0, 0.0, 2.0, 2.0, 0.0);
        // Circle diagonal from the corner (1, 1): centre distance 1.13 > radius 1
        let goal = circle(1.8, 1.8, 2.0);
        assert!(wall.bounding_box().intersects(&goal.bounding_box(), TOLERANCE));
        assert!(separating_axis_test(&wall, &goal, TOLERANCE).is_none());

        let closer = circle(1.5, 1.5, 2.0);
        assert!(separating_axis_test(&wall, &closer, TOLERANCE).is_some());
    }

    #[test]
    fn test_rectangle_axes_follow_clockwise_rotation() {
        let [along, across] = rectangle_axes(90.0);
        assert!(along.x.abs() < 1e-12 && (along.y + 1.0).abs() < 1e-12);
        assert!((across.x - 1.0).abs() < 1e-12 && across.y.abs() < 1e-12);
    }

    #[test]
    fn test_circles() {
        let a = circle(0.0, 0.0, 2.0);
        let b = circle(1.0, 1.0, 2.0);
        let c = circle(3.0, 0.0, 2.0);
        assert!(separating_axis_test(&a, &b, TOLERANCE).is_some());
        assert!(separating_axis_test(&a, &c, TOLERANCE).is_none());
    }
}
