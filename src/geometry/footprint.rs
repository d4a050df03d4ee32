//! Item footprints on the arena floor.
//!
//! Animal-AI positions an item by the centre of its lower base and rotates it
//! about the vertical axis only, so every item projects onto the x-z plane as
//! a (possibly rotated) rectangle or, for goals, a circle. The vertical
//! extent is kept alongside so stacked items can be told apart from
//! intersecting ones.

use nalgebra::{Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Proportion of the short arm of the L/U/J objects relative to their extent.
const SMALL_RATIO: f64 = 0.25;
/// Proportion of the long arm of the L/U/J objects relative to their extent.
const LARGE_RATIO: f64 = 0.75;
/// Segments used when approximating a circle outline.
const CIRCLE_SEGMENTS: usize = 32;

/// Rotates `point` clockwise by `angle_deg` about `center`.
///
/// Floor points keep Animal-AI's x in `x` and Animal-AI's z (depth) in `y`.
/// Rotations are clockwise when the arena is viewed from above with x to the
/// right and z pointing up.
#[must_use]
pub fn rotate_clockwise(point: Point2<f64>, angle_deg: f64, center: Point2<f64>) -> Point2<f64> {
    center + Rotation2::new(-angle_deg.to_radians()) * (point - center)
}

/// Length of the overlap between two segments on the same line.
///
/// Segment endpoints may be given in either order. Disjoint or touching
/// segments overlap by zero.
#[must_use]
pub fn segment_overlap(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (start_a, stop_a) = (a.0.min(a.1), a.0.max(a.1));
    let (start_b, stop_b) = (b.0.min(b.1), b.0.max(b.1));
    (stop_a.min(stop_b) - start_a.max(start_b)).max(0.0)
}

/// Outline family of an item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootprintShape {
    /// Plain rectangle (walls, boxes, ramps, tunnels, zones)
    #[default]
    Rectangle,
    /// Circle whose diameter is the larger horizontal extent (goals)
    Circle,
    /// L-shaped object
    LBlock,
    /// U-shaped object
    UBlock,
    /// Mirrored L-shaped object
    JBlock,
}

impl FootprintShape {
    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::LBlock => "l-block",
            Self::UBlock => "u-block",
            Self::JBlock => "j-block",
        }
    }
}

/// Axis-aligned bounding box on the arena floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Lower-left corner
    pub min: Point2<f64>,
    /// Upper-right corner
    pub max: Point2<f64>,
}

impl Aabb {
    /// Creates a box from two corners, ordering them per axis.
    #[must_use]
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Bounding box of a set of points, or `None` if there are none.
    #[must_use]
    pub fn from_points(points: &[Point2<f64>]) -> Option<Self> {
        let first = points.first()?;
        Some(
            points[1..]
                .iter()
                .fold(Self::new(*first, *first), |aabb, point| Self {
                    min: aabb.min.inf(point),
                    max: aabb.max.sup(point),
                }),
        )
    }

    /// Penetration depth between two boxes.
    ///
    /// This is the smaller of the per-axis overlaps, i.e. the distance one box
    /// must move to clear the other. Zero when the boxes are disjoint or only
    /// touch.
    #[must_use]
    pub fn overlap_depth(&self, other: &Self) -> f64 {
        let along_x = segment_overlap((self.min.x, self.max.x), (other.min.x, other.max.x));
        let along_z = segment_overlap((self.min.y, self.max.y), (other.min.y, other.max.y));
        along_x.min(along_z)
    }

    /// True when the boxes overlap by more than `tolerance`.
    #[must_use]
    pub fn intersects(&self, other: &Self, tolerance: f64) -> bool {
        self.overlap_depth(other) > tolerance
    }
}

/// The space an item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Centre of the lower base on the floor plane
    pub center: Point2<f64>,
    /// Extent along the item's local x axis
    pub length: f64,
    /// Extent along the item's local z axis
    pub width: f64,
    /// Clockwise yaw in degrees
    pub rotation: f64,
    /// Height of the lower base above the floor
    pub base: f64,
    /// Vertical extent
    pub height: f64,
    /// Outline family
    pub shape: FootprintShape,
}

impl Footprint {
    /// Creates a flat footprint resting on the floor.
    #[must_use]
    pub const fn new(
        center: Point2<f64>,
        length: f64,
        width: f64,
        rotation: f64,
        shape: FootprintShape,
    ) -> Self {
        Self {
            center,
            length,
            width,
            rotation,
            base: 0.0,
            height: 0.0,
            shape,
        }
    }

    /// Sets the vertical placement.
    #[must_use]
    pub const fn with_vertical(mut self, base: f64, height: f64) -> Self {
        self.base = base;
        self.height = height;
        self
    }

    /// Radius used for circular footprints.
    #[must_use]
    pub fn radius(&self) -> f64 {
        0.5 * self.length.abs().max(self.width.abs())
    }

    /// The vertical segment `[base, base + height]`.
    #[must_use]
    pub fn vertical_extent(&self) -> (f64, f64) {
        (self.base, self.base + self.height)
    }

    /// Corners of the rotated bounding rectangle.
    ///
    /// Returned in the order top-left, top-right, bottom-right, bottom-left of
    /// the un-rotated rectangle.
    #[must_use]
    pub fn vertices(&self) -> [Point2<f64>; 4] {
        let [a, b, c, d] = self.local_rectangle();
        [a, b, c, d].map(|corner| rotate_clockwise(corner, self.rotation, self.center))
    }

    /// Outline used for drawing and hit-testing.
    ///
    /// Rectangles return their four corners, circles a regular polygon, and
    /// the L/U/J objects their concave outline.
    #[must_use]
    pub fn outline(&self) -> Vec<Point2<f64>> {
        let local = match self.shape {
            FootprintShape::Rectangle => self.local_rectangle().to_vec(),
            FootprintShape::Circle => return self.circle_outline(),
            FootprintShape::LBlock => self.local_l_block(),
            FootprintShape::UBlock => self.local_u_block(),
            FootprintShape::JBlock => self.local_j_block(),
        };
        local
            .into_iter()
            .map(|corner| rotate_clockwise(corner, self.rotation, self.center))
            .collect()
    }

    /// Axis-aligned bounding box of the footprint.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        if self.shape == FootprintShape::Circle {
            let reach = Vector2::repeat(self.radius());
            return Aabb::new(self.center - reach, self.center + reach);
        }
        let vertices = self.vertices();
        Aabb::from_points(&vertices).unwrap_or_else(|| Aabb::new(self.center, self.center))
    }

    /// True when `point` lies inside the footprint outline.
    #[must_use]
    pub fn contains(&self, point: Point2<f64>) -> bool {
        if self.shape == FootprintShape::Circle {
            return nalgebra::distance(&point, &self.center) <= self.radius();
        }
        point_in_polygon(point, &self.outline())
    }

    fn local_rectangle(&self) -> [Point2<f64>; 4] {
        let half_length = 0.5 * self.length;
        let half_width = 0.5 * self.width;
        let c = self.center;
        [
            c + Vector2::new(-half_length, half_width),
            c + Vector2::new(half_length, half_width),
            c + Vector2::new(half_length, -half_width),
            c + Vector2::new(-half_length, -half_width),
        ]
    }

    fn local_l_block(&self) -> Vec<Point2<f64>> {
        let [a, b, _, d] = self.local_rectangle();
        let c1 = b + Vector2::new(0.0, -SMALL_RATIO * self.width);
        let c2 = c1 + Vector2::new(-LARGE_RATIO * self.length, 0.0);
        let c3 = Point2::new(c2.x, d.y);
        vec![a, b, c1, c2, c3, d]
    }

    fn local_u_block(&self) -> Vec<Point2<f64>> {
        let [a, b, c, d] = self.local_rectangle();
        let c2 = c + Vector2::new(-SMALL_RATIO * self.length, 0.0);
        let c3 = c2 + Vector2::new(0.0, LARGE_RATIO * self.width);
        let c4 = c3 + Vector2::new(-0.5 * self.length, 0.0);
        let c5 = c4 + Vector2::new(0.0, -LARGE_RATIO * self.width);
        vec![a, b, c, c2, c3, c4, c5, d]
    }

    fn local_j_block(&self) -> Vec<Point2<f64>> {
        let [a, _, c, d] = self.local_rectangle();
        let b1 = a + Vector2::new(SMALL_RATIO * self.length, 0.0);
        let b2 = b1 + Vector2::new(0.0, -LARGE_RATIO * self.width);
        let b3 = b2 + Vector2::new(LARGE_RATIO * self.length, 0.0);
        vec![a, b1, b2, b3, c, d]
    }

    fn circle_outline(&self) -> Vec<Point2<f64>> {
        let r = self.radius();
        (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
                self.center + Rotation2::new(angle) * Vector2::new(r, 0.0)
            })
            .collect()
    }
}

/// Even-odd ray casting test.
fn point_in_polygon(point: Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for (i, current) in polygon.iter().enumerate() {
        let previous = polygon[j];
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing =
                (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y)
                    + current.x;
            if point.x < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
