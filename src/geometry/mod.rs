//! Planar geometry for item footprints.
//!
//! Footprints, bounding boxes, and the separating axis test used by the
//! overlap checker and the renderers.

pub mod footprint;
pub mod separation;

pub use footprint::{rotate_clockwise, segment_overlap, Aabb, Footprint, FootprintShape};
pub use separation::{separating_axis_test, Separation};
