//! Geometric primitives for single-ring zone outlines.
//!
//! Rings are plain ordered vertex lists in lon/lat. Nothing here is indexed
//! or cached; every predicate is a straight scan over the vertices.

pub mod expand;
pub mod kernel;
pub mod measure;
pub mod ring;

pub use expand::{scale_about, stretch_x, stretch_y, Expansion};
pub use kernel::{on_segment, orientation, point_in_ring, segments_intersect, Orientation, FAR_X};
pub use measure::{centroid, haversine_distance, pair_centroid, signed_area, unsigned_area, EARTH_RADIUS_MILES};
pub use ring::{Point, Ring, RingError};
