use std::fmt;

use geo::{Coord, LineString, Polygon};
use thiserror::Error;

use crate::measure;

/// A vertex in lon/lat. Equality is by coordinate value.
pub type Point = Coord<f64>;

/// Errors that can occur when constructing a `Ring`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RingError {
    /// Fewer than three distinct vertices after dropping the closing point.
    #[error("ring needs at least 3 vertices, got {0}")]
    TooFewPoints(usize),
    /// A coordinate is NaN or infinite.
    #[error("ring vertex {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// A single closed, simple outer boundary.
///
/// The vertex list is *not* explicitly closed: the first point is never
/// repeated at the end. Winding order is whatever the source used.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Build a ring from an ordered vertex list.
    ///
    /// A trailing copy of the first vertex (the GeoJSON closing point) is
    /// dropped before the length check.
    pub fn new(mut points: Vec<Point>) -> Result<Self, RingError> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if let Some(index) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(RingError::NonFinite { index });
        }
        if points.len() < 3 {
            return Err(RingError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    /// Number of vertices (closing point excluded).
    #[inline] pub fn len(&self) -> usize { self.points.len() }

    /// Always false for a constructed ring; present for API symmetry.
    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }

    #[inline] pub fn points(&self) -> &[Point] { &self.points }

    #[inline] pub fn get(&self, i: usize) -> Point { self.points[i] }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ { self.points.iter() }

    /// Index of the vertex before `i`, wrapping to the last vertex.
    #[inline] pub fn prev_index(&self, i: usize) -> usize { if i == 0 { self.len() - 1 } else { i - 1 } }

    /// Index of the vertex after `i`, wrapping to the first vertex.
    #[inline] pub fn next_index(&self, i: usize) -> usize { if i + 1 == self.len() { 0 } else { i + 1 } }

    /// Arithmetic mean of the vertex coordinates.
    #[inline] pub fn centroid(&self) -> Point { measure::centroid(&self.points) }

    /// Shoelace area, always non-negative.
    #[inline] pub fn area(&self) -> f64 { measure::unsigned_area(&self.points) }

    /// Shoelace area with sign; positive for counter-clockwise rings.
    #[inline] pub fn signed_area(&self) -> f64 { measure::signed_area(&self.points) }

    /// The same outline walked in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Apply `f` to every vertex, keeping the vertex count.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self { points: self.points.iter().copied().map(f).collect() }
    }

    /// Closed exterior ring as a `geo::Polygon` without holes.
    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.points.clone()), vec![])
    }
}

impl TryFrom<LineString<f64>> for Ring {
    type Error = RingError;

    fn try_from(ls: LineString<f64>) -> Result<Self, Self::Error> { Ring::new(ls.0) }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ring({} vertices)", self.len())
    }
}
