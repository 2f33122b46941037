//! Perturbed copies of rings, used to detect shared borders.
//!
//! Every vertex is pushed away from a reference centroid by `factor` times
//! its offset from that centroid (the tool uses `0.01`). This is not a buffer
//! operation: it only makes nearly-coincident borders overlap.

use crate::measure::pair_centroid;
use crate::ring::{Point, Ring};

/// The four expansion variants, run as independent classification passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expansion {
    /// Both rings scaled about the mean of their two centroids.
    SharedCentroid,
    /// Each ring scaled about its own centroid.
    OwnCentroid,
    /// Each ring stretched along y only, about its own centroid.
    Vertical,
    /// Each ring stretched along x only, about its own centroid.
    Horizontal,
}

impl Expansion {
    pub const ALL: [Expansion; 4] = [
        Expansion::SharedCentroid,
        Expansion::OwnCentroid,
        Expansion::Vertical,
        Expansion::Horizontal,
    ];

    /// Expanded copies of `a` and `b`, in that order.
    pub fn apply(self, a: &Ring, b: &Ring, factor: f64) -> (Ring, Ring) {
        match self {
            Expansion::SharedCentroid => {
                let center = pair_centroid(a, b);
                (scale_about(a, center, factor), scale_about(b, center, factor))
            }
            Expansion::OwnCentroid => (
                scale_about(a, a.centroid(), factor),
                scale_about(b, b.centroid(), factor),
            ),
            Expansion::Vertical => (stretch_y(a, factor), stretch_y(b, factor)),
            Expansion::Horizontal => (stretch_x(a, factor), stretch_x(b, factor)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Expansion::SharedCentroid => "shared-centroid",
            Expansion::OwnCentroid => "own-centroid",
            Expansion::Vertical => "vertical",
            Expansion::Horizontal => "horizontal",
        }
    }
}

/// Scale `ring` about `center` in both axes.
pub fn scale_about(ring: &Ring, center: Point, factor: f64) -> Ring {
    ring.map(|p| Point {
        x: p.x + factor * (p.x - center.x),
        y: p.y + factor * (p.y - center.y),
    })
}

/// Stretch `ring` along x about its own centroid; y is unchanged.
pub fn stretch_x(ring: &Ring, factor: f64) -> Ring {
    let c = ring.centroid();
    ring.map(|p| Point { x: p.x + factor * (p.x - c.x), y: p.y })
}

/// Stretch `ring` along y about its own centroid; x is unchanged.
pub fn stretch_y(ring: &Ring, factor: f64) -> Ring {
    let c = ring.centroid();
    ring.map(|p| Point { x: p.x, y: p.y + factor * (p.y - c.y) })
}
