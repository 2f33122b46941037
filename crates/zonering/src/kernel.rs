//! Orientation, segment intersection and ray-cast containment.
//!
//! These predicates use exact floating-point comparisons against zero. They
//! are fragile for near-degenerate input; callers compensate by running
//! several perturbed tests (see [`crate::expand`]).

use crate::ring::Point;

/// Abscissa of the ray-cast end point. Far beyond any lon/lat extent.
pub const FAR_X: f64 = 10_000.0;

/// Turn direction of an ordered point triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of `(p, q, r)` from the sign of `(q - p) x (r - q)`.
///
/// Only an exact zero is collinear.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// True if `q` lies in the bounding box of segment `p`-`r`.
///
/// Only meaningful when the three points are already known to be collinear.
#[inline]
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// True if segment `p1`-`q1` intersects segment `p2`-`q2` (touching counts).
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear cases: an end point lies on the other segment.
    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Ray-cast containment test against an unclosed vertex list.
///
/// Casts a horizontal ray from `p` to `(FAR_X, p.y)` and counts crossed
/// edges. The first edge found collinear with `p` decides the answer on its
/// own: inside if `p` lies on that edge, outside otherwise. Boundary points
/// are therefore inside. Fewer than three vertices is always outside.
pub fn point_in_ring(ring: &[Point], p: Point) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let extreme = Point { x: FAR_X, y: p.y };
    let mut count = 0usize;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if segments_intersect(a, b, p, extreme) {
            if orientation(a, p, b) == Orientation::Collinear {
                return on_segment(a, p, b);
            }
            count += 1;
        }
    }

    count % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn orientation_signs() {
        let p = coord! { x: 0.0, y: 0.0 };
        let q = coord! { x: 1.0, y: 0.0 };
        assert_eq!(orientation(p, q, coord! { x: 2.0, y: 0.0 }), Orientation::Collinear);
        assert_eq!(orientation(p, q, coord! { x: 1.0, y: 1.0 }), Orientation::CounterClockwise);
        assert_eq!(orientation(p, q, coord! { x: 1.0, y: -1.0 }), Orientation::Clockwise);
    }

    #[test]
    fn crossing_and_disjoint_segments() {
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: 2.0, y: 2.0 };
        assert!(segments_intersect(a, b, coord! { x: 0.0, y: 2.0 }, coord! { x: 2.0, y: 0.0 }));
        assert!(!segments_intersect(a, b, coord! { x: 3.0, y: 0.0 }, coord! { x: 4.0, y: 1.0 }));
    }

    #[test]
    fn collinear_overlap_and_gap() {
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: 2.0, y: 0.0 };
        assert!(segments_intersect(a, b, coord! { x: 1.0, y: 0.0 }, coord! { x: 3.0, y: 0.0 }));
        assert!(!segments_intersect(a, b, coord! { x: 3.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 }));
    }

    #[test]
    fn touching_end_point_counts() {
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: 1.0, y: 1.0 };
        assert!(segments_intersect(a, b, b, coord! { x: 2.0, y: 0.0 }));
    }

    #[test]
    fn degenerate_ring_is_never_inside() {
        let line = [coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }];
        assert!(!point_in_ring(&line, coord! { x: 0.5, y: 0.5 }));
    }
}
