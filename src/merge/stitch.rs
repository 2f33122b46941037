//! Boundary stitching: walk ring A, detour onto ring B across the shared
//! border, and come back, emitting the outline of the union.

use ahash::AHashSet;
use log::trace;
use zonering::{haversine_distance, Expansion, Point, Ring};

use super::classify::{is_adjacent, InvalidPoints, Side};
use super::config::MergeConfig;
use super::error::MergeError;

/// Index of the vertex of `a` belonging to the farthest-apart pair of
/// vertices between `a` and `b`.
///
/// Starting there keeps the first steps of the walk away from the shared
/// border. Ties keep the lowest index.
pub fn farthest_index(a: &Ring, b: &Ring) -> usize {
    let mut farthest = 0.0;
    let mut index = 0;
    for (m, &pa) in a.iter().enumerate() {
        for &pb in b.iter() {
            let d = haversine_distance(pa, pb);
            if d > farthest {
                farthest = d;
                index = m;
            }
        }
    }
    index
}

/// Vertex of `other` closest on average to `p0` and `p`, skipping vertices
/// flagged in `invalid` and any at zero distance.
pub fn nearest_valid(p: Point, p0: Point, other: &Ring, invalid: &[bool]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &q) in other.iter().enumerate() {
        if invalid[i] { continue }
        let d = (haversine_distance(p, q) + haversine_distance(p0, q)) / 2.0;
        if d > 0.0 && best.is_none_or(|(_, closest)| d < closest) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Hash key for value equality of coordinates (`-0.0` and `0.0` collapse).
#[inline]
fn key(p: Point) -> (u64, u64) { ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits()) }

/// Walk both rings from `a[start]` and return the merged outline.
///
/// Each step advances along the current ring. A vertex already in the
/// outline is skipped. An invalid vertex is not emitted: the walk jumps to
/// the nearest valid vertex of the other ring and continues there. The walk
/// ends on returning to `a[start]`.
///
/// Every step that does not detour counts toward the walked length; more
/// than `a.len() + b.len()` steps means the walk is cycling between the
/// rings, and it is abandoned.
pub fn traverse(a: &Ring, b: &Ring, invalid: &InvalidPoints, start: usize) -> Result<Ring, MergeError> {
    let ring = |side: Side| match side {
        Side::A => a,
        Side::B => b,
    };
    let limit = a.len() + b.len();

    let first = a.get(start);
    let mut outline = vec![first];
    let mut seen = AHashSet::new();
    seen.insert(key(first));

    let mut walked = 1;
    let mut side = Side::A;
    let mut index = start;
    loop {
        let current = ring(side);
        index = current.next_index(index);
        if side == Side::A && index == start { break }

        if walked > limit {
            return Err(MergeError::DetourLoop { limit });
        }

        let p = current.get(index);
        if seen.contains(&key(p)) {
            walked += 1;
            continue;
        }

        if invalid.contains(side, index) {
            let p0 = current.get(current.prev_index(index));
            let other = ring(side.other());
            let target = nearest_valid(p, p0, other, invalid.flags(side.other()))
                .ok_or(MergeError::NoDetourTarget)?;
            trace!("[merge] detour {:?}[{}] -> {:?}[{}]", side, index, side.other(), target);
            side = side.other();
            // The next step advances onto the target itself.
            index = other.prev_index(target);
            continue;
        }

        walked += 1;
        seen.insert(key(p));
        outline.push(p);
    }

    // Measured on the closed outline, start vertex counted twice: at least
    // a triangle, and at least half of either input.
    let closed = outline.len() + 1;
    let required = 4.max(a.len().div_ceil(2)).max(b.len().div_ceil(2));
    if closed < required {
        return Err(MergeError::Undersized { vertices: closed, required });
    }

    Ring::new(outline).map_err(|_| MergeError::Undersized { vertices: closed, required })
}

/// Attempt to merge `b` into `a`.
///
/// `b` is walked in the same winding as `a` (reversed if needed). Returns
/// the union outline, not explicitly closed.
pub fn merge_pair(a: &Ring, b: &Ring, config: &MergeConfig) -> Result<Ring, MergeError> {
    let factor = config.expansion_factor;

    let aligned;
    let b = if (a.signed_area() > 0.0) != (b.signed_area() > 0.0) {
        aligned = b.reversed();
        &aligned
    } else {
        b
    };

    if !is_adjacent(a, b, factor) {
        return Err(MergeError::NotAdjacent);
    }

    let invalid = InvalidPoints::classify(a, b, factor);
    if invalid.count() < config.min_invalid_points {
        return Err(MergeError::TooFewInvalidPoints {
            found: invalid.count(),
            required: config.min_invalid_points,
        });
    }

    let (ea, eb) = Expansion::SharedCentroid.apply(a, b, factor);
    let start = farthest_index(&ea, &eb);
    trace!("[merge] start at a[{}], {} invalid points", start, invalid.count());

    traverse(a, b, &invalid, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MergeErrorKind;
    use geo::coord;

    fn ring(points: &[(f64, f64)]) -> Ring {
        Ring::new(points.iter().map(|&(x, y)| coord! { x: x, y: y }).collect()).unwrap()
    }

    fn square(x0: f64, y0: f64) -> Ring {
        ring(&[(x0, y0), (x0 + 1.0, y0), (x0 + 1.0, y0 + 1.0), (x0, y0 + 1.0)])
    }

    /// True if `got` is `expected` up to the choice of starting vertex.
    fn same_cycle(got: &Ring, expected: &Ring) -> bool {
        let n = expected.len();
        got.len() == n && (0..n).any(|k| (0..n).all(|i| got.get((i + k) % n) == expected.get(i)))
    }

    #[test]
    fn edge_sharing_squares_merge_into_rectangle() {
        let merged = merge_pair(&square(0.0, 0.0), &square(1.0, 0.0), &MergeConfig::default()).unwrap();
        let rect = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        assert!(same_cycle(&merged, &rect), "got {:?}", merged.points());
        assert_eq!(merged.area(), 2.0);
    }

    #[test]
    fn reversed_pair_also_merges() {
        let merged = merge_pair(&square(1.0, 0.0), &square(0.0, 0.0), &MergeConfig::default()).unwrap();
        let rect = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        assert!(same_cycle(&merged, &rect), "got {:?}", merged.points());
    }

    #[test]
    fn opposite_winding_is_aligned() {
        let b = square(1.0, 0.0).reversed();
        let merged = merge_pair(&square(0.0, 0.0), &b, &MergeConfig::default()).unwrap();
        let rect = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        assert!(same_cycle(&merged, &rect), "got {:?}", merged.points());
    }

    #[test]
    fn extra_vertices_on_shared_edge_still_merge() {
        // Nine vertices on a, five of them on the shared edge. The union has
        // four distinct vertices, five once closed, which is half of nine.
        let a = ring(&[
            (0.0, 0.0), (1.0, 0.0), (1.0, 0.1), (1.0, 0.2), (1.0, 0.4),
            (1.0, 0.6), (1.0, 0.8), (1.0, 1.0), (0.0, 1.0),
        ]);
        let b = square(1.0, 0.0);
        let rect = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);

        let merged = merge_pair(&a, &b, &MergeConfig::default()).unwrap();
        assert!(same_cycle(&merged, &rect), "got {:?}", merged.points());
        assert_eq!(merge_pair(&b, &a, &MergeConfig::default()).unwrap().len(), 4);
    }

    #[test]
    fn undersized_guard_counts_the_closing_vertex() {
        // With nothing flagged the walk emits a alone: a triangle, four
        // vertices once closed.
        let a = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let polygon = |n: usize| {
            let pts: Vec<(f64, f64)> = (0..n)
                .map(|k| {
                    let t = k as f64 * std::f64::consts::TAU / n as f64;
                    (20.0 + t.cos(), 20.0 + t.sin())
                })
                .collect();
            ring(&pts)
        };

        let b = polygon(8);
        let invalid = InvalidPoints::new(a.len(), b.len());
        assert_eq!(traverse(&a, &b, &invalid, 0).unwrap().len(), 3);

        let b = polygon(9);
        let invalid = InvalidPoints::new(a.len(), b.len());
        assert_eq!(
            traverse(&a, &b, &invalid, 0).unwrap_err(),
            MergeError::Undersized { vertices: 4, required: 5 },
        );
    }

    #[test]
    fn distant_squares_are_not_adjacent() {
        let err = merge_pair(&square(0.0, 0.0), &square(100.0, 0.0), &MergeConfig::default()).unwrap_err();
        assert_eq!(err, MergeError::NotAdjacent);
        assert_eq!(err.kind(), MergeErrorKind::Infeasible);
    }

    #[test]
    fn corner_touch_has_too_few_invalid_points() {
        let err = merge_pair(&square(0.0, 0.0), &square(1.0, 1.0), &MergeConfig::default()).unwrap_err();
        assert_eq!(err, MergeError::TooFewInvalidPoints { found: 2, required: 4 });
        assert_eq!(err.kind(), MergeErrorKind::Infeasible);
    }

    #[test]
    fn start_is_farthest_from_other_ring() {
        let a = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (-3.0, 1.0)]);
        let b = square(1.0, 0.0);
        assert_eq!(farthest_index(&a, &b), 3);
    }

    #[test]
    fn nearest_valid_skips_invalid_vertices() {
        let other = square(1.0, 0.0);
        let p0 = coord! { x: 0.0, y: 0.0 };
        let p = coord! { x: 1.0, y: 0.0 };
        assert_eq!(nearest_valid(p, p0, &other, &[false; 4]), Some(0));
        assert_eq!(nearest_valid(p, p0, &other, &[true, false, false, true]), Some(1));
        assert_eq!(nearest_valid(p, p0, &other, &[true; 4]), None);
    }

    #[test]
    fn nearest_valid_ignores_zero_distance() {
        let other = square(0.0, 0.0);
        let p = coord! { x: 0.0, y: 0.0 };
        // other[0] coincides with both p and p0.
        assert_eq!(nearest_valid(p, p, &other, &[false; 4]), Some(1));
    }

    #[test]
    fn early_return_to_start_is_undersized() {
        // Every vertex of a but the start is invalid. The detour lands on a
        // copy of the start vertex, and the next invalid vertex sends the
        // walk straight back to a[0].
        let a = square(0.0, 0.0);
        let b = ring(&[(0.0, 0.0), (5.0, 5.0), (6.0, 5.0), (5.0, 6.0)]);
        let mut invalid = InvalidPoints::new(4, 4);
        for i in 1..4 { invalid.flag(Side::A, i) }
        invalid.flag(Side::B, 1);

        let err = traverse(&a, &b, &invalid, 0).unwrap_err();
        assert_eq!(err, MergeError::Undersized { vertices: 2, required: 4 });
        assert_eq!(err.kind(), MergeErrorKind::Aborted);
    }

    #[test]
    fn alternating_detours_hit_the_loop_guard() {
        // a[2] detours to b[1], b[2] detours back to a[1], and both landing
        // vertices are already in the outline, so nothing new is ever emitted.
        let a = ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 5.0), (0.0, 5.0)]);
        let b = ring(&[(10.0, 10.0), (2.5, 0.0), (3.0, 0.0), (3.0, 1.0)]);
        let mut invalid = InvalidPoints::new(a.len(), b.len());
        invalid.flag(Side::A, 2);
        invalid.flag(Side::B, 2);

        let err = traverse(&a, &b, &invalid, 0).unwrap_err();
        assert_eq!(err, MergeError::DetourLoop { limit: 9 });
        assert_eq!(err.kind(), MergeErrorKind::Aborted);
    }

    #[test]
    fn detour_without_target_is_aborted() {
        let a = square(0.0, 0.0);
        let b = square(1.0, 0.0);
        let mut invalid = InvalidPoints::new(4, 4);
        invalid.flag(Side::A, 1);
        for i in 0..4 { invalid.flag(Side::B, i) }
        assert_eq!(traverse(&a, &b, &invalid, 0).unwrap_err(), MergeError::NoDetourTarget);
    }

    #[test]
    fn no_invalid_points_walks_ring_a_only() {
        let a = square(0.0, 0.0);
        let b = square(5.0, 5.0);
        let invalid = InvalidPoints::new(4, 4);
        let merged = traverse(&a, &b, &invalid, 2).unwrap();
        assert!(same_cycle(&merged, &a));
        assert_eq!(merged.get(0), a.get(2));
    }
}
