use crate::ring::{Point, Ring};

/// Earth radius used by [`haversine_distance`], in miles.
///
/// Distances are only ever compared with each other, so the unit is
/// irrelevant to callers.
pub const EARTH_RADIUS_MILES: f64 = 3958.76;

/// Arithmetic mean of the vertex coordinates (not the area centroid).
pub fn centroid(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point { x: sx / n, y: sy / n }
}

/// Mean of the two rings' own centroids.
///
/// Each ring weighs the same regardless of how many vertices it has.
pub fn pair_centroid(a: &Ring, b: &Ring) -> Point {
    let ca = a.centroid();
    let cb = b.centroid();
    Point { x: (ca.x + cb.x) / 2.0, y: (ca.y + cb.y) / 2.0 }
}

/// Shoelace sum over consecutive vertices, wrapping last to first.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    let mut a = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        a += p.x * q.y - q.x * p.y;
    }
    a / 2.0
}

#[inline]
pub fn unsigned_area(points: &[Point]) -> f64 { signed_area(points).abs() }

/// Great-circle distance between two lon/lat points, in miles.
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    let lat1 = p1.y.to_radians();
    let lat2 = p2.y.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (p2.x - p1.x).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}
