//! Adjacency test and invalid-point classification.
//!
//! Both work on expanded copies of the rings (see `zonering::expand`): two
//! rings that share a border overlap slightly once pushed outward, and the
//! vertices that end up inside the other footprint are the shared ones.

use log::trace;
use zonering::{point_in_ring, Expansion, Ring};

/// Which of the two rings in a merge attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// True if any vertex of either ring lies inside (or on) the other.
pub fn overlaps(a: &Ring, b: &Ring) -> bool {
    a.iter().any(|&p| point_in_ring(b.points(), p))
        || b.iter().any(|&p| point_in_ring(a.points(), p))
}

/// Both rings scaled about their own centroids, then tested for overlap.
pub fn can_combine(a: &Ring, b: &Ring, factor: f64) -> bool {
    let (ea, eb) = Expansion::OwnCentroid.apply(a, b, factor);
    overlaps(&ea, &eb)
}

/// True if the expanded rings overlap under at least one expansion variant.
pub fn is_adjacent(a: &Ring, b: &Ring, factor: f64) -> bool {
    Expansion::ALL.into_iter().any(|variant| {
        let (ea, eb) = variant.apply(a, b, factor);
        overlaps(&ea, &eb)
    })
}

/// Vertices of either ring that lie on the shared border and must not appear
/// in the merged outline.
///
/// Flags are kept per ring vertex, not per coordinate: a location present in
/// both rings counts once for each ring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidPoints {
    a: Vec<bool>,
    b: Vec<bool>,
}

impl InvalidPoints {
    /// No vertex flagged.
    pub fn new(len_a: usize, len_b: usize) -> Self {
        Self { a: vec![false; len_a], b: vec![false; len_b] }
    }

    /// Union of the flags from all four expansion passes.
    pub fn classify(a: &Ring, b: &Ring, factor: f64) -> Self {
        let mut invalid = Self::new(a.len(), b.len());
        for variant in Expansion::ALL {
            let (ea, eb) = variant.apply(a, b, factor);
            let before = invalid.count();
            invalid.flag_pass(&ea, &eb);
            trace!("[merge] {} pass: {} new invalid points", variant.name(), invalid.count() - before);
        }
        invalid
    }

    /// Flag vertices from one pair of expanded rings.
    ///
    /// A vertex is flagged if its expanded copy is inside the other expanded
    /// ring, or if both of its neighbours are. The second rule closes single
    /// misses at the ends of a shared border.
    pub fn flag_pass(&mut self, expanded_a: &Ring, expanded_b: &Ring) {
        flag_ring(&mut self.a, expanded_a, expanded_b);
        flag_ring(&mut self.b, expanded_b, expanded_a);
    }

    #[inline] pub fn flag(&mut self, side: Side, i: usize) { self.flags_mut(side)[i] = true; }

    #[inline] pub fn contains(&self, side: Side, i: usize) -> bool { self.flags(side)[i] }

    #[inline]
    pub fn flags(&self, side: Side) -> &[bool] {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    #[inline]
    fn flags_mut(&mut self, side: Side) -> &mut [bool] {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Number of flagged vertices on one ring.
    pub fn count_on(&self, side: Side) -> usize {
        self.flags(side).iter().filter(|&&f| f).count()
    }

    /// Number of flagged vertices on both rings.
    pub fn count(&self) -> usize { self.count_on(Side::A) + self.count_on(Side::B) }
}

fn flag_ring(flags: &mut [bool], own: &Ring, other: &Ring) {
    let inside: Vec<bool> = own.iter().map(|&p| point_in_ring(other.points(), p)).collect();
    for i in 0..own.len() {
        if inside[i] || (inside[own.prev_index(i)] && inside[own.next_index(i)]) {
            flags[i] = true;
        }
    }
}
