use ahash::AHashSet;

use crate::zones::ZoneId;

/// Ordered pairs of zones already known not to merge in either direction.
///
/// Entries stay valid as long as both zones are unchanged, so they survive
/// restarts and are only dropped when one of the zones is retired.
#[derive(Debug, Default, Clone)]
pub struct PairMemo {
    pairs: AHashSet<(ZoneId, ZoneId)>,
}

impl PairMemo {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn contains(&self, a: &ZoneId, b: &ZoneId) -> bool {
        self.pairs.contains(&(a.clone(), b.clone()))
    }

    /// Record `(a, b)` and `(b, a)`.
    pub fn insert_both(&mut self, a: &ZoneId, b: &ZoneId) {
        self.pairs.insert((a.clone(), b.clone()));
        self.pairs.insert((b.clone(), a.clone()));
    }

    /// Drop every pair that names `id`.
    pub fn forget(&mut self, id: &ZoneId) {
        self.pairs.retain(|(a, b)| a != id && b != id);
    }

    #[inline] pub fn len(&self) -> usize { self.pairs.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.pairs.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_both_and_forget() {
        let (a, b, c) = (ZoneId::new("a"), ZoneId::new("b"), ZoneId::new("c"));
        let mut memo = PairMemo::new();
        memo.insert_both(&a, &b);
        memo.insert_both(&b, &c);
        assert!(memo.contains(&a, &b) && memo.contains(&b, &a));
        assert!(!memo.contains(&a, &c));
        assert_eq!(memo.len(), 4);

        memo.forget(&a);
        assert!(!memo.contains(&b, &a));
        assert!(memo.contains(&c, &b));
        assert_eq!(memo.len(), 2);
    }
}
