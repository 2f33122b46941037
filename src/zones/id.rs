use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};

/// Stable name of a zone: the file stem of its source, e.g. "north_ward".
/// Cheap to clone; used as the key of the non-touching memo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(Arc<str>);

impl ZoneId {
    pub fn new(id: impl AsRef<str>) -> Self { Self(Arc::from(id.as_ref())) }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }

    /// Name of the zone produced by merging `a` into `b`: the two names
    /// concatenated, first operand first.
    pub fn joined(a: &ZoneId, b: &ZoneId) -> ZoneId {
        ZoneId(Arc::from(format!("{}{}", a.0, b.0)))
    }

    /// `self` with a numeric suffix, for avoiding collisions with existing names.
    pub fn with_suffix(&self, n: usize) -> ZoneId {
        ZoneId(Arc::from(format!("{}_{}", self.0, n)))
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self { ZoneId::new(s) }
}

impl Serialize for ZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_concatenates_in_order() {
        let a = ZoneId::new("east");
        let b = ZoneId::new("west");
        assert_eq!(ZoneId::joined(&a, &b).as_str(), "eastwest");
        assert_eq!(ZoneId::joined(&b, &a).as_str(), "westeast");
    }

    #[test]
    fn suffix_and_display() {
        let id = ZoneId::from("ab");
        assert_eq!(id.with_suffix(2).to_string(), "ab_2");
        assert_eq!(format!("{id}"), "ab");
    }
}
