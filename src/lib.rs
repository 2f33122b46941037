#![doc = "Merge adjacent zone outlines into contiguous polygons"]
mod merge;
mod session;
mod zones;

#[doc(inline)]
pub use zonering::{Point, Ring, RingError};

#[doc(inline)]
pub use merge::{
    can_combine, farthest_index, is_adjacent, merge_pair, nearest_valid, overlaps, traverse,
    InvalidPoints, MergeConfig, MergeError, MergeErrorKind, Side,
};

#[doc(inline)]
pub use session::{load_candidates, Candidate, MergeRecord, MergeReport, MergeSession, PairMemo, Rejection};

#[doc(inline)]
pub use zones::{parse_ring, write_ring, DiskZones, MemZones, ZoneError, ZoneId, ZoneSink, ZoneSource, CRS84, EXTENSION};
