mod error;
mod geojson;
mod id;
mod source;

pub use error::ZoneError;
pub use geojson::{parse_ring, write_ring, CRS84};
pub use id::ZoneId;
pub use source::{DiskZones, MemZones, ZoneSink, ZoneSource, EXTENSION};
