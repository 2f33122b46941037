mod classify;
mod config;
mod error;
mod stitch;

pub use classify::{can_combine, is_adjacent, overlaps, InvalidPoints, Side};
pub use config::MergeConfig;
pub use error::{MergeError, MergeErrorKind};
pub use stitch::{farthest_index, merge_pair, nearest_valid, traverse};
