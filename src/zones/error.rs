use thiserror::Error;

use super::ZoneId;

/// Failures reading a zone from its source.
///
/// A malformed zone aborts the whole run: the candidate set cannot be
/// trusted without it.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("malformed zone {id}: {reason}")]
    Malformed { id: ZoneId, reason: String },

    #[error("zone {0} not found")]
    Missing(ZoneId),
}
