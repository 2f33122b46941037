use serde::Serialize;
use thiserror::Error;

/// Why a pair of rings could not be merged.
///
/// None of these are fatal to a run: the pair is reported, remembered as
/// non-touching, and skipped on later passes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// No expansion variant makes the two footprints overlap.
    #[error("rings do not touch under any expansion")]
    NotAdjacent,

    /// The rings overlap, but too few vertices sit on a shared border.
    #[error("only {found} invalid points found, need at least {required}")]
    TooFewInvalidPoints { found: usize, required: usize },

    /// The walk kept detouring between the rings without closing.
    #[error("traversal walked more than {limit} vertices without closing the outline")]
    DetourLoop { limit: usize },

    /// Every vertex of the other ring is invalid, so there is nowhere to detour to.
    #[error("no valid vertex on the other ring to detour to")]
    NoDetourTarget,

    /// The walk closed too early and produced a suspiciously small outline.
    /// Both counts are of the closed outline (start vertex repeated).
    #[error("merged outline closes with {vertices} vertices, need at least {required}")]
    Undersized { vertices: usize, required: usize },
}

/// Coarse classification of a [`MergeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeErrorKind {
    /// The pair is not adjacent.
    Infeasible,
    /// Stitching started but a guard stopped it.
    Aborted,
}

impl MergeError {
    pub fn kind(&self) -> MergeErrorKind {
        match self {
            MergeError::NotAdjacent | MergeError::TooFewInvalidPoints { .. } => MergeErrorKind::Infeasible,
            MergeError::DetourLoop { .. }
            | MergeError::NoDetourTarget
            | MergeError::Undersized { .. } => MergeErrorKind::Aborted,
        }
    }
}
