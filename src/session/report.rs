use std::{fmt, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::merge::MergeErrorKind;
use crate::zones::ZoneId;

/// Outcome of a merge run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MergeReport {
    /// Number of scans over the candidate set, including the final one that
    /// found nothing to merge.
    pub passes: usize,
    pub merges: Vec<MergeRecord>,
    pub rejections: Vec<Rejection>,
    /// Zones left after the run, in merge order.
    pub remaining: Vec<ZoneId>,
}

/// A successful merge of `a` and `b` into `merged`.
#[derive(Debug, Clone, Serialize)]
pub struct MergeRecord {
    pub a: ZoneId,
    pub b: ZoneId,
    pub merged: ZoneId,
    pub vertices: usize,
}

/// A pair that failed in both directions and was memoized.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub a: ZoneId,
    pub b: ZoneId,
    /// Kind of the failure walking `a` first.
    pub kind: MergeErrorKind,
    /// Kind of the failure walking `b` first.
    pub reversed_kind: MergeErrorKind,
    pub reason: String,
}

impl MergeReport {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).context("Failed to serialize merge report")?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write report {}", path.display()))
    }

    /// Rejections where stitching was stopped by a guard in either direction.
    pub fn aborted(&self) -> impl Iterator<Item = &Rejection> {
        self.rejections.iter()
            .filter(|r| r.kind == MergeErrorKind::Aborted || r.reversed_kind == MergeErrorKind::Aborted)
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "passes:     {}", self.passes)?;
        writeln!(f, "merges:     {}", self.merges.len())?;
        for m in &self.merges {
            writeln!(f, "  {} + {} -> {} ({} vertices)", m.a, m.b, m.merged, m.vertices)?;
        }
        writeln!(f, "rejections: {} ({} aborted)", self.rejections.len(), self.aborted().count())?;
        write!(f, "remaining:  {}", self.remaining.len())
    }
}
