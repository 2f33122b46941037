use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a merge run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Fraction of each vertex's offset from the reference centroid that the
    /// expansion passes push it outward by.
    pub expansion_factor: f64,

    /// A pair needs at least this many invalid points (counted per ring
    /// vertex) before stitching is attempted.
    pub min_invalid_points: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { expansion_factor: 0.01, min_invalid_points: 4 }
    }
}

impl MergeConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.expansion_factor.is_finite() && self.expansion_factor > 0.0) {
            bail!("expansion_factor must be a positive number, got {}", self.expansion_factor);
        }
        if self.min_invalid_points < 1 {
            bail!("min_invalid_points must be at least 1");
        }
        Ok(())
    }
}
