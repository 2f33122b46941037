use std::{collections::BTreeMap, fs, io::{ErrorKind, Write}, path::PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zonering::Ring;

use super::{geojson, ZoneError, ZoneId};

/// File extension of zone files in a directory store.
pub const EXTENSION: &str = "geojson";

/// Read access to the current zone set.
pub trait ZoneSource: Send + Sync {
    /// Ids of every zone currently in the store, in a stable order.
    fn ids(&self) -> Result<Vec<ZoneId>>;

    /// Outer ring of zone `id`.
    fn load(&self, id: &ZoneId) -> Result<Ring>;
}

/// Write access to the zone set.
///
/// Each call stands alone. A merge is one `publish` followed by two
/// `retire` calls, so a store shared with other readers (such as a
/// directory) briefly holds the merged zone alongside both inputs. Readers
/// may see redundant coverage but never lose any.
pub trait ZoneSink: Send + Sync {
    /// Add (or replace) zone `id`.
    fn publish(&mut self, id: &ZoneId, ring: &Ring) -> Result<()>;

    /// Remove zone `id`. Removing a zone that is already gone succeeds.
    fn retire(&mut self, id: &ZoneId) -> Result<()>;
}

/// A directory of `<id>.geojson` files, one polygon each.
pub struct DiskZones {
    root: PathBuf,
}

impl DiskZones {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    /// Like `new`, but fails if `root` is not an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            bail!("zone directory {} does not exist", root.display());
        }
        Ok(Self::new(root))
    }

    pub fn path_of(&self, id: &ZoneId) -> PathBuf { self.root.join(format!("{id}.{EXTENSION}")) }
}

impl ZoneSource for DiskZones {
    fn ids(&self) -> Result<Vec<ZoneId>> {
        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to list {}", self.root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str())
                .ok_or_else(|| anyhow!("zone file name is not valid UTF-8: {}", path.display()))?;
            ids.push(ZoneId::new(stem));
        }
        Ok(ids)
    }

    fn load(&self, id: &ZoneId) -> Result<Ring> {
        let path = self.path_of(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ZoneError::Missing(id.clone()).into()),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };
        let ring = geojson::parse_ring(&bytes)
            .map_err(|e| ZoneError::Malformed { id: id.clone(), reason: format!("{e:#}") })?;
        Ok(ring)
    }
}

impl ZoneSink for DiskZones {
    /// Writes to a temporary file in the same directory, then renames it
    /// into place so readers never see a partial zone.
    fn publish(&mut self, id: &ZoneId, ring: &Ring) -> Result<()> {
        let bytes = geojson::write_ring(id, ring)?;
        let path = self.path_of(id);

        let mut tmp = NamedTempFile::new_in(&self.root)
            .with_context(|| format!("Failed to create temporary file in {}", self.root.display()))?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    fn retire(&mut self, id: &ZoneId) -> Result<()> {
        let path = self.path_of(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }
}

/// In-memory zone set.
#[derive(Default, Clone, Debug)]
pub struct MemZones {
    pub(crate) zones: BTreeMap<ZoneId, Ring>,
}

impl MemZones {
    pub fn new(zones: impl IntoIterator<Item = (ZoneId, Ring)>) -> Self {
        Self { zones: zones.into_iter().collect() }
    }

    #[inline] pub fn get(&self, id: &ZoneId) -> Option<&Ring> { self.zones.get(id) }

    #[inline] pub fn len(&self) -> usize { self.zones.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.zones.is_empty() }

    #[inline] pub fn zones(&self) -> &BTreeMap<ZoneId, Ring> { &self.zones }
}

impl ZoneSource for MemZones {
    fn ids(&self) -> Result<Vec<ZoneId>> { Ok(self.zones.keys().cloned().collect()) }

    fn load(&self, id: &ZoneId) -> Result<Ring> {
        self.zones.get(id).cloned()
            .ok_or_else(|| ZoneError::Missing(id.clone()).into())
    }
}

impl ZoneSink for MemZones {
    fn publish(&mut self, id: &ZoneId, ring: &Ring) -> Result<()> {
        self.zones.insert(id.clone(), ring.clone());
        Ok(())
    }

    fn retire(&mut self, id: &ZoneId) -> Result<()> {
        self.zones.remove(id);
        Ok(())
    }
}
