use ahash::{AHashMap, AHashSet};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use zonering::Ring;

use crate::merge::{merge_pair, MergeConfig, MergeError};
use crate::zones::{ZoneId, ZoneSink, ZoneSource};

use super::{MergeRecord, MergeReport, PairMemo, Rejection};

/// A zone taking part in a pass, with its area precomputed for ordering.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: ZoneId,
    pub ring: Ring,
    pub area: f64,
}

impl Candidate {
    pub fn new(id: ZoneId, ring: Ring) -> Self {
        let area = ring.area();
        Self { id, ring, area }
    }
}

/// Ascending area; equal areas fall back to id order so passes are reproducible.
fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| a.area.total_cmp(&b.area).then_with(|| a.id.cmp(&b.id)));
}

/// Every zone in `source`, in merge order.
pub fn load_candidates<S: ZoneSource + ?Sized>(source: &S) -> Result<Vec<Candidate>> {
    let mut candidates = source.ids()?.into_iter()
        .map(|id| {
            let ring = source.load(&id).with_context(|| format!("Failed to load zone {id}"))?;
            Ok(Candidate::new(id, ring))
        })
        .collect::<Result<Vec<_>>>()?;
    sort_candidates(&mut candidates);
    Ok(candidates)
}

/// A pair that merged during a scan, with `a` the ring that was walked first.
struct Found {
    a: usize,
    b: usize,
    ring: Ring,
}

/// Repeatedly merges adjacent zones of a store until no pair merges.
pub struct MergeSession<S: ZoneSource + ZoneSink> {
    store: S,
    config: MergeConfig,
    memo: PairMemo,
    cache: AHashMap<ZoneId, Ring>,
    /// Zones consumed by a merge. Excluded from later passes even if the
    /// store failed to delete them.
    retired: AHashSet<ZoneId>,
}

impl<S: ZoneSource + ZoneSink> MergeSession<S> {
    pub fn new(store: S, config: MergeConfig) -> Self {
        Self {
            store,
            config,
            memo: PairMemo::new(),
            cache: AHashMap::new(),
            retired: AHashSet::new(),
        }
    }

    #[inline] pub fn store(&self) -> &S { &self.store }

    #[inline] pub fn into_store(self) -> S { self.store }

    #[inline] pub fn config(&self) -> &MergeConfig { &self.config }

    #[inline] pub fn memo(&self) -> &PairMemo { &self.memo }

    /// Merge until a full pass over the candidate set finds nothing to merge.
    ///
    /// Only a store failure (including a malformed zone) ends the run with
    /// an error; rejected pairs are reported and remembered.
    pub fn run(&mut self) -> Result<MergeReport> {
        self.config.validate()?;
        let mut report = MergeReport::default();

        loop {
            report.passes += 1;
            let candidates = self.candidates()?;
            debug!("[session] pass {}: {} candidates", report.passes, candidates.len());

            let found = if candidates.len() < 2 { None } else { self.scan(&candidates, &mut report) };
            let Some(found) = found else {
                report.remaining = candidates.into_iter().map(|c| c.id).collect();
                break;
            };
            self.commit(&candidates, found, &mut report)?;
        }

        info!(
            "[session] done after {} passes: {} merges, {} rejections, {} zones remain",
            report.passes, report.merges.len(), report.rejections.len(), report.remaining.len(),
        );
        Ok(report)
    }

    /// Current zones in merge order, loading any not seen before.
    fn candidates(&mut self) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        for id in self.store.ids()? {
            if self.retired.contains(&id) { continue }
            let ring = match self.cache.get(&id) {
                Some(ring) => ring.clone(),
                None => {
                    let ring = self.store.load(&id).with_context(|| format!("Failed to load zone {id}"))?;
                    self.cache.insert(id.clone(), ring.clone());
                    ring
                }
            };
            candidates.push(Candidate::new(id, ring));
        }
        sort_candidates(&mut candidates);
        Ok(candidates)
    }

    /// First ordered pair that merges, trying each pair both ways round.
    fn scan(&mut self, candidates: &[Candidate], report: &mut MergeReport) -> Option<Found> {
        for (i, a) in candidates.iter().enumerate() {
            for (j, b) in candidates.iter().enumerate() {
                if i == j || self.memo.contains(&a.id, &b.id) { continue }

                let forward = match merge_pair(&a.ring, &b.ring, &self.config) {
                    Ok(ring) => return Some(Found { a: i, b: j, ring }),
                    Err(e) => e,
                };
                let reverse = match merge_pair(&b.ring, &a.ring, &self.config) {
                    Ok(ring) => return Some(Found { a: j, b: i, ring }),
                    Err(e) => e,
                };

                debug!("[session] {} / {} rejected: {}", a.id, b.id, forward);
                self.memo.insert_both(&a.id, &b.id);
                report.rejections.push(Rejection {
                    a: a.id.clone(),
                    b: b.id.clone(),
                    kind: forward.kind(),
                    reversed_kind: reverse.kind(),
                    reason: describe(&forward, &reverse),
                });
            }
        }
        None
    }

    /// Publish the merged ring, then retire both inputs.
    fn commit(&mut self, candidates: &[Candidate], found: Found, report: &mut MergeReport) -> Result<()> {
        let a = &candidates[found.a].id;
        let b = &candidates[found.b].id;
        let merged = self.fresh_id(candidates, ZoneId::joined(a, b));

        self.store.publish(&merged, &found.ring)
            .with_context(|| format!("Failed to publish merged zone {merged}"))?;

        for id in [a, b] {
            if let Err(e) = self.store.retire(id) {
                warn!("[session] failed to retire {id}: {e:#}");
            }
            self.retired.insert(id.clone());
            self.cache.remove(id);
            self.memo.forget(id);
        }

        info!("[merge] {a} + {b} -> {merged} ({} vertices)", found.ring.len());
        report.merges.push(MergeRecord {
            a: a.clone(),
            b: b.clone(),
            merged: merged.clone(),
            vertices: found.ring.len(),
        });
        self.cache.insert(merged, found.ring);
        Ok(())
    }

    /// `base`, or `base` with the first numeric suffix that names no live or
    /// retired zone.
    fn fresh_id(&self, candidates: &[Candidate], base: ZoneId) -> ZoneId {
        let taken = |id: &ZoneId| self.retired.contains(id) || candidates.iter().any(|c| &c.id == id);
        let mut id = base.clone();
        let mut n = 0;
        while taken(&id) {
            n += 1;
            id = base.with_suffix(n);
        }
        id
    }
}

fn describe(forward: &MergeError, reverse: &MergeError) -> String {
    if forward == reverse {
        forward.to_string()
    } else {
        format!("{forward}; reversed: {reverse}")
    }
}
