//! Catalog Merger
//!
//! Reconciles a freshly extracted batch with the persisted catalog without
//! losing curator edits.
//!
//! # Algorithm
//! 1. Split the existing catalog into hand-curated rows
//!    ([`VideoRecord::is_hand_curated`]) and the rest
//! 2. Take the fresh rows whose id belongs to a hand-curated row
//! 3. Concatenate (existing first) and keep the first row per id, so the
//!    curated row always wins over its freshly parsed duplicate
//! 4. Fresh rows whose id is not curated are new (first row per id)
//! 5. Existing non-curated rows absent from the fresh batch are carried over
//!    unchanged; the pipeline never deletes rows
//! 6. Union, drop full-row duplicates, sort (see [`catalog_order`])
//!
//! Conflicts never surface as errors: first-wins keeps merges idempotent
//! and non-interactive.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::info;
use ukedb_common::{Catalog, VideoRecord};

/// Merge counts, for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Hand-curated rows kept as-is
    pub curated: usize,
    /// Fresh rows that shadowed a curated row and were discarded
    pub shadowed: usize,
    /// Fresh rows written (new ids or replacing non-curated rows)
    pub fresh: usize,
    /// Existing non-curated rows kept because the batch did not mention them
    pub carried: usize,
}

/// Merge `fresh` into `existing`
pub fn merge(existing: &Catalog, fresh: &[VideoRecord]) -> Catalog {
    merge_with_stats(existing, fresh).0
}

/// [`merge`], also reporting what happened
pub fn merge_with_stats(existing: &Catalog, fresh: &[VideoRecord]) -> (Catalog, MergeStats) {
    let (hand_curated, rest): (Vec<&VideoRecord>, Vec<&VideoRecord>) = existing
        .records()
        .iter()
        .partition(|r| r.is_hand_curated());

    let curated_ids: HashSet<&str> = hand_curated.iter().map(|r| r.id.as_str()).collect();
    let curated_fresh: Vec<&VideoRecord> = fresh
        .iter()
        .filter(|r| curated_ids.contains(r.id.as_str()))
        .collect();

    let reconciled = first_per_id(hand_curated.iter().chain(curated_fresh.iter()).copied());
    let reconciled_ids: HashSet<&str> = reconciled.iter().map(|r| r.id.as_str()).collect();

    let new_records = first_per_id(
        fresh
            .iter()
            .filter(|r| !reconciled_ids.contains(r.id.as_str())),
    );

    let fresh_ids: HashSet<&str> = fresh.iter().map(|r| r.id.as_str()).collect();
    let carried = first_per_id(
        rest.iter()
            .copied()
            .filter(|r| !fresh_ids.contains(r.id.as_str()) && !reconciled_ids.contains(r.id.as_str())),
    );

    let stats = MergeStats {
        curated: reconciled.len(),
        shadowed: curated_fresh.len(),
        fresh: new_records.len(),
        carried: carried.len(),
    };

    let mut merged = drop_duplicate_rows(
        reconciled
            .into_iter()
            .chain(new_records)
            .chain(carried)
            .cloned()
            .collect(),
    );
    merged.sort_by(catalog_order);

    info!(
        curated = stats.curated,
        shadowed = stats.shadowed,
        fresh = stats.fresh,
        carried = stats.carried,
        total = merged.len(),
        "Catalog merged"
    );

    (Catalog::new(merged), stats)
}

/// Persisted row order: ignored first, then published, then
/// track/album/artists (case-insensitive), then upload date. Id breaks
/// any remaining tie so the order is total.
pub fn catalog_order(a: &VideoRecord, b: &VideoRecord) -> Ordering {
    b.ignore
        .cmp(&a.ignore)
        .then_with(|| b.publish.cmp(&a.publish))
        .then_with(|| cmp_ignore_case(&a.track, &b.track))
        .then_with(|| cmp_ignore_case(&a.album, &b.album))
        .then_with(|| cmp_ignore_case(&a.artists, &b.artists))
        .then_with(|| a.upload_date.cmp(&b.upload_date))
        .then_with(|| a.id.cmp(&b.id))
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Keep the first row for each id, preserving input order
fn first_per_id<'a, I>(records: I) -> Vec<&'a VideoRecord>
where
    I: IntoIterator<Item = &'a VideoRecord>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for record in records {
        if seen.insert(record.id.as_str()) {
            out.push(record);
        }
    }
    out
}

/// Drop rows equal in every column to an earlier row
fn drop_duplicate_rows(records: Vec<VideoRecord>) -> Vec<VideoRecord> {
    let mut by_id: HashMap<String, Vec<VideoRecord>> = HashMap::new();
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        let kept = by_id.entry(record.id.clone()).or_default();
        if kept.contains(&record) {
            continue;
        }
        kept.push(record.clone());
        out.push(record);
    }

    out
}
