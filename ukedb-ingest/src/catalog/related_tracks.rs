//! Related Tracks Indexer
//!
//! Cross-references alternate renditions of the same song: non-ignored rows
//! sharing a (track, album) pair list every id of the group, their own
//! included, in `related_id` (sorted, comma-joined). Rows without siblings
//! and ignored rows get an empty `related_id`.

use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use ukedb_common::Catalog;

/// Recompute `related_id` for every row, discarding previous values
pub fn compute_related(catalog: Catalog) -> Catalog {
    let mut records = catalog.into_records();

    let mut groups: HashMap<(String, String), BTreeSet<String>> = HashMap::new();
    for record in records.iter().filter(|r| !r.ignore) {
        groups
            .entry((record.track.clone(), record.album.clone()))
            .or_default()
            .insert(record.id.clone());
    }

    let joined: HashMap<(String, String), String> = groups
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(key, ids)| (key, ids.into_iter().collect::<Vec<_>>().join(",")))
        .collect();

    for record in &mut records {
        record.related_id = if record.ignore {
            String::new()
        } else {
            joined
                .get(&(record.track.clone(), record.album.clone()))
                .cloned()
                .unwrap_or_default()
        };
    }

    debug!(groups = joined.len(), "Related tracks indexed");

    Catalog::new(records)
}
