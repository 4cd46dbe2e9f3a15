//! Pipeline Orchestrator
//!
//! Runs the catalog refresh end to end.
//!
//! # Resync
//! 1. Load the channel list
//! 2. Optionally download fresh channel dumps (and write the channel list
//!    back with the discovered ids and names)
//! 3. Build records from every raw dump
//! 4. Read the existing catalog
//! 5. Merge, then recompute related tracks
//! 6. Write the catalog CSV, then the published JSON
//!
//! Steps 3-5 run entirely in memory ([`reconcile`]); a failure there leaves
//! both output files untouched.
//!
//! # Refresh output
//! Re-publishes the catalog CSV as JSON without re-extracting anything, so
//! hand edits to the CSV reach the published file.

use crate::catalog::{compute_related, merge_with_stats, to_publishable, MergeStats};
use crate::fetch::{ChannelFetcher, FetchSummary};
use crate::services::build_batch;
use crate::store::{read_catalog, read_raw_batches, write_catalog, write_published};
use tracing::info;
use ukedb_common::config::{load_channels, write_channels, DataPaths, TomlConfig};
use ukedb_common::{Catalog, ChannelList, PublicRecord, RawBatch, Result};

/// Counts reported by [`resync`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Download results, when a download was requested
    pub fetch: Option<FetchSummary>,
    /// Raw dumps read
    pub batches: usize,
    /// Entries turned into records (ignored ones included)
    pub entries_parsed: usize,
    /// Malformed entries skipped
    pub entries_skipped: usize,
    /// Merge breakdown
    pub merge: MergeStats,
    /// Rows in the written catalog
    pub records_written: usize,
    /// Rows in the published file
    pub published: usize,
}

/// In-memory result of a resync, ready to be written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub catalog: Catalog,
    pub published: Vec<PublicRecord>,
    pub merge: MergeStats,
    pub entries_parsed: usize,
    pub entries_skipped: usize,
}

/// Build, merge and index without touching the filesystem
pub fn reconcile(
    batches: &[RawBatch],
    channels: &ChannelList,
    existing: &Catalog,
) -> Result<Reconciliation> {
    let mut fresh = Vec::new();
    let mut entries_skipped = 0;

    for batch in batches {
        let outcome = build_batch(batch, channels)?;
        entries_skipped += outcome.skipped;
        fresh.extend(outcome.records);
    }

    let entries_parsed = fresh.len();
    let (merged, merge) = merge_with_stats(existing, &fresh);
    let catalog = compute_related(merged);

    debug_assert!(catalog.duplicate_ids().is_empty(), "merge yields one row per id");

    let published = to_publishable(&catalog);

    Ok(Reconciliation {
        catalog,
        published,
        merge,
        entries_parsed,
        entries_skipped,
    })
}

/// Full resync; downloads first when `download` is set
pub async fn resync(paths: &DataPaths, config: &TomlConfig, download: bool) -> Result<SyncSummary> {
    paths.ensure_dirs()?;
    let mut channels = load_channels(&paths.channels_toml)?;

    let fetch = if download {
        let fetcher = ChannelFetcher::from_config(config);
        let summary = fetcher.fetch_all(&mut channels, &paths.raw_dir).await?;
        write_channels(&channels, &paths.channels_toml)?;
        Some(summary)
    } else {
        None
    };

    let batches = read_raw_batches(&paths.raw_dir)?;
    let existing = read_catalog(&paths.catalog_csv)?;
    info!(
        batches = batches.len(),
        existing = existing.len(),
        "Reconciling catalog"
    );

    let result = reconcile(&batches, &channels, &existing)?;

    write_catalog(&result.catalog, &paths.catalog_csv)?;
    write_published(&result.published, &paths.published_json)?;

    let summary = SyncSummary {
        fetch,
        batches: batches.len(),
        entries_parsed: result.entries_parsed,
        entries_skipped: result.entries_skipped,
        merge: result.merge,
        records_written: result.catalog.len(),
        published: result.published.len(),
    };

    info!(
        entries = summary.entries_parsed,
        skipped = summary.entries_skipped,
        records = summary.records_written,
        published = summary.published,
        "Resync complete"
    );

    Ok(summary)
}

/// Regenerate the published JSON from the catalog CSV.
///
/// Returns the number of published records.
pub fn refresh_output(paths: &DataPaths) -> Result<usize> {
    let catalog = read_catalog(&paths.catalog_csv)?;
    let published = to_publishable(&catalog);
    write_published(&published, &paths.published_json)?;

    info!(
        rows = catalog.len(),
        published = published.len(),
        "Published output refreshed"
    );

    Ok(published.len())
}
