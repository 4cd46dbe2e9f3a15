//! Catalog reconciliation stages
//!
//! Pure, synchronous transformations over an in-memory [`Catalog`]:
//! merge → related tracks → publishable output.
//!
//! [`Catalog`]: ukedb_common::Catalog

pub mod merger;
pub mod output_formatter;
pub mod related_tracks;

pub use merger::{catalog_order, merge, merge_with_stats, MergeStats};
pub use output_formatter::{split_list, to_publishable};
pub use related_tracks::compute_related;
