//! On-disk formats
//!
//! - `data/tutorials.csv`: the curated catalog ([`catalog_csv`])
//! - `data/published.json`: the published catalog ([`published_json`])
//! - `.json/*.json`: raw channel dumps ([`raw_batches`])
//!
//! Every write goes through [`ukedb_common::config::write_atomic`].

pub mod catalog_csv;
pub mod published_json;
pub mod raw_batches;

pub use catalog_csv::{catalog_to_csv, read_catalog, write_catalog};
pub use published_json::write_published;
pub use raw_batches::{read_raw_batches, write_raw_batch};
