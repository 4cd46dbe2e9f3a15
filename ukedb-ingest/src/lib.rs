//! ukedb-ingest library interface
//!
//! Catalog refresh for ukulele tutorial videos: channel listings in, a
//! curated catalog CSV and a published JSON out.
//!
//! - [`extractors`]: title and description parsing
//! - [`services`]: per-entry classification and record building
//! - [`catalog`]: merge, related tracks, published form
//! - [`store`]: on-disk formats
//! - [`fetch`]: channel listing downloads
//! - [`workflow`]: end-to-end runs

pub mod catalog;
pub mod extractors;
pub mod fetch;
pub mod services;
pub mod store;
pub mod workflow;

pub use workflow::{refresh_output, resync, SyncSummary};
