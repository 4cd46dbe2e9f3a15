//! End-to-end catalog workflows
//!
//! - **Resync**: (download) → extract → merge → index → write
//! - **Refresh output**: catalog CSV → published JSON

pub mod pipeline;

pub use pipeline::{reconcile, refresh_output, resync, Reconciliation, SyncSummary};
