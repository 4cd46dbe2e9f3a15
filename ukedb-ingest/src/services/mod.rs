//! Per-entry services: classification and record building

pub mod record_builder;
pub mod video_classifier;

pub use record_builder::{build_batch, build_record, BatchOutcome};
pub use video_classifier::{classify, classify_title, Classification};
