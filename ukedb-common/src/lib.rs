//! # ukedb Common Library
//!
//! Shared code for the ukedb crates including:
//! - Catalog data model (raw entries, video records, published records)
//! - Channel configuration and bootstrap TOML loading
//! - Common error type
//! - Serde helpers for the persisted catalog formats

pub mod config;
pub mod error;
pub mod models;
pub mod serde_flags;

pub use error::{Error, Result};
pub use models::{Catalog, Channel, ChannelList, PublicRecord, RawBatch, RawEntry, VideoRecord};
