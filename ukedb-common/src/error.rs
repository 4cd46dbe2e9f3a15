//! Common error types for ukedb

use thiserror::Error;

/// Common result type for ukedb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across ukedb crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog CSV encode/decode error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A raw entry references a channel that is not configured
    #[error("No channel configured for channel id '{channel_id}' (video {video_id})")]
    MissingChannelMapping { channel_id: String, video_id: String },

    /// A raw entry is missing a required field; the entry is skipped
    #[error("Malformed entry #{index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    /// A stored channel dump cannot be parsed
    #[error("Unreadable channel dump {path}: {reason}")]
    InvalidDump { path: String, reason: String },

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
