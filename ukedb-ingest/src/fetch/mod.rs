//! Channel listing downloads (`-d`)

pub mod channel_fetcher;

pub use channel_fetcher::{ChannelDump, ChannelFetcher, FetchError, FetchSummary};
