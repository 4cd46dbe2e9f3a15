//! Channel Fetcher
//!
//! Downloads channel listings with the `yt-dlp` command-line tool and stores
//! them as raw dumps for the ingest pipeline.
//!
//! **Per channel:**
//! 1. `yt-dlp --dump-single-json --simulate --quiet --geo-bypass --ignore-errors <url>`
//! 2. Parse stdout as one JSON document (the channel playlist)
//! 3. Record the channel identity on the configured channel:
//!    `id` = `channel_id` else dump `id` else `uploader_id`,
//!    `name` = `uploader` else `title`
//! 4. Write the dump, pretty-printed, to `<raw dir>/<dump id>.json`
//!
//! With `--ignore-errors` yt-dlp exits non-zero when individual videos fail
//! but still prints the playlist; a parseable document is accepted with a
//! warning. Failed videos appear as `null` entries.

use futures::stream::{self, StreamExt};
use serde::Deserialize;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};
use ukedb_common::config::TomlConfig;
use ukedb_common::{ChannelList, RawBatch};

use crate::store::write_raw_batch;

/// Channel fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// yt-dlp could not be started
    #[error("Failed to execute {program}: {reason}")]
    ExecutionError { program: String, reason: String },

    /// yt-dlp ran but produced no usable dump
    #[error("Download failed for {url} (exit code {code:?}): {stderr}")]
    DownloadFailed {
        url: String,
        code: Option<i32>,
        stderr: String,
    },

    /// stdout was not a channel dump
    #[error("Failed to parse dump for {url}: {reason}")]
    ParseError { url: String, reason: String },

    /// Dump carries no id to name the raw file after
    #[error("Dump for {url} has no id")]
    MissingId { url: String },

    /// Raw dump could not be stored
    #[error("Failed to store dump for {url}: {source}")]
    Store {
        url: String,
        #[source]
        source: ukedb_common::Error,
    },
}

/// One downloaded channel listing
#[derive(Debug, Clone)]
pub struct ChannelDump {
    /// Typed view of the dump
    pub batch: RawBatch,
    /// Dump as it will be stored (pretty-printed JSON)
    pub raw: Vec<u8>,
}

impl ChannelDump {
    /// Parse yt-dlp stdout
    pub fn parse(url: &str, stdout: &[u8]) -> Result<Self, FetchError> {
        let parse_error = |e: serde_json::Error| FetchError::ParseError {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let value: serde_json::Value = serde_json::from_slice(stdout).map_err(parse_error)?;
        let batch = RawBatch::deserialize(&value).map_err(parse_error)?;
        if batch.id.is_empty() {
            return Err(FetchError::MissingId {
                url: url.to_string(),
            });
        }
        let raw = serde_json::to_vec_pretty(&value).map_err(parse_error)?;

        Ok(Self { batch, raw })
    }

    /// Channel id to record in the channel list
    pub fn channel_id(&self) -> &str {
        self.batch.channel_key()
    }

    /// Channel display name to record in the channel list
    pub fn channel_name(&self) -> Option<&str> {
        self.batch
            .uploader
            .as_deref()
            .or(self.batch.title.as_deref())
    }
}

/// Outcome of [`ChannelFetcher::fetch_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Channels downloaded and stored
    pub fetched: usize,
    /// Channels whose download failed
    pub failed: usize,
    /// Entries across all stored dumps
    pub entries: usize,
}

/// Bounded-concurrency channel downloader
#[derive(Debug, Clone)]
pub struct ChannelFetcher {
    program: String,
    workers: usize,
}

impl ChannelFetcher {
    /// Create a fetcher running `program` with at most `workers` downloads in flight
    pub fn new(program: impl Into<String>, workers: usize) -> Self {
        Self {
            program: program.into(),
            workers: workers.max(1),
        }
    }

    pub fn from_config(config: &TomlConfig) -> Self {
        Self::new(config.yt_dlp_path.clone(), config.workers)
    }

    /// Download one channel listing
    pub async fn fetch_channel(&self, url: &str) -> Result<ChannelDump, FetchError> {
        debug!(url = %url, program = %self.program, "Running yt-dlp");

        let output = Command::new(&self.program)
            .args([
                "--dump-single-json",
                "--simulate",
                "--quiet",
                "--geo-bypass",
                "--ignore-errors",
            ])
            .arg(url)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| FetchError::ExecutionError {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::DownloadFailed {
                url: url.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        let dump = ChannelDump::parse(url, &output.stdout)?;

        if !output.status.success() {
            warn!(
                url = %url,
                code = ?output.status.code(),
                stderr = %stderr,
                "yt-dlp reported errors, keeping partial listing"
            );
        }

        Ok(dump)
    }

    /// Download every active channel into `raw_dir`.
    ///
    /// Existing dumps are removed first. Channel ids and names are updated
    /// in `channels` for every successful download; failures are logged and
    /// counted without affecting other channels.
    pub async fn fetch_all(
        &self,
        channels: &mut ChannelList,
        raw_dir: &Path,
    ) -> ukedb_common::Result<FetchSummary> {
        clear_raw_dir(raw_dir)?;

        let jobs: Vec<(usize, String)> = channels
            .channels
            .iter()
            .enumerate()
            .filter(|(_, channel)| channel.active)
            .map(|(index, channel)| (index, channel.url.clone()))
            .collect();

        info!(
            channels = jobs.len(),
            workers = self.workers,
            "Downloading channel listings"
        );

        let results: Vec<(usize, String, Result<ChannelDump, FetchError>)> = stream::iter(jobs)
            .map(move |(index, url)| async move {
                let start = Instant::now();
                let result = self.fetch_and_store(&url, raw_dir).await;
                if let Ok(dump) = &result {
                    info!(
                        url = %url,
                        channel = %dump.channel_id(),
                        entries = dump.batch.entries.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Channel listing stored"
                    );
                }
                (index, url, result)
            })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        let mut summary = FetchSummary::default();
        for (index, url, result) in results {
            match result {
                Ok(dump) => {
                    let channel = &mut channels.channels[index];
                    channel.id = Some(dump.channel_id().to_string());
                    if let Some(name) = dump.channel_name() {
                        channel.name = Some(name.to_string());
                    }
                    summary.fetched += 1;
                    summary.entries += dump.batch.entries.len();
                }
                Err(e) => {
                    // Per-channel isolation: the others still count
                    warn!(url = %url, error = %e, "Channel download failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            fetched = summary.fetched,
            failed = summary.failed,
            entries = summary.entries,
            "Channel downloads finished"
        );

        Ok(summary)
    }

    async fn fetch_and_store(&self, url: &str, raw_dir: &Path) -> Result<ChannelDump, FetchError> {
        let dump = self.fetch_channel(url).await?;
        write_raw_batch(raw_dir, &dump.batch.id, &dump.raw).map_err(|source| FetchError::Store {
            url: url.to_string(),
            source,
        })?;
        Ok(dump)
    }
}

/// Remove previous dumps, leaving an empty raw directory
fn clear_raw_dir(raw_dir: &Path) -> ukedb_common::Result<()> {
    std::fs::create_dir_all(raw_dir)?;
    let mut removed = 0usize;
    for entry in std::fs::read_dir(raw_dir)? {
        let path = entry?.path();
        if path.is_file() {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    debug!(dir = %raw_dir.display(), removed, "Cleared raw dump directory");
    Ok(())
}
