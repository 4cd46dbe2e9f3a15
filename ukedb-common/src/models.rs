//! Catalog data model
//!
//! Raw channel dumps come in, curated catalog rows go out:
//! - [`RawBatch`] / [`RawEntry`]: what the channel fetcher delivers (never mutated)
//! - [`VideoRecord`]: one persisted catalog row, column order is the CSV contract
//! - [`PublicRecord`]: the published form with list-valued fields
//! - [`Catalog`]: the ordered collection of rows threaded through every stage
//! - [`Channel`] / [`ChannelList`]: per-channel configuration

use crate::serde_flags::{flag, lenient_f64};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Persisted catalog columns, in file order.
pub const CATALOG_COLUMNS: [&str; 18] = [
    "ignore",
    "publish",
    "id",
    "track",
    "chords",
    "key",
    "album",
    "artists",
    "composers",
    "language",
    "loop_start",
    "loop_end",
    "title",
    "channel",
    "upload_date",
    "uploader",
    "id_related",
    "baritone",
];

/// One video as described by the channel fetcher.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawEntry {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uploader: String,
    pub channel_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub upload_date: String,
    #[serde(default, with = "lenient_f64")]
    pub duration: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A channel dump: channel identity plus its list of entries.
///
/// Entries stay untyped so one broken entry can be skipped without losing
/// the rest of the channel. `null` entries are failed sub-downloads.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBatch {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub uploader_id: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub entries: Vec<serde_json::Value>,
}

impl RawBatch {
    /// Decode every entry, skipping `null` ones and reporting malformed ones.
    ///
    /// Returned in entry order; errors are [`Error::MalformedEntry`].
    pub fn decode_entries(&self) -> Vec<Result<RawEntry>> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_null())
            .map(|(index, value)| {
                RawEntry::deserialize(value).map_err(|e| Error::MalformedEntry {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// Channel identifier entries refer to in their `channel_id`.
    ///
    /// `channel_id`, else the dump `id`, else `uploader_id`. The uploader id
    /// is usually an `@handle`, which entries never carry.
    pub fn channel_key(&self) -> &str {
        let non_empty = |s: &&str| !s.is_empty();
        self.channel_id
            .as_deref()
            .filter(non_empty)
            .or(Some(self.id.as_str()).filter(non_empty))
            .or(self.uploader_id.as_deref())
            .unwrap_or_default()
    }
}

/// One catalog row.
///
/// Field order matches [`CATALOG_COLUMNS`]; list-valued fields (`chords`,
/// `artists`, `composers`) are comma-delimited strings here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(default, with = "flag")]
    pub ignore: bool,
    #[serde(default, with = "flag")]
    pub publish: bool,
    pub id: String,
    #[serde(default)]
    pub track: String,
    #[serde(default)]
    pub chords: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub artists: String,
    #[serde(default)]
    pub composers: String,
    #[serde(default)]
    pub language: String,
    #[serde(default, with = "lenient_f64")]
    pub loop_start: f64,
    #[serde(default, with = "lenient_f64")]
    pub loop_end: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub uploader: String,
    #[serde(default, rename = "id_related")]
    pub related_id: String,
    #[serde(default, with = "flag")]
    pub baritone: bool,
}

impl VideoRecord {
    /// A row a curator has decided on. Re-imports never overwrite it.
    ///
    /// Both flags double as the curation marker: clear both to let the
    /// next import replace the row with freshly parsed values.
    pub fn is_hand_curated(&self) -> bool {
        self.publish || self.ignore
    }
}

/// Published form of a catalog row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicRecord {
    #[serde(with = "flag")]
    pub publish: bool,
    pub id: String,
    pub track: String,
    pub chords: Vec<String>,
    pub key: String,
    pub album: String,
    pub artists: Vec<String>,
    pub composers: Vec<String>,
    pub language: String,
    pub loop_start: f64,
    pub loop_end: f64,
    pub title: String,
    pub channel: String,
    pub upload_date: String,
    pub uploader: String,
    #[serde(rename = "id_related")]
    pub related_id: String,
    #[serde(with = "flag")]
    pub baritone: bool,
}

/// The catalog value passed into and returned from each pipeline stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<VideoRecord>,
}

impl Catalog {
    pub fn new(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VideoRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row with the given id
    pub fn get(&self, id: &str) -> Option<&VideoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Ids that occur on more than one row, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for record in &self.records {
            let count = counts.entry(record.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(record.id.as_str());
            }
        }
        duplicates
    }
}

impl From<Vec<VideoRecord>> for Catalog {
    fn from(records: Vec<VideoRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<VideoRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = VideoRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One configured content channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Language assumed for songs whose title names none
    pub song_language: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Ordered channel configuration (`[[channels]]` in channels.toml).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelList {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl ChannelList {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// Channels that should be fetched
    pub fn active(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(|c| c.active)
    }

    /// Resolve the channel owning `video_id`.
    ///
    /// Exactly one channel must carry `channel_id`; none is
    /// [`Error::MissingChannelMapping`], several is a configuration error.
    pub fn lookup(&self, channel_id: &str, video_id: &str) -> Result<&Channel> {
        let mut matches = self
            .channels
            .iter()
            .filter(|c| c.id.as_deref() == Some(channel_id));

        let channel = matches.next().ok_or_else(|| Error::MissingChannelMapping {
            channel_id: channel_id.to_string(),
            video_id: video_id.to_string(),
        })?;

        if matches.next().is_some() {
            return Err(Error::Config(format!(
                "Channel id '{}' is configured more than once",
                channel_id
            )));
        }

        Ok(channel)
    }
}
