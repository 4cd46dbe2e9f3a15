//! Record Builder
//!
//! Turns raw channel entries into catalog rows.
//!
//! **Per entry:**
//! 1. Copy provenance (id, uploader, channel, upload date, title) and set
//!    the default loop bounds `0..duration`
//! 2. Classify the title; ignored entries stop here with empty song fields
//! 3. Resolve the owning channel (fatal when not configured)
//! 4. Title → (track, album, artists); description overrides; language
//!
//! `null` entries are skipped silently and malformed entries are skipped
//! with a warning; neither affects their siblings.

use crate::extractors::{detect_language, extract_from_description, normalize_title};
use crate::services::video_classifier::classify_title;
use tracing::{debug, warn};
use ukedb_common::{ChannelList, Error, RawBatch, RawEntry, Result, VideoRecord};

/// Records built from one channel batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Records in entry order
    pub records: Vec<VideoRecord>,
    /// Malformed entries that were skipped
    pub skipped: usize,
}

/// Build the catalog row for one entry
pub fn build_record(entry: &RawEntry, channels: &ChannelList) -> Result<VideoRecord> {
    let classification = classify_title(&entry.title);

    let mut record = VideoRecord {
        ignore: classification.is_ignored(),
        publish: false,
        id: entry.id.clone(),
        uploader: entry.uploader.clone(),
        channel: entry.channel_id.clone(),
        upload_date: entry.upload_date.clone(),
        loop_start: 0.0,
        loop_end: entry.duration,
        title: entry.title.clone(),
        ..Default::default()
    };

    if record.ignore {
        debug!(id = %entry.id, title = %entry.title, ?classification, "Entry ignored");
        return Ok(record);
    }

    let channel = channels.lookup(&entry.channel_id, &entry.id)?;

    let title_fields = normalize_title(&entry.title);
    if title_fields.track.is_empty() {
        debug!(id = %entry.id, title = %entry.title, "Title has no track name, ignoring");
        record.ignore = true;
        return Ok(record);
    }

    let description = extract_from_description(&entry.description, &title_fields);

    record.track = title_fields.track;
    record.album = description.album;
    record.artists = description.artists;
    record.composers = description.composers;
    record.chords = description.chords;
    record.key = String::new();
    record.language = detect_language(&entry.title, &channel.song_language);
    record.baritone = entry.title.to_lowercase().contains("baritone");

    debug!(
        id = %record.id,
        track = %record.track,
        album = %record.album,
        language = %record.language,
        "Entry extracted"
    );

    Ok(record)
}

/// Build rows for every usable entry of a channel batch.
///
/// A missing channel mapping aborts the batch; malformed entries do not.
pub fn build_batch(batch: &RawBatch, channels: &ChannelList) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();

    for decoded in batch.decode_entries() {
        match decoded {
            Ok(entry) => outcome.records.push(build_record(&entry, channels)?),
            Err(Error::MalformedEntry { index, reason }) => {
                warn!(
                    batch = %batch.id,
                    index,
                    reason = %reason,
                    "Skipping malformed entry"
                );
                outcome.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        batch = %batch.id,
        records = outcome.records.len(),
        skipped = outcome.skipped,
        "Batch built"
    );

    Ok(outcome)
}
