//! Output Formatter
//!
//! Produces the published form of the catalog: ignored rows are dropped and
//! the comma-delimited `chords`, `artists` and `composers` become sorted,
//! de-duplicated lists. Row order is the catalog order.

use ukedb_common::{Catalog, PublicRecord, VideoRecord};

/// Published records for every non-ignored row
pub fn to_publishable(catalog: &Catalog) -> Vec<PublicRecord> {
    catalog
        .records()
        .iter()
        .filter(|r| !r.ignore)
        .map(to_public)
        .collect()
}

/// Split a delimited field into a sorted list without blanks or repeats
pub fn split_list(value: &str) -> Vec<String> {
    let mut items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    items.sort();
    items.dedup();
    items
}

fn to_public(record: &VideoRecord) -> PublicRecord {
    PublicRecord {
        publish: record.publish,
        id: record.id.clone(),
        track: record.track.clone(),
        chords: split_list(&record.chords),
        key: record.key.clone(),
        album: record.album.clone(),
        artists: split_list(&record.artists),
        composers: split_list(&record.composers),
        language: record.language.clone(),
        loop_start: record.loop_start,
        loop_end: record.loop_end,
        title: record.title.clone(),
        channel: record.channel.clone(),
        upload_date: record.upload_date.clone(),
        uploader: record.uploader.clone(),
        related_id: record.related_id.clone(),
        baritone: record.baritone,
    }
}
