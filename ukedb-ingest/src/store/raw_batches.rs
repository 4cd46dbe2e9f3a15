//! Raw channel dumps (`.json/<channel id>.json`)
//!
//! One file per channel, exactly as the fetcher received it. Files are read
//! in file-name order so a resync over the same dumps is reproducible.

use std::path::{Path, PathBuf};
use tracing::{debug, info};
use ukedb_common::config::write_atomic;
use ukedb_common::{Error, RawBatch, Result};

/// Load every `*.json` dump in `dir`, ordered by file name.
///
/// A missing directory yields no batches. A dump that does not parse is an
/// error naming the file.
pub fn read_raw_batches(dir: &Path) -> Result<Vec<RawBatch>> {
    if !dir.exists() {
        info!(dir = %dir.display(), "No raw dump directory, nothing to ingest");
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut batches = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(&path)?;
        let batch: RawBatch = serde_json::from_str(&content).map_err(|e| Error::InvalidDump {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!(
            file = %path.display(),
            channel = %batch.channel_key(),
            entries = batch.entries.len(),
            "Loaded channel dump"
        );
        batches.push(batch);
    }

    Ok(batches)
}

/// Store one channel dump as `<dir>/<file_stem>.json` (atomic)
pub fn write_raw_batch(dir: &Path, file_stem: &str, dump: &[u8]) -> Result<PathBuf> {
    let path = dir.join(format!("{}.json", file_stem));
    write_atomic(&path, dump)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_json_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        write_raw_batch(dir.path(), "UC2", br#"{"id": "UC2", "entries": []}"#).unwrap();
        write_raw_batch(dir.path(), "UC1", br#"{"id": "UC1", "entries": [null]}"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a dump").unwrap();

        let batches = read_raw_batches(dir.path()).unwrap();
        let ids: Vec<&str> = batches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["UC1", "UC2"]);
        assert_eq!(batches[0].entries.len(), 1);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_raw_batches(&dir.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn test_broken_dump_names_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        match read_raw_batches(dir.path()) {
            Err(Error::InvalidDump { path, .. }) => assert!(path.ends_with("bad.json")),
            other => panic!("expected InvalidDump, got {:?}", other),
        }
    }
}
