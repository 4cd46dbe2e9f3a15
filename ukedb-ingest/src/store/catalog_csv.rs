//! Catalog CSV adapter
//!
//! Header row, then one row per record in [`CATALOG_COLUMNS`] order. Flags
//! are written as `0`/`1`; blank flag cells and blank loop bounds read as
//! `0`, so a spreadsheet round-trip does not break the file.

use std::path::Path;
use tracing::{debug, warn};
use ukedb_common::config::write_atomic;
use ukedb_common::models::CATALOG_COLUMNS;
use ukedb_common::{Catalog, Error, Result, VideoRecord};

/// Read the catalog. A missing file is an empty catalog.
///
/// Only the `id` column is required; other absent columns read as defaults.
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        warn!(path = %path.display(), "Catalog file not found, starting empty");
        return Ok(Catalog::default());
    }

    let mut reader = csv::ReaderBuilder::new().flexible(false).from_path(path)?;

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = CATALOG_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if missing.contains(&"id") {
        return Err(Error::Config(format!(
            "{}: missing column 'id'",
            path.display()
        )));
    }
    if !missing.is_empty() {
        warn!(
            path = %path.display(),
            missing = ?missing,
            "Catalog is missing columns, using defaults"
        );
    }

    let records = reader
        .deserialize::<VideoRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!(path = %path.display(), rows = records.len(), "Catalog loaded");
    Ok(Catalog::new(records))
}

/// Serialize the catalog to CSV bytes
pub fn catalog_to_csv(catalog: &Catalog) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());

    writer.write_record(CATALOG_COLUMNS)?;
    for record in catalog.records() {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Internal(format!("CSV buffer flush failed: {}", e)))
}

/// Write the catalog (atomic)
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let bytes = catalog_to_csv(catalog)?;
    write_atomic(path, &bytes)?;
    debug!(path = %path.display(), rows = catalog.len(), "Catalog written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> VideoRecord {
        VideoRecord {
            ignore: false,
            publish: true,
            id: "abc".to_string(),
            track: "Tum Hi Ho".to_string(),
            chords: "Am,C,F,G".to_string(),
            key: "C".to_string(),
            album: "Aashiqui 2".to_string(),
            artists: "Arijit Singh".to_string(),
            composers: "Mithoon".to_string(),
            language: "Hindi".to_string(),
            loop_start: 12.5,
            loop_end: 245.0,
            title: "Tum Hi Ho Ukulele Tutorial, \"easy\"".to_string(),
            channel: "UC1".to_string(),
            upload_date: "20200102".to_string(),
            uploader: "Example".to_string(),
            related_id: String::new(),
            baritone: false,
        }
    }

    #[test]
    fn test_header_is_fixed_column_order() {
        let bytes = catalog_to_csv(&Catalog::new(vec![sample()])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, CATALOG_COLUMNS.join(","));
    }

    #[test]
    fn test_flags_written_as_digits() {
        let bytes = catalog_to_csv(&Catalog::new(vec![sample()])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("0,1,abc,"));
        assert!(row.ends_with(",0"));
    }

    #[test]
    fn test_write_then_read_preserves_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("tutorials.csv");
        let catalog = Catalog::new(vec![sample()]);

        write_catalog(&catalog, &path).unwrap();
        assert_eq!(read_catalog(&path).unwrap(), catalog);
    }

    #[test]
    fn test_missing_file_is_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = read_catalog(&dir.path().join("nope.csv")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_hand_edited_cells_are_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tutorials.csv");
        let mut text = CATALOG_COLUMNS.join(",");
        text.push_str("\n,TRUE,abc,Song,,,,,,,,,Title,UC1,20200101,Up,,\n");
        std::fs::write(&path, text).unwrap();

        let catalog = read_catalog(&path).unwrap();
        let record = catalog.get("abc").unwrap();
        assert!(!record.ignore);
        assert!(record.publish);
        assert_eq!(record.loop_start, 0.0);
        assert_eq!(record.loop_end, 0.0);
        assert!(!record.baritone);
    }

    #[test]
    fn test_missing_optional_columns_read_as_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tutorials.csv");
        // Older catalogs predate the last two columns
        let mut text = CATALOG_COLUMNS[..16].join(",");
        text.push_str("\n0,1,abc,Song,,,,,,,,,Title,UC1,20200101,Up\n");
        std::fs::write(&path, text).unwrap();

        let catalog = read_catalog(&path).unwrap();
        let record = catalog.get("abc").unwrap();
        assert!(record.publish);
        assert_eq!(record.track, "Song");
        assert_eq!(record.related_id, "");
        assert!(!record.baritone);
    }

    #[test]
    fn test_missing_id_column_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tutorials.csv");
        std::fs::write(&path, "track,title\nSong,T\n").unwrap();
        assert!(matches!(read_catalog(&path), Err(Error::Config(_))));
    }
}
