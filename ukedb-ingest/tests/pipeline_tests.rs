//! On-disk resync and refresh tests
//!
//! Each test builds a throwaway root folder:
//! - `data/channels.toml` with one configured channel
//! - `.json/UC1.json` with a small channel dump

use std::path::Path;
use tempfile::TempDir;
use ukedb_common::config::{DataPaths, TomlConfig};
use ukedb_common::models::CATALOG_COLUMNS;
use ukedb_common::{Error, VideoRecord};
use ukedb_ingest::store::{read_catalog, write_catalog};
use ukedb_ingest::workflow::{refresh_output, resync};

const CHANNELS: &str = r#"
[[channels]]
url = "https://www.youtube.com/c/example/videos"
id = "UC1"
name = "Example"
song_language = "hindi"
"#;

const DUMP: &str = r#"{
  "id": "UC1",
  "uploader": "Example",
  "title": "Example - Videos",
  "entries": [
    {
      "id": "vid1",
      "title": "Tum Hi Ho Ukulele Tutorial (Aashiqui 2)",
      "description": "Chords used: C, G, Am and F\nSingers: Arijit Singh\nMusic: Mithoon",
      "uploader": "Example",
      "channel_id": "UC1",
      "upload_date": "20200102",
      "duration": 245
    },
    {
      "id": "vid2",
      "title": "Tum Hi Ho | Aashiqui 2 | Easy Ukulele Lesson",
      "description": "",
      "uploader": "Example",
      "channel_id": "UC1",
      "upload_date": "20210305",
      "duration": 200.5
    },
    {
      "id": "vid3",
      "title": "Perfect (English) Ukulele Tutorial",
      "description": "Chords: G Em C D",
      "uploader": "Example",
      "channel_id": "UC1",
      "upload_date": "20190101",
      "duration": 180
    },
    {
      "id": "vid4",
      "title": "Unboxing my new ukulele",
      "description": null,
      "uploader": "Example",
      "channel_id": "UC1",
      "upload_date": "20180101",
      "duration": 60
    },
    null,
    {"title": "Entry without an id", "channel_id": "UC1"}
  ]
}"#;

fn setup() -> (TempDir, DataPaths) {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());
    paths.ensure_dirs().unwrap();
    std::fs::write(&paths.channels_toml, CHANNELS).unwrap();
    std::fs::write(paths.raw_dir.join("UC1.json"), DUMP).unwrap();
    (dir, paths)
}

fn published(path: &Path) -> Vec<serde_json::Value> {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str::<serde_json::Value>(&text)
        .unwrap()
        .as_array()
        .unwrap()
        .clone()
}

#[tokio::test]
async fn test_resync_writes_catalog_and_published() {
    let (_dir, paths) = setup();

    let summary = resync(&paths, &TomlConfig::default(), false).await.unwrap();

    assert_eq!(summary.fetch, None);
    assert_eq!(summary.batches, 1);
    assert_eq!(summary.entries_parsed, 4);
    assert_eq!(summary.entries_skipped, 1);
    assert_eq!(summary.records_written, 4);
    assert_eq!(summary.published, 3);

    let catalog = read_catalog(&paths.catalog_csv).unwrap();
    assert_eq!(catalog.records()[0].id, "vid4");
    assert!(catalog.get("vid4").unwrap().ignore);

    let first = catalog.get("vid1").unwrap();
    assert_eq!(first.track, "Tum Hi Ho");
    assert_eq!(first.album, "Aashiqui 2");
    assert_eq!(first.artists, "Arijit Singh");
    assert_eq!(first.composers, "Mithoon");
    assert_eq!(first.chords, "C,G,Am,F");
    assert_eq!(first.language, "Hindi");
    assert_eq!(first.loop_end, 245.0);
    assert_eq!(first.related_id, "vid1,vid2");
    assert_eq!(catalog.get("vid2").unwrap().related_id, "vid1,vid2");

    let perfect = catalog.get("vid3").unwrap();
    assert_eq!(perfect.track, "Perfect");
    assert_eq!(perfect.language, "English");
    assert_eq!(perfect.related_id, "");

    let rows = published(&paths.published_json);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.get("ignore").is_none()));
    let tum_hi_ho = rows.iter().find(|r| r["id"] == "vid1").unwrap();
    assert_eq!(tum_hi_ho["chords"], serde_json::json!(["Am", "C", "F", "G"]));
}

#[tokio::test]
async fn test_catalog_header_matches_columns() {
    let (_dir, paths) = setup();
    resync(&paths, &TomlConfig::default(), false).await.unwrap();

    let text = std::fs::read_to_string(&paths.catalog_csv).unwrap();
    assert_eq!(text.lines().next().unwrap(), CATALOG_COLUMNS.join(","));
}

#[tokio::test]
async fn test_hand_edits_survive_resync() {
    let (_dir, paths) = setup();
    resync(&paths, &TomlConfig::default(), false).await.unwrap();

    let mut rows = read_catalog(&paths.catalog_csv).unwrap().into_records();
    for row in &mut rows {
        if row.id == "vid3" {
            row.publish = true;
            row.track = "Perfect (Hand Edited)".to_string();
            row.key = "G".to_string();
            row.loop_start = 10.0;
        }
    }
    write_catalog(&rows.into_iter().collect(), &paths.catalog_csv).unwrap();

    let summary = resync(&paths, &TomlConfig::default(), false).await.unwrap();
    assert_eq!(summary.merge.curated, 2);
    assert_eq!(summary.records_written, 4);

    let catalog = read_catalog(&paths.catalog_csv).unwrap();
    let edited = catalog.get("vid3").unwrap();
    assert!(edited.publish);
    assert_eq!(edited.track, "Perfect (Hand Edited)");
    assert_eq!(edited.key, "G");
    assert_eq!(edited.loop_start, 10.0);

    // ignored first, then published
    let order: Vec<&str> = catalog.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(&order[..2], &["vid4", "vid3"]);
}

#[tokio::test]
async fn test_resync_is_idempotent() {
    let (_dir, paths) = setup();
    resync(&paths, &TomlConfig::default(), false).await.unwrap();
    let first_csv = std::fs::read_to_string(&paths.catalog_csv).unwrap();
    let first_json = std::fs::read_to_string(&paths.published_json).unwrap();

    resync(&paths, &TomlConfig::default(), false).await.unwrap();
    assert_eq!(std::fs::read_to_string(&paths.catalog_csv).unwrap(), first_csv);
    assert_eq!(std::fs::read_to_string(&paths.published_json).unwrap(), first_json);
}

#[tokio::test]
async fn test_unmapped_channel_leaves_outputs_untouched() {
    let (_dir, paths) = setup();
    resync(&paths, &TomlConfig::default(), false).await.unwrap();
    let before = std::fs::read_to_string(&paths.catalog_csv).unwrap();

    std::fs::write(
        &paths.channels_toml,
        CHANNELS.replace("id = \"UC1\"", "id = \"UC2\""),
    )
    .unwrap();

    let result = resync(&paths, &TomlConfig::default(), false).await;
    assert!(matches!(result, Err(Error::MissingChannelMapping { .. })));
    assert_eq!(std::fs::read_to_string(&paths.catalog_csv).unwrap(), before);
}

#[tokio::test]
async fn test_missing_channel_list_is_reported() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());
    let result = resync(&paths, &TomlConfig::default(), false).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_refresh_output_follows_csv_edits() {
    let (_dir, paths) = setup();
    let rows = vec![
        VideoRecord {
            id: "a".to_string(),
            track: "Kept".to_string(),
            artists: "B, A".to_string(),
            ..Default::default()
        },
        VideoRecord {
            id: "b".to_string(),
            track: "Hidden".to_string(),
            ignore: true,
            ..Default::default()
        },
    ];
    write_catalog(&rows.into_iter().collect(), &paths.catalog_csv).unwrap();

    assert_eq!(refresh_output(&paths).unwrap(), 1);

    let rows = published(&paths.published_json);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["track"], "Kept");
    assert_eq!(rows[0]["artists"], serde_json::json!(["A", "B"]));

    // refresh never re-extracts or rewrites the catalog
    let catalog = read_catalog(&paths.catalog_csv).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_refresh_output_without_catalog_publishes_nothing() {
    let (_dir, paths) = setup();
    assert_eq!(refresh_output(&paths).unwrap(), 0);
    assert!(published(&paths.published_json).is_empty());
}
