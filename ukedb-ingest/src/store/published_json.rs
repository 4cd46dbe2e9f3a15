//! Published catalog writer (`data/published.json`)

use std::path::Path;
use tracing::debug;
use ukedb_common::config::write_atomic;
use ukedb_common::{PublicRecord, Result};

/// Write the published records as a pretty-printed JSON array (atomic)
pub fn write_published(records: &[PublicRecord], path: &Path) -> Result<()> {
    let mut json = serde_json::to_vec_pretty(records)?;
    json.push(b'\n');
    write_atomic(path, &json)?;
    debug!(path = %path.display(), records = records.len(), "Published catalog written");
    Ok(())
}
