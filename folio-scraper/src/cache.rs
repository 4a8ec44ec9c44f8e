use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use folio_core::model::BuildData;

use crate::error::FetchError;

/// Default cache location inside the site checkout.
pub const DEFAULT_PATH: &str = ".folio/build-cache.json";

/// Cached results older than this are refetched from the network.
pub const MAX_AGE: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// On-disk cache format: the aggregated document plus its capture time.
#[derive(Debug, Deserialize)]
struct CacheFile {
    data: BuildData,
    /// Epoch milliseconds at save time.
    timestamp: i64,
}

#[derive(Serialize)]
struct CacheFileRef<'a> {
    data: &'a BuildData,
    timestamp: i64,
}

/// Load cached build data if it exists and is still fresh.
///
/// Every failure mode (missing file, unreadable JSON, stale timestamp) is a
/// miss; the cache can never fail a build.
pub fn load(path: &Path) -> Option<BuildData> {
    let contents = fs::read_to_string(path).ok()?;
    let cached: CacheFile = match serde_json::from_str(&contents) {
        Ok(cached) => cached,
        Err(e) => {
            log::debug!("cache: ignoring unreadable entry at {}: {e}", path.display());
            return None;
        }
    };
    if !is_fresh(cached.timestamp, Utc::now().timestamp_millis()) {
        log::debug!("cache: entry at {} has expired", path.display());
        return None;
    }
    Some(cached.data)
}

/// Persist freshly fetched build data with the current timestamp.
pub fn save(path: &Path, data: &BuildData) -> Result<(), FetchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let entry = CacheFileRef {
        data,
        timestamp: Utc::now().timestamp_millis(),
    };
    let contents = serde_json::to_string(&entry)?;
    fs::write(path, contents)?;
    Ok(())
}

/// A cached result is usable strictly inside the freshness window. An entry
/// stamped in the future (clock adjustments) counts as fresh rather than
/// forcing a refetch.
pub(crate) fn is_fresh(saved_at_millis: i64, now_millis: i64) -> bool {
    now_millis - saved_at_millis < MAX_AGE.as_millis() as i64
}

/// What `folio cache show` reports about the entry on disk.
#[derive(Debug)]
pub struct CacheInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub saved_at_millis: i64,
    pub fresh: bool,
}

/// Inspect the cache entry without consuming it. None when there is no
/// readable entry at all.
pub fn inspect(path: &Path) -> Option<CacheInfo> {
    let size_bytes = fs::metadata(path).ok()?.len();
    let contents = fs::read_to_string(path).ok()?;
    let cached: CacheFile = serde_json::from_str(&contents).ok()?;
    Some(CacheInfo {
        path: path.to_path_buf(),
        size_bytes,
        saved_at_millis: cached.timestamp,
        fresh: is_fresh(cached.timestamp, Utc::now().timestamp_millis()),
    })
}

/// Remove the cache entry, reporting the bytes freed.
pub fn clear(path: &Path) -> Result<u64, FetchError> {
    if !path.exists() {
        return Ok(0);
    }
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    fs::remove_file(path)?;
    Ok(size)
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
