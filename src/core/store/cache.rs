//! Record Cache
//!
//! Persists a parsed [`RecordSet`] so unchanged data is not re-parsed on every
//! invocation. A cache is usable only if it was written by the current loader
//! version for the same data root, and no JSON file or directory under that
//! root is newer than the cache. Directory timestamps catch deleted files.
//! An unreadable or unparsable cache is treated as absent.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::error::{StoreError, StoreResult};
use super::RecordSet;

/// Bumped whenever the shape of [`RecordSet`] or the load rules change.
pub const LOADER_VERSION: u32 = 2;

/// On-disk cache document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCache {
    pub loader_version: u32,
    /// Canonical data root the records were scanned from.
    pub data_root: PathBuf,
    pub built_at: DateTime<Utc>,
    pub records: RecordSet,
}

impl RecordCache {
    pub fn new(data_root: &Path, built_at: DateTime<Utc>, records: RecordSet) -> Self {
        Self {
            loader_version: LOADER_VERSION,
            data_root: canonical_root(data_root),
            built_at,
            records,
        }
    }

    /// True if this cache was built from `data_root`.
    pub fn is_for_root(&self, data_root: &Path) -> bool {
        self.data_root == canonical_root(data_root)
    }
}

/// Canonical form of a data root, or the path as given when it cannot be
/// resolved.
fn canonical_root(data_root: &Path) -> PathBuf {
    fs::canonicalize(data_root).unwrap_or_else(|_| data_root.to_path_buf())
}

/// True iff no source file was modified after the cache was built.
pub fn is_cache_valid<I>(built_at: DateTime<Utc>, source_mtimes: I) -> bool
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    source_mtimes.into_iter().all(|modified| modified <= built_at)
}

/// Modification time of every directory and every `*.json` file under
/// `data_root`, the root included.
///
/// Files whose metadata cannot be read report the maximum timestamp so they
/// always invalidate the cache.
pub fn source_modification_times(data_root: &Path) -> Vec<DateTime<Utc>> {
    WalkDir::new(data_root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Cannot walk data entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir() || is_json_file(entry))
        .map(|entry| {
            entry
                .metadata()
                .ok()
                .and_then(|meta| meta.modified().ok())
                .map(DateTime::<Utc>::from)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
        .collect()
}

fn is_json_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn read_cache(path: &Path) -> StoreResult<RecordCache> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Write the cache atomically: a temp file in the same directory renamed over
/// the target.
pub fn write_cache(path: &Path, cache: &RecordCache) -> StoreResult<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    serde_json::to_writer(&mut tmp, cache)?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|e| StoreError::cache(format!("failed to persist {}: {}", path.display(), e)))?;
    Ok(())
}

/// Return the cached records if the cache exists, parses, matches the loader
/// version and data root, and is not older than any data file or directory.
pub fn load_valid_cache(cache_path: &Path, data_root: &Path) -> Option<RecordSet> {
    if !cache_path.exists() {
        log::debug!("No record cache at {}", cache_path.display());
        return None;
    }

    let cache = match read_cache(cache_path) {
        Ok(cache) => cache,
        Err(e) => {
            log::warn!(
                "Discarding unreadable record cache {}: {}",
                cache_path.display(),
                e
            );
            return None;
        }
    };

    if cache.loader_version != LOADER_VERSION {
        log::info!(
            "Record cache was written by loader v{}, current is v{}",
            cache.loader_version,
            LOADER_VERSION
        );
        return None;
    }

    if !cache.is_for_root(data_root) {
        log::info!(
            "Record cache belongs to {}, not {}",
            cache.data_root.display(),
            data_root.display()
        );
        return None;
    }

    if !is_cache_valid(cache.built_at, source_modification_times(data_root)) {
        log::info!("Data files changed since {}, rebuilding cache", cache.built_at);
        return None;
    }

    Some(cache.records)
}
