//! Record Store
//!
//! Loads every entity collection from the data directory into an immutable
//! [`RecordSet`]. A single malformed file never aborts the load; it is logged,
//! recorded in the [`LoadReport`] and skipped. Only a missing data root is
//! escalated to the caller.
//!
//! # Layout
//!
//! ```text
//! <data root>/
//!   items/*.json                one item per file
//!   quests/*.json               one quest per file
//!   hideout/*.json              one hideout module per file
//!   bots.json                   array of ARCs
//!   projects.json               array of projects
//!   skillNodes.json             array of skills
//!   trades.json                 array of trades
//!   map-events/map-events.json  event schedule
//! ```

pub mod cache;
pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::models::{
    is_currency, Bot, EventSchedule, HideoutModule, Item, Project, Quest, Skill, Trade,
};

pub use cache::{is_cache_valid, RecordCache, LOADER_VERSION};
pub use error::{StoreError, StoreResult};

// ============================================================================
// Well-known subpaths
// ============================================================================

pub const ITEMS_DIR: &str = "items";
pub const QUESTS_DIR: &str = "quests";
pub const HIDEOUT_DIR: &str = "hideout";
pub const BOTS_FILE: &str = "bots.json";
pub const PROJECTS_FILE: &str = "projects.json";
pub const SKILLS_FILE: &str = "skillNodes.json";
pub const TRADES_FILE: &str = "trades.json";
pub const EVENTS_FILE: &str = "map-events/map-events.json";

// ============================================================================
// Record Set
// ============================================================================

/// Every entity collection, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    /// Items keyed by id, in first-seen order.
    pub items: IndexMap<String, Item>,
    pub quests: Vec<Quest>,
    pub hideout: Vec<HideoutModule>,
    pub bots: Vec<Bot>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub trades: Vec<Trade>,
    pub events: EventSchedule,
}

impl RecordSet {
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Insert an item, replacing any earlier item with the same id.
    /// Currency pseudo-items are never stored.
    pub fn insert_item(&mut self, item: Item) -> bool {
        if is_currency(&item.id) {
            return false;
        }
        self.items.insert(item.id.clone(), item);
        true
    }

    /// Total number of records across all collections.
    pub fn len(&self) -> usize {
        self.items.len()
            + self.quests.len()
            + self.hideout.len()
            + self.bots.len()
            + self.projects.len()
            + self.skills.len()
            + self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Load Report
// ============================================================================

/// A data file that was skipped during the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of a full scan of the data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub files_read: usize,
    pub skipped: Vec<SkippedFile>,
}

impl LoadReport {
    fn skip(&mut self, path: &Path, reason: impl ToString) {
        let reason = reason.to_string();
        log::warn!("Skipping data file {}: {}", path.display(), reason);
        self.skipped.push(SkippedFile {
            path: path.to_path_buf(),
            reason,
        });
    }
}

/// Where the records of a [`LoadedRecords`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Cache,
    Scan,
}

/// The outcome of [`RecordStore::open`].
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    pub records: RecordSet,
    pub source: RecordSource,
    /// Empty when the records were restored from the cache.
    pub report: LoadReport,
}

// ============================================================================
// Record Store
// ============================================================================

/// Loads a [`RecordSet`] from a data root, optionally through a cache file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_root: PathBuf,
    cache_path: Option<PathBuf>,
}

impl RecordStore {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            cache_path: None,
        }
    }

    /// Persist and reuse parsed records through the given cache file.
    pub fn with_cache(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(cache_path.into());
        self
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Restore the records from a valid cache, or rescan the data root and
    /// refresh the cache.
    pub fn open(&self) -> StoreResult<LoadedRecords> {
        check_data_root(&self.data_root)?;

        let Some(cache_path) = &self.cache_path else {
            let (records, report) = load_with_report(&self.data_root)?;
            return Ok(LoadedRecords {
                records,
                source: RecordSource::Scan,
                report,
            });
        };

        if let Some(records) = cache::load_valid_cache(cache_path, &self.data_root) {
            log::debug!("Restored {} records from {}", records.len(), cache_path.display());
            return Ok(LoadedRecords {
                records,
                source: RecordSource::Cache,
                report: LoadReport::default(),
            });
        }

        // Stamp before scanning so edits made during the scan invalidate the cache.
        let built_at = Utc::now();
        let (records, report) = load_with_report(&self.data_root)?;
        log::info!(
            "Rebuilt record cache: {} records from {} files ({} skipped)",
            records.len(),
            report.files_read,
            report.skipped.len()
        );

        let cache = RecordCache::new(&self.data_root, built_at, records);
        if let Err(e) = cache::write_cache(cache_path, &cache) {
            log::warn!("Failed to write record cache {}: {}", cache_path.display(), e);
        }

        Ok(LoadedRecords {
            records: cache.records,
            source: RecordSource::Scan,
            report,
        })
    }
}

// ============================================================================
// Loading
// ============================================================================

fn check_data_root(data_root: &Path) -> StoreResult<()> {
    if !data_root.exists() {
        return Err(StoreError::DataRootMissing(data_root.to_path_buf()));
    }
    if !data_root.is_dir() {
        return Err(StoreError::NotADirectory(data_root.to_path_buf()));
    }
    Ok(())
}

/// Scan the data root and build a [`RecordSet`]. Skipped files are logged.
pub fn load(data_root: &Path) -> StoreResult<RecordSet> {
    load_with_report(data_root).map(|(records, _)| records)
}

/// Scan the data root, returning the records together with the list of files
/// that could not be used.
pub fn load_with_report(data_root: &Path) -> StoreResult<(RecordSet, LoadReport)> {
    check_data_root(data_root)?;

    let mut report = LoadReport::default();
    let mut records = RecordSet::default();

    for item in load_dir::<Item>(&data_root.join(ITEMS_DIR), &mut report) {
        if item.id.is_empty() {
            log::warn!("Ignoring item without an id: {:?}", item.name);
            continue;
        }
        if !records.insert_item(item) {
            log::debug!("Ignoring currency pseudo-item in items directory");
        }
    }

    records.quests = load_dir(&data_root.join(QUESTS_DIR), &mut report);
    records.hideout = load_dir(&data_root.join(HIDEOUT_DIR), &mut report);
    records.bots = load_array(&data_root.join(BOTS_FILE), &mut report);
    records.projects = load_array(&data_root.join(PROJECTS_FILE), &mut report);
    records.skills = load_array(&data_root.join(SKILLS_FILE), &mut report);
    records.trades = load_array(&data_root.join(TRADES_FILE), &mut report);
    records.events = load_document(&data_root.join(EVENTS_FILE), &mut report).unwrap_or_default();

    Ok((records, report))
}

fn is_json_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// One record per `*.json` file, in directory-listing order.
fn load_dir<T: DeserializeOwned>(dir: &Path, report: &mut LoadReport) -> Vec<T> {
    if !dir.is_dir() {
        log::debug!("No directory at {}", dir.display());
        return Vec::new();
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            report.skip(dir, e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                report.skip(dir, format!("Failed to read directory entry: {e}"));
                continue;
            }
        };

        if !is_json_file(&path) {
            continue;
        }

        match parse_file(&path) {
            Ok(record) => {
                report.files_read += 1;
                records.push(record);
            }
            Err(e) => report.skip(&path, e),
        }
    }
    records
}

/// A single file holding an array of records.
fn load_array<T: DeserializeOwned>(path: &Path, report: &mut LoadReport) -> Vec<T> {
    load_document(path, report).unwrap_or_default()
}

fn load_document<T: DeserializeOwned>(path: &Path, report: &mut LoadReport) -> Option<T> {
    if !path.exists() {
        log::debug!("No data file at {}", path.display());
        return None;
    }
    match parse_file(path) {
        Ok(document) => {
            report.files_read += 1;
            Some(document)
        }
        Err(e) => {
            report.skip(path, e);
            None
        }
    }
}
