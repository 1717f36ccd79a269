//! The `Store` trait and its JSON-file implementation.
//!
//! [`JsonStore`] keeps every record in memory, keyed by opaque id, and
//! (when it has a path) rewrites the whole file after each mutation:
//!
//! | Platform | Default path |
//! |----------|--------------|
//! | Windows  | `%LOCALAPPDATA%\english-coach\records.json` |
//! | macOS    | `~/Library/Application Support/english-coach/records.json` |
//! | Linux    | `~/.local/share/english-coach/records.json` |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use thiserror::Error;

use crate::store::record::{Record, RecordData, RecordFilter};

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("record store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no record with id {0}")]
    NotFound(String),

    #[error("record store lock poisoned")]
    Poisoned,
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Create/read/update access to practice records.
///
/// Implementations must be `Send + Sync` so one store can be shared behind
/// an `Arc<dyn Store>` by the orchestrator and the UI.
pub trait Store: Send + Sync {
    /// Persist `data` as a new record and return its id.
    fn save(&self, data: RecordData) -> Result<String, StoreError>;

    fn get(&self, id: &str) -> Result<Option<Record>, StoreError>;

    /// Replace the payload of an existing record, keeping id and timestamp.
    fn update(&self, id: &str, data: RecordData) -> Result<(), StoreError>;

    /// Matching records, oldest first.
    fn list(&self, filter: &RecordFilter) -> Result<Vec<Record>, StoreError>;
}

// ---------------------------------------------------------------------------
// JsonStore
// ---------------------------------------------------------------------------

pub struct JsonStore {
    records: Mutex<BTreeMap<String, Record>>,
    path: Option<PathBuf>,
}

impl JsonStore {
    /// A store that is never written to disk (useful for tests).
    pub fn in_memory() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            path: None,
        }
    }

    /// Open the store at `path`, starting empty when the file does not exist.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            let list: Vec<Record> = serde_json::from_str(&data)?;
            list.into_iter().map(|r| (r.id.clone(), r)).collect()
        } else {
            BTreeMap::new()
        };
        log::debug!("store: {} records loaded from {}", records.len(), path.display());
        Ok(Self {
            records: Mutex::new(records),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn flush(&self, records: &BTreeMap<String, Record>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let list: Vec<&Record> = records.values().collect();
        std::fs::write(path, serde_json::to_string_pretty(&list)?)?;
        Ok(())
    }
}

/// `"<kind>-<unix_ms>-<random hex>"`.
fn new_id(kind: &str, now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let salt: u32 = rand::thread_rng().gen();
    format!("{kind}-{millis}-{salt:08x}")
}

impl Store for JsonStore {
    fn save(&self, data: RecordData) -> Result<String, StoreError> {
        let now = SystemTime::now();
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;

        let mut id = new_id(data.kind().as_str(), now);
        while records.contains_key(&id) {
            id = new_id(data.kind().as_str(), now);
        }

        let created_at = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        records.insert(
            id.clone(),
            Record {
                id: id.clone(),
                created_at,
                data,
            },
        );
        if let Err(e) = self.flush(&records) {
            records.remove(&id);
            return Err(e);
        }
        log::debug!("store: saved {id}");
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Option<Record>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(id).cloned())
    }

    fn update(&self, id: &str, data: RecordData) -> Result<(), StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let previous = std::mem::replace(&mut record.data, data);
        if let Err(e) = self.flush(&records) {
            if let Some(record) = records.get_mut(id) {
                record.data = previous;
            }
            return Err(e);
        }
        Ok(())
    }

    fn list(&self, filter: &RecordFilter) -> Result<Vec<Record>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let mut found: Vec<Record> = records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
