//! File-backed local record collections.
//!
//! The durable tier for the feature modules that do not use the live
//! document collections: one JSON file per named collection under the
//! configured data directory. Reads never fail (missing or malformed
//! content degrades to the caller's fallback) and write failures are
//! swallowed after logging, so in-memory state stays authoritative for
//! the rest of the session.

mod seed;

pub use seed::*;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::AppError;

/// Collection keys, one per feature module.
pub mod keys {
    pub const ATTENDANCE: &str = "hostelAttendance";
    pub const COMPLAINTS: &str = "hostelComplaints";
    pub const TASKS: &str = "hostelTasks";
    pub const LOST_FOUND_ITEMS: &str = "hostelLostFoundItems";
    pub const HELP_REQUESTS: &str = "hostelHelpRequests";
}

/// A record that lives in a local collection.
pub trait LocalRecord {
    fn record_id(&self) -> &str;
}

/// Durable CRUD over named JSON collections.
///
/// Mutations go through [`LocalRecordStore::modify`], which serializes
/// read/modify/write cycles within this process. Two processes sharing a
/// data directory still race last-write-wins; that limitation is accepted,
/// not worked around.
pub struct LocalRecordStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalRecordStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(dir).map_err(|e| {
            AppError::Internal(format!("Cannot create data dir {}: {}", dir.display(), e))
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read the collection at `key`, falling back on any failure.
    ///
    /// Absent or malformed content yields `fallback`; corrupt state degrades
    /// to empty rather than to an error.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let path = self.path_for(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return fallback,
            Err(e) => {
                tracing::warn!("Failed to read collection {}: {}", key, e);
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Malformed collection {}, using fallback: {}", key, e);
                fallback
            }
        }
    }

    /// Serialize `value` and write it to `key`. Failures are logged and
    /// swallowed.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize collection {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = std::fs::write(self.path_for(key), json) {
            tracing::warn!("Failed to persist collection {}: {}", key, e);
        }
    }

    /// Write `defaults` only if the stored collection is empty; returns
    /// whichever record set is current. Never overwrites existing data.
    pub fn seed_if_empty<T>(&self, key: &str, defaults: Vec<T>) -> Vec<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let existing: Vec<T> = self.load(key, Vec::new());
        if !existing.is_empty() {
            return existing;
        }

        self.save(key, &defaults);
        defaults
    }

    /// Read/modify/write the collection at `key` under the store's write
    /// lock. `f` receives the current records and returns the new records
    /// plus a result handed back to the caller.
    pub fn modify<T, R>(&self, key: &str, f: impl FnOnce(Vec<T>) -> (Vec<T>, R)) -> R
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let records: Vec<T> = self.load(key, Vec::new());
        let (updated, result) = f(records);
        self.save(key, &updated);
        result
    }
}

/// Produce a new collection where the record matching `id` has been patched
/// in place; every other record, and the collection order, is untouched. A
/// non-existent id returns the input unchanged.
pub fn patch_record<T, F>(records: &[T], id: &str, patch: F) -> Vec<T>
where
    T: LocalRecord + Clone,
    F: FnOnce(&mut T),
{
    let mut updated = records.to_vec();
    if let Some(record) = updated.iter_mut().find(|r| r.record_id() == id) {
        patch(record);
    }
    updated
}

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a client-style record id from the millisecond clock.
///
/// Monotonic within the process: same-millisecond calls bump past the last
/// issued value instead of colliding.
pub fn next_record_id() -> String {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now - 1);
    now.max(prev + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Item {
        id: String,
        label: String,
    }

    impl LocalRecord for Item {
        fn record_id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, label: &str) -> Item {
        Item {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    fn open_store(dir: &TempDir) -> LocalRecordStore {
        LocalRecordStore::open(dir.path()).expect("open store")
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let items = vec![item("1", "one"), item("2", "two")];
        store.save("things", &items);
        store.save("things", &vec![item("3", "three")]);

        let loaded: Vec<Item> = store.load("things", Vec::new());
        assert_eq!(loaded, vec![item("3", "three")]);
    }

    #[test]
    fn test_load_missing_key_returns_fallback() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let loaded: Vec<Item> = store.load("absent", vec![item("f", "fallback")]);
        assert_eq!(loaded, vec![item("f", "fallback")]);
    }

    #[test]
    fn test_load_corrupt_key_returns_fallback() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        std::fs::write(dir.path().join("broken.json"), "{not json!").unwrap();

        let loaded: Vec<Item> = store.load("broken", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_seed_if_empty_populates_once() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let seeded = store.seed_if_empty("demo", vec![item("1", "seeded")]);
        assert_eq!(seeded.len(), 1);

        // A second seed with different content must not overwrite.
        let again = store.seed_if_empty("demo", vec![item("2", "other")]);
        assert_eq!(again, vec![item("1", "seeded")]);

        let raw_before = std::fs::read(dir.path().join("demo.json")).unwrap();
        store.seed_if_empty("demo", vec![item("3", "third")]);
        let raw_after = std::fs::read(dir.path().join("demo.json")).unwrap();
        assert_eq!(raw_before, raw_after);
    }

    #[test]
    fn test_modify_persists_result() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.save("things", &vec![item("1", "one")]);

        let count = store.modify("things", |mut records: Vec<Item>| {
            records.push(item("2", "two"));
            let count = records.len();
            (records, count)
        });
        assert_eq!(count, 2);

        let loaded: Vec<Item> = store.load("things", Vec::new());
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_patch_record_only_touches_match() {
        let records = vec![item("1", "one"), item("2", "two"), item("3", "three")];

        let updated = patch_record(&records, "2", |r| r.label = "patched".to_string());

        assert_eq!(updated[0], records[0]);
        assert_eq!(updated[1].label, "patched");
        assert_eq!(updated[2], records[2]);
        // Input is untouched.
        assert_eq!(records[1].label, "two");
    }

    #[test]
    fn test_patch_record_unknown_id_is_identity() {
        let records = vec![item("1", "one"), item("2", "two")];
        let updated = patch_record(&records, "missing", |r| r.label = "nope".to_string());
        assert_eq!(updated, records);
    }

    #[test]
    fn test_next_record_id_is_monotonic() {
        let mut ids: Vec<i64> = (0..1000)
            .map(|_| next_record_id().parse().unwrap())
            .collect();
        let sorted = {
            let mut s = ids.clone();
            s.sort_unstable();
            s
        };
        assert_eq!(ids, sorted);
        ids.dedup();
        assert_eq!(ids.len(), 1000);
    }
}
