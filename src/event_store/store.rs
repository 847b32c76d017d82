//! JSON Store - fail-open document persistence
//!
//! A `JsonStore` owns one JSON file holding one document. Reads never
//! fail: a missing, unreadable or corrupt file is treated as an empty
//! document. Writes never fail either: errors are logged and the write is
//! dropped, so telemetry can never take down the page that emits it.
//!
//! Mutations go through [`JsonStore::update`], which holds the store's
//! write lock across load, mutate and save. Two processes sharing a file
//! are not coordinated; the last writer wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::cache::DocumentCache;
use crate::error::{StoreError, StoreResult};
use crate::utils::atomic::atomic_write;

/// Anything that can live in a store file
pub trait Document: Serialize + DeserializeOwned + Default + Clone + Send {}

impl<T> Document for T where T: Serialize + DeserializeOwned + Default + Clone + Send {}

/// Outcome of an `update_with` closure
#[derive(Debug)]
pub enum Mutation<R> {
    /// Persist the mutated document
    Commit(R),
    /// Leave the file untouched
    Discard(R),
}

/// One JSON document persisted to one file
pub struct JsonStore<D: Document> {
    path: PathBuf,
    cache: Option<DocumentCache<D>>,
    write_lock: Mutex<()>,
}

impl<D: Document> JsonStore<D> {
    /// Create a store for `path`, optionally backed by the document cache
    pub fn new<P: AsRef<Path>>(path: P, cache_enabled: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: cache_enabled.then(DocumentCache::new),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The read-through cache, if enabled
    pub fn cache(&self) -> Option<&DocumentCache<D>> {
        self.cache.as_ref()
    }

    /// Create the directory and an empty document if the file is absent.
    ///
    /// Returns `true` when a new file was written. Safe to call repeatedly.
    pub fn ensure_initialized(&self) -> bool {
        let _guard = self.write_lock.lock();

        if self.path.exists() {
            return false;
        }

        match self.try_save(&D::default()) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Initialized empty document");
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not initialize document");
                false
            }
        }
    }

    /// Read and parse the file, bypassing the cache
    pub fn try_load(&self) -> StoreResult<D> {
        let content = fs::read_to_string(&self.path)?;
        let doc = serde_json::from_str(&content)?;
        Ok(doc)
    }

    /// Load the document, falling back to an empty one on any error
    pub fn load(&self) -> D {
        if let Some(doc) = self.cache.as_ref().and_then(DocumentCache::get) {
            return doc;
        }

        // Read before parsing: a save that lands meanwhile bumps it
        let generation = self.cache.as_ref().map(DocumentCache::generation);

        match self.try_load() {
            Ok(doc) => {
                if let (Some(cache), Some(generation)) = (&self.cache, generation) {
                    cache.put_if_current(doc.clone(), generation);
                }
                doc
            }
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No document on disk yet, starting empty");
                D::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable document, starting empty");
                D::default()
            }
        }
    }

    /// Serialize and atomically replace the file, then invalidate the cache
    pub fn try_save(&self, doc: &D) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(doc)?;
        atomic_write(&self.path, &content)?;

        if let Some(cache) = &self.cache {
            cache.invalidate();
        }
        Ok(())
    }

    /// Persist the document; failures are logged and reported as `false`
    pub fn save(&self, doc: &D) -> bool {
        match self.try_save(doc) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Dropping write");
                false
            }
        }
    }

    /// Run a read-only closure against the current document
    pub fn read<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        let doc = self.load();
        f(&doc)
    }

    /// Load, mutate and save under the write lock.
    ///
    /// Returns `None` if the save failed.
    pub fn update<R>(&self, f: impl FnOnce(&mut D) -> R) -> Option<R> {
        self.update_with(|doc| Mutation::Commit(f(doc)))
    }

    /// Like [`update`](Self::update), but the closure decides whether the
    /// document is written back. A discarded mutation always succeeds.
    pub fn update_with<R>(&self, f: impl FnOnce(&mut D) -> Mutation<R>) -> Option<R> {
        let _guard = self.write_lock.lock();

        let mut doc = self.load();
        match f(&mut doc) {
            Mutation::Commit(result) => self.save(&doc).then_some(result),
            Mutation::Discard(result) => Some(result),
        }
    }

    /// Drop any cached document so the next load reads the file
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate();
        }
    }

    /// Size of the backing file in bytes, zero when absent
    pub fn file_size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnalyticsDocument;
    use tempfile::TempDir;

    fn create_test_store(cache: bool) -> (JsonStore<AnalyticsDocument>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path().join("analytics").join("usage_data.json"), cache);
        (store, temp_dir)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (store, _temp_dir) = create_test_store(true);
        assert!(store.load().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        let (store, _temp_dir) = create_test_store(true);

        assert!(store.ensure_initialized());
        assert!(store.path().exists());
        let first = fs::read_to_string(store.path()).unwrap();

        assert!(!store.ensure_initialized());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), first);

        let value: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert!(value["sessions"].is_array());
        assert!(value["features"].is_object());
        assert!(value["notifications"].is_array());
    }

    #[test]
    fn test_ensure_initialized_keeps_existing_data() {
        let (store, _temp_dir) = create_test_store(false);
        store.update(|doc| doc.features.increment("x")).unwrap();

        assert!(!store.ensure_initialized());
        assert_eq!(store.load().features.get("x"), 1);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let (store, _temp_dir) = create_test_store(true);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"sessions": [{"timest"#).unwrap();

        assert!(store.try_load().is_err());
        assert!(store.load().is_empty());

        // The next write replaces the corrupt file
        store.update(|doc| doc.features.increment("recovered")).unwrap();
        assert_eq!(store.try_load().unwrap().features.get("recovered"), 1);
    }

    #[test]
    fn test_save_load_round_trip_is_stable() {
        let (store, _temp_dir) = create_test_store(false);
        store.update(|doc| {
            doc.features.increment("b");
            doc.features.increment("a");
        });

        let before = fs::read_to_string(store.path()).unwrap();
        assert!(store.save(&store.load()));
        let after = fs::read_to_string(store.path()).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_cache_serves_until_write() {
        let (store, _temp_dir) = create_test_store(true);
        store.ensure_initialized();
        let cache = store.cache().unwrap();

        store.load();
        assert_eq!(cache.misses(), 1);
        assert!(cache.is_warm());

        // A change on disk is not seen while the slot is warm
        fs::write(store.path(), r#"{"sessions": [], "features": {"external": 9}, "notifications": []}"#)
            .unwrap();
        assert_eq!(store.load().features.get("external"), 0);
        assert_eq!(cache.hits(), 1);

        // Any successful save clears the slot
        store.update(|doc| doc.features.increment("local")).unwrap();
        assert!(!cache.is_warm());
        let doc = store.load();
        assert_eq!(doc.features.get("local"), 1);
    }

    #[test]
    fn test_without_cache_always_reads_fresh() {
        let (store, _temp_dir) = create_test_store(false);
        store.ensure_initialized();
        assert!(store.cache().is_none());

        store.load();
        fs::write(store.path(), r#"{"sessions": [], "features": {"external": 9}, "notifications": []}"#)
            .unwrap();
        assert_eq!(store.load().features.get("external"), 9);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store: JsonStore<AnalyticsDocument> = JsonStore::new(blocker.join("usage_data.json"), true);
        assert!(!store.save(&AnalyticsDocument::new()));
        assert!(store.update(|doc| doc.features.increment("x")).is_none());
        assert!(!store.ensure_initialized());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_discarded_mutation_is_not_written() {
        let (store, _temp_dir) = create_test_store(false);
        let result = store.update_with(|doc| {
            doc.features.increment("ghost");
            Mutation::Discard(42)
        });

        assert_eq!(result, Some(42));
        assert!(!store.path().exists());
    }
}
