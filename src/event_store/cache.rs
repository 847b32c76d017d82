//! Single-slot read-through document cache
//!
//! Holds the last document parsed from disk. Every successful save clears
//! the slot so the next load reads the file again. Each clear also bumps a
//! generation number; a reader that parsed the file before a save finished
//! fills the slot with [`DocumentCache::put_if_current`], which refuses the
//! stale document once the generation has moved on. The slot lives in one
//! process only; another process writing the same file is not observed
//! until this process writes.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Cache of the most recently loaded document
#[derive(Debug)]
pub struct DocumentCache<D> {
    slot: Mutex<Slot<D>>,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

#[derive(Debug)]
struct Slot<D> {
    doc: Option<D>,
    generation: u64,
}

impl<D: Clone> DocumentCache<D> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                doc: None,
                generation: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    /// Cached document, recording a hit or a miss
    pub fn get(&self) -> Option<D> {
        let slot = self.slot.lock();
        match slot.doc.as_ref() {
            Some(doc) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(doc.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn put(&self, doc: D) {
        self.slot.lock().doc = Some(doc);
    }

    /// Current generation; read it before loading the file
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    /// Fill the slot only if no invalidation happened since `generation`
    /// was read. Returns whether the document was cached.
    pub fn put_if_current(&self, doc: D, generation: u64) -> bool {
        let mut slot = self.slot.lock();
        if slot.generation != generation {
            return false;
        }
        slot.doc = Some(doc);
        true
    }

    /// Drop the cached document and start a new generation
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        if slot.doc.take().is_some() {
            self.invalidations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn is_warm(&self) -> bool {
        self.slot.lock().doc.is_some()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of times a warm slot was cleared
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl<D: Clone> Default for DocumentCache<D> {
    fn default() -> Self {
        Self::new()
    }
}
