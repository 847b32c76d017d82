//! Event Store Module
//!
//! This module provides the persistence core shared by every tracker:
//! - `JsonStore`: fail-open, lock-guarded JSON document persistence
//! - `DocumentCache`: single-slot read-through cache, cleared on save
//! - `RetentionPolicy`: bounds session and notification history
//! - `aggregate`: summary statistics over a document snapshot
//! - `StatsCollector`: file size and record counts
//!
//! # Architecture
//!
//! ```text
//! Write Path (lock held throughout):
//! ┌─────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Tracker │───►│ load (cache  │───►│ mutate +     │───►│ atomic save, │
//! │  call   │    │ or file)     │    │ retention    │    │ clear cache  │
//! └─────────┘    └──────────────┘    └──────────────┘    └──────────────┘
//!
//! Read Path:
//! ┌──────────────┐    ┌────────────────┐
//! │ cache hit?   │─no►│ read + parse   │───► document (empty on error)
//! └──────────────┘    └────────────────┘
//! ```

pub mod aggregate;
mod cache;
mod retention;
mod stats;
mod store;

pub use cache::DocumentCache;
pub use retention::{RetentionOutcome, RetentionPolicy};
pub use stats::StatsCollector;
pub use store::{Document, JsonStore, Mutation};
