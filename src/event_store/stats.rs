//! Usage file statistics
//!
//! Size on disk and record counts, for the report and for operators
//! keeping an eye on how large the flat file grows between trims.

use super::store::JsonStore;
use crate::types::{AnalyticsDocument, StoreStats};

/// Collector for usage file statistics
pub struct StatsCollector<'a> {
    store: &'a JsonStore<AnalyticsDocument>,
}

impl<'a> StatsCollector<'a> {
    pub fn new(store: &'a JsonStore<AnalyticsDocument>) -> Self {
        Self { store }
    }

    /// Collect all statistics
    pub fn collect(&self) -> StoreStats {
        let doc = self.store.load();
        Self::from_document(&doc, self.store.file_size())
    }

    pub fn from_document(doc: &AnalyticsDocument, file_size: u64) -> StoreStats {
        StoreStats {
            file_size,
            session_count: doc.sessions.len(),
            feature_count: doc.features.len(),
            notification_count: doc.notifications.len(),
        }
    }
}
