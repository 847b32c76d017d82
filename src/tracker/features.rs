//! Feature usage counters

use tracing::debug;

use crate::error::ValidationError;
use crate::validation;

use super::AnalyticsTracker;

/// Increment the counter for `feature` in one read-modify-write cycle.
///
/// Blank names are rejected before anything is read. `Ok(false)` means
/// the write was dropped.
pub fn record_feature_use(tracker: &AnalyticsTracker, feature: &str) -> Result<bool, ValidationError> {
    let feature = validation::feature_name(feature)?;

    let count = tracker.store.update(|doc| doc.features.increment(feature));
    if let Some(count) = count {
        debug!(feature, count, "Recorded feature use");
    }
    Ok(count.is_some())
}
