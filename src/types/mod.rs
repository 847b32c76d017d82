//! Data types for visitor analytics
//!
//! This module contains the records and documents persisted to the JSON
//! files, plus the summary types derived from them.

mod contact;
mod document;
mod feature;
mod feedback;
mod notification;
mod records;
mod session;
mod summary;

pub use contact::{
    ContactDocument, ContactRecord, ContactRow, ContactStats, NewsletterSubscriber, CONTACT_SOURCE,
};
pub use document::AnalyticsDocument;
pub use feature::{display_name, FeatureCounter, FEATURE_DISPLAY_NAMES};
pub use feedback::{FeedbackDocument, FeedbackRecord, FeedbackRow, FeedbackStats, Rating};
pub use notification::{NotificationRecord, NEW_VISITOR};
pub use records::Records;
pub use session::{GeoInfo, SessionContext, SessionRecord};
pub use summary::{AnalyticsSummary, Browser, GeoBreakdown, StoreStats, VisitorSummary};

/// Placeholder for identity fields the caller did not supply
pub const UNKNOWN: &str = "unknown";

/// Identity recorded when a session has no user id
pub const ANONYMOUS: &str = "anonymous";

pub(crate) fn default_unknown() -> String {
    UNKNOWN.to_string()
}

pub(crate) fn default_anonymous() -> String {
    ANONYMOUS.to_string()
}
