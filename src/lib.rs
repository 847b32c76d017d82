//! Visitor Analytics
//!
//! Embedded usage tracking and feedback collection for a single-host web
//! dashboard, persisted as plain JSON files.
//!
//! # Features
//!
//! - **Fail-open storage**: unreadable files read as empty, failed writes are dropped and logged
//! - **Thread-Safe**: every read-modify-write runs under the store's lock
//! - **Bounded history**: session and notification retention at write time
//! - **Summaries**: sessions, unique users, feature usage, geography, browsers
//! - **Forms**: validated feedback and contact/newsletter submissions
//!
//! # Modules
//!
//! - `types`: Records, documents and summary types
//! - `event_store`: JSON store, cache, retention and aggregation
//! - `tracker`: Session and feature usage recording
//! - `feedback`: Feedback and contact forms
//! - `notify`: Outbound notification seam
//! - `validation`: Email and form value checks
//! - `config`: Data directory and limits
//! - `utils`: Atomic writes and timestamps
//!
//! # Example
//!
//! ```no_run
//! use visitor_analytics::{AnalyticsConfig, AnalyticsTracker, SessionContext};
//!
//! let tracker = AnalyticsTracker::new(AnalyticsConfig::from_env());
//! let session = SessionContext::new().agent("Mozilla/5.0");
//!
//! tracker.record_visit(&session, Some("127.0.0.1".to_string()), None);
//! tracker.record_feature_use("clustering_analysis").unwrap();
//!
//! println!("{} sessions", tracker.summarize().total_sessions);
//! ```

pub mod config;
pub mod error;
pub mod event_store;
pub mod feedback;
pub mod notify;
pub mod tracker;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use config::AnalyticsConfig;
pub use error::{NotifyError, StoreError, StoreResult, SubmitError, ValidationError};
pub use event_store::{JsonStore, Mutation};
pub use feedback::{ContactForm, FeedbackCollector, FeedbackForm, SubmitOutcome, Submission};
pub use notify::{LogNotifier, Notifier};
pub use tracker::AnalyticsTracker;
pub use types::{
    AnalyticsDocument, AnalyticsSummary, Browser, GeoBreakdown, GeoInfo, NotificationRecord,
    Rating, SessionContext, SessionRecord, StoreStats, VisitorSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
