//! Feedback Collector - feedback and contact forms
//!
//! Two documents, each in its own store: `feedback.json` holds submitted
//! feedback with running rating stats, `user_contacts.json` holds
//! contacts and newsletter subscribers. Unlike usage tracking, a dropped
//! write is reported back so the form can ask the user to retry.

mod forms;
mod report;
mod submit;

pub use forms::{ContactForm, FeedbackForm, SubmitOutcome, Submission};

use crate::config::AnalyticsConfig;
use crate::error::SubmitError;
use crate::event_store::JsonStore;
use crate::types::{
    ContactDocument, ContactRow, ContactStats, FeedbackDocument, FeedbackRecord, FeedbackRow,
    FeedbackStats, SessionContext,
};

/// Thread-safe collector for feedback and contact submissions
pub struct FeedbackCollector {
    pub(crate) feedback: JsonStore<FeedbackDocument>,
    pub(crate) contacts: JsonStore<ContactDocument>,
}

impl FeedbackCollector {
    /// Create a collector, initializing both files when absent
    pub fn new(config: &AnalyticsConfig) -> Self {
        let collector = Self::open_read_only(config);
        collector.feedback.ensure_initialized();
        collector.contacts.ensure_initialized();
        collector
    }

    /// Open both stores without creating files; missing ones read as empty
    pub fn open_read_only(config: &AnalyticsConfig) -> Self {
        Self {
            feedback: JsonStore::new(config.feedback_path(), config.cache_enabled),
            contacts: JsonStore::new(config.contacts_path(), config.cache_enabled),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&AnalyticsConfig::from_env())
    }

    pub fn feedback_store(&self) -> &JsonStore<FeedbackDocument> {
        &self.feedback
    }

    pub fn contacts_store(&self) -> &JsonStore<ContactDocument> {
        &self.contacts
    }
}

impl Default for FeedbackCollector {
    fn default() -> Self {
        Self::from_env()
    }
}

// Operations implemented in submodules
impl FeedbackCollector {
    // Submission (from submit.rs)
    pub fn submit_feedback(&self, context: &SessionContext, form: FeedbackForm) -> Submission {
        self.try_submit_feedback(context, form).into()
    }

    pub fn try_submit_feedback(
        &self,
        context: &SessionContext,
        form: FeedbackForm,
    ) -> Result<SubmitOutcome, SubmitError> {
        submit::submit_feedback(self, context, form)
    }

    pub fn submit_contact(&self, context: &SessionContext, form: ContactForm) -> Submission {
        self.try_submit_contact(context, form).into()
    }

    pub fn try_submit_contact(
        &self,
        context: &SessionContext,
        form: ContactForm,
    ) -> Result<SubmitOutcome, SubmitError> {
        submit::submit_contact(self, context, form)
    }

    // Reporting (from report.rs)
    pub fn feedback_stats(&self) -> FeedbackStats {
        report::feedback_stats(self)
    }

    pub fn recent_feedback(&self, limit: usize) -> Vec<FeedbackRecord> {
        report::recent_feedback(self, limit)
    }

    pub fn contact_stats(&self) -> ContactStats {
        report::contact_stats(self)
    }

    pub fn export_feedback(&self) -> Vec<FeedbackRow> {
        report::export_feedback(self)
    }

    pub fn export_contacts(&self) -> Vec<ContactRow> {
        report::export_contacts(self)
    }
}
