//! Read-side views over feedback and contacts

use crate::types::{ContactRow, ContactStats, FeedbackRecord, FeedbackRow, FeedbackStats};

use super::FeedbackCollector;

pub fn feedback_stats(collector: &FeedbackCollector) -> FeedbackStats {
    collector.feedback.read(|doc| doc.stats.clone())
}

/// Newest feedback first; records with unparseable timestamps sort last
pub fn recent_feedback(collector: &FeedbackCollector, limit: usize) -> Vec<FeedbackRecord> {
    collector.feedback.read(|doc| {
        let mut records: Vec<&FeedbackRecord> = doc.feedback.iter().rev().collect();
        records.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));
        records.into_iter().take(limit).cloned().collect()
    })
}

pub fn contact_stats(collector: &FeedbackCollector) -> ContactStats {
    collector.contacts.read(|doc| doc.stats.clone())
}

/// One flattened row per feedback record, in submission order
pub fn export_feedback(collector: &FeedbackCollector) -> Vec<FeedbackRow> {
    collector
        .feedback
        .read(|doc| doc.feedback.iter().map(FeedbackRow::from).collect())
}

pub fn export_contacts(collector: &FeedbackCollector) -> Vec<ContactRow> {
    collector
        .contacts
        .read(|doc| doc.contacts.iter().map(ContactRow::from).collect())
}
