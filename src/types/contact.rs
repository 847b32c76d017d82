//! Contact registrations and newsletter subscribers

use serde::{Deserialize, Serialize};

use super::Records;
use crate::utils::time::now_timestamp;

/// Source tag written on every contact record
pub const CONTACT_SOURCE: &str = "medical_ai_demo";

/// One registered contact, keyed by (normalized) email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub contact_id: String,
    #[serde(default)]
    pub timestamp: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub newsletter_subscription: bool,
    #[serde(default)]
    pub research_collaboration: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    CONTACT_SOURCE.to_string()
}

/// Lightweight entry added when a new contact opts into the newsletter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl From<&ContactRecord> for NewsletterSubscriber {
    fn from(contact: &ContactRecord) -> Self {
        Self {
            email: contact.email.clone(),
            name: contact.name.clone(),
            timestamp: contact.timestamp.clone(),
            interests: contact.interests.clone(),
        }
    }
}

/// Totals refreshed on every contact write. A document that has never been
/// written carries an empty `last_updated`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactStats {
    #[serde(default)]
    pub total_contacts: usize,
    #[serde(default)]
    pub newsletter_subscribers: usize,
    #[serde(default)]
    pub last_updated: String,
}

/// Top-level contents of `user_contacts.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDocument {
    #[serde(default)]
    pub contacts: Records<ContactRecord>,
    #[serde(default)]
    pub newsletter_subscribers: Records<NewsletterSubscriber>,
    #[serde(default)]
    pub stats: ContactStats,
}

impl ContactDocument {
    /// Whether a contact with this (already normalized) email exists
    pub fn has_email(&self, email: &str) -> bool {
        self.contacts.iter().any(|c| c.email.eq_ignore_ascii_case(email))
            || self.contacts.unparsed.iter().any(|raw| {
                raw.get("email")
                    .and_then(|e| e.as_str())
                    .is_some_and(|e| e.trim().eq_ignore_ascii_case(email))
            })
    }

    pub fn refresh_stats(&mut self) {
        self.stats.total_contacts = self.contacts.len();
        self.stats.newsletter_subscribers = self.newsletter_subscribers.len();
        self.stats.last_updated = now_timestamp();
    }
}

/// Flattened contact row for tabular export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRow {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub interests: String,
    pub newsletter_subscription: bool,
    pub research_collaboration: bool,
    pub message: Option<String>,
}

impl From<&ContactRecord> for ContactRow {
    fn from(contact: &ContactRecord) -> Self {
        Self {
            timestamp: contact.timestamp.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            interests: contact.interests.join(", "),
            newsletter_subscription: contact.newsletter_subscription,
            research_collaboration: contact.research_collaboration,
            message: contact.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_email_ignores_case() {
        let doc: ContactDocument = serde_json::from_value(json!({
            "contacts": [{"contact_id": "1", "name": "Ada", "email": "ada@example.org"}]
        }))
        .unwrap();

        assert!(doc.has_email("ada@example.org"));
        assert!(doc.has_email("ADA@example.org"));
        assert!(!doc.has_email("bob@example.org"));
        assert_eq!(doc.contacts[0].source, CONTACT_SOURCE);
    }

    #[test]
    fn test_contact_without_email_is_set_aside() {
        let doc: ContactDocument = serde_json::from_value(json!({
            "contacts": [{"contact_id": "1", "name": "No Email"}],
            "newsletter_subscribers": []
        }))
        .unwrap();
        assert!(doc.contacts.is_empty());
        assert_eq!(doc.contacts.unparsed.len(), 1);
    }

    #[test]
    fn test_has_email_sees_unreadable_contacts() {
        let doc: ContactDocument = serde_json::from_value(json!({
            "contacts": [{"email": "Old@Example.org", "name": 7}]
        }))
        .unwrap();
        assert!(doc.contacts.is_empty());
        assert!(doc.has_email("old@example.org"));
    }

    #[test]
    fn test_default_stats_are_deterministic() {
        let raw = json!({"contacts": [], "newsletter_subscribers": []});
        let first: ContactDocument = serde_json::from_value(raw.clone()).unwrap();
        let second: ContactDocument = serde_json::from_value(raw).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.stats.last_updated, "");
    }
}
