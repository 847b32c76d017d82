//! Feedback and contact submission

use std::collections::BTreeMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{SubmitError, ValidationError};
use crate::event_store::Mutation;
use crate::types::{
    ContactRecord, FeedbackRecord, NewsletterSubscriber, SessionContext, CONTACT_SOURCE,
};
use crate::utils::time::now_timestamp;
use crate::validation;

use super::{ContactForm, FeedbackCollector, FeedbackForm, SubmitOutcome};

/// Validate and append one feedback record, then refresh the totals
pub fn submit_feedback(
    collector: &FeedbackCollector,
    context: &SessionContext,
    form: FeedbackForm,
) -> Result<SubmitOutcome, SubmitError> {
    let email = validation::optional_email(form.email.as_deref())?;
    let feature_ratings = check_ratings(&form.feature_ratings)?;

    for warning in [
        validation::validate_user_type(&form.user_type),
        validation::validate_experience_level(&form.experience_level),
        validation::validate_usage_frequency(&form.usage_frequency),
    ]
    .into_iter()
    .flatten()
    {
        debug!("{}", warning);
    }

    let record = FeedbackRecord {
        feedback_id: Uuid::new_v4().to_string(),
        timestamp: now_timestamp(),
        user_type: form.user_type,
        experience_level: form.experience_level,
        overall_rating: Some(form.overall_rating),
        feature_ratings,
        usage_frequency: form.usage_frequency,
        valuable_features: form.valuable_features,
        improvement_areas: form.improvement_areas,
        feedback_text: form.feedback_text.filter(|t| !t.trim().is_empty()),
        email,
        session_id: context.session_id_string(),
        user_agent: context.user_agent_or_unknown(),
    };
    let id = record.feedback_id.clone();

    collector
        .feedback
        .update(|doc| {
            doc.feedback.push(record);
            doc.refresh_stats();
        })
        .ok_or(SubmitError::Storage("feedback"))?;

    info!(feedback_id = %id, "Feedback saved");
    Ok(SubmitOutcome::Saved(id))
}

/// Register a contact. A known email is accepted without writing.
pub fn submit_contact(
    collector: &FeedbackCollector,
    context: &SessionContext,
    form: ContactForm,
) -> Result<SubmitOutcome, SubmitError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName.into());
    }
    let email = validation::required_email(&form.email)?;

    let record = ContactRecord {
        contact_id: Uuid::new_v4().to_string(),
        timestamp: now_timestamp(),
        name: name.to_string(),
        email,
        interests: form.interests,
        newsletter_subscription: form.newsletter_subscription,
        research_collaboration: form.research_collaboration,
        message: form.message.filter(|m| !m.trim().is_empty()),
        session_id: context.session_id_string(),
        source: CONTACT_SOURCE.to_string(),
    };

    let outcome = collector
        .contacts
        .update_with(|doc| {
            if doc.has_email(&record.email) {
                return Mutation::Discard(SubmitOutcome::AlreadyRegistered);
            }

            if record.newsletter_subscription {
                doc.newsletter_subscribers.push(NewsletterSubscriber::from(&record));
            }
            let id = record.contact_id.clone();
            doc.contacts.push(record);
            doc.refresh_stats();
            Mutation::Commit(SubmitOutcome::Saved(id))
        })
        .ok_or(SubmitError::Storage("contact information"))?;

    match &outcome {
        SubmitOutcome::Saved(id) => info!(contact_id = %id, "Contact saved"),
        SubmitOutcome::AlreadyRegistered => debug!("Contact already registered"),
    }
    Ok(outcome)
}

fn check_ratings(ratings: &BTreeMap<String, i64>) -> Result<BTreeMap<String, u8>, ValidationError> {
    ratings
        .iter()
        .map(|(feature, value)| Ok((feature.clone(), validation::feature_rating(feature, *value)?)))
        .collect()
}
