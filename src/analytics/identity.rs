//! Identity correlation after a successful contact submission.
//!
//! Merges the history recorded under the visitor's anonymous id into an
//! identity keyed by the submitted email. Order matters: alias, then
//! identify, then the profile update, then the completion event. Aliasing
//! after identify is silently ignored by the service.

use super::events::{self, CONTACT_FORM_SUBMITTED, CONTACT_SOURCE, FORM_SOURCE};
use super::{best_effort, AnalyticsClient};
use crate::domain::PersonName;
use crate::error::AnalyticsResult;
use crate::models::{AnalyticsIdentity, ClientContext, ContactFormInput, Properties};
use serde_json::json;
use std::sync::Arc;

/// Runs the correlation protocol against an [`AnalyticsClient`].
#[derive(Clone)]
pub struct IdentityCorrelator {
    analytics: Arc<dyn AnalyticsClient>,
}

impl IdentityCorrelator {
    pub fn new(analytics: Arc<dyn AnalyticsClient>) -> Self {
        Self { analytics }
    }

    /// Correlate identities for a submission whose email was already sent.
    ///
    /// Never fails. If any step errors, a reduced completion event carrying
    /// only the language and success flag is emitted instead.
    pub fn correlate(&self, input: &ContactFormInput, context: &ClientContext) {
        match self.try_correlate(input, context) {
            Ok(identity) => {
                tracing::debug!(
                    aliased = identity.needs_alias(),
                    "Analytics identity correlated"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Identity correlation failed, sending reduced event");
                let mut reduced = Properties::new();
                reduced.insert("language".to_string(), json!(input.language.as_str()));
                reduced.insert("success".to_string(), json!(true));
                best_effort("reduced completion event", || {
                    self.analytics.track(CONTACT_FORM_SUBMITTED, &reduced)
                });
            }
        }
    }

    fn try_correlate(
        &self,
        input: &ContactFormInput,
        context: &ClientContext,
    ) -> AnalyticsResult<AnalyticsIdentity> {
        let email = input.trimmed_email();
        let identity = AnalyticsIdentity {
            anonymous_id: self
                .analytics
                .distinct_id()
                .filter(|id| !id.trim().is_empty()),
            identified_id: email.to_string(),
        };

        match &identity.anonymous_id {
            Some(anonymous_id) if anonymous_id != email => {
                self.analytics.alias(email, anonymous_id)?;
            }
            _ => {}
        }

        self.analytics.identify(email)?;
        self.analytics
            .set_profile(&profile_attributes(input, context, &identity))?;
        self.analytics
            .track(CONTACT_FORM_SUBMITTED, &completion_properties(input, &identity))?;

        Ok(identity)
    }
}

/// People-profile attributes for the newly identified visitor.
fn profile_attributes(
    input: &ContactFormInput,
    context: &ClientContext,
    identity: &AnalyticsIdentity,
) -> Properties {
    let name = input.trimmed_name();
    let split = PersonName::split(name);

    let mut attributes = Properties::new();
    attributes.insert("$email".to_string(), json!(identity.identified_id));
    attributes.insert("$name".to_string(), json!(name));
    attributes.insert("$first_name".to_string(), json!(split.first));
    attributes.insert("$last_name".to_string(), json!(split.last));
    attributes.insert("Contact Source".to_string(), json!(CONTACT_SOURCE));
    attributes.insert(
        "Preferred Language".to_string(),
        json!(input.language.as_str()),
    );
    attributes.insert("Contact Date".to_string(), json!(events::iso_timestamp()));
    attributes.insert("User Agent".to_string(), json!(context.user_agent()));
    attributes.insert("Referrer".to_string(), json!(context.referrer()));
    attributes.insert(
        "First Contact Anonymous ID".to_string(),
        json!(identity.anonymous_id),
    );
    attributes
}

/// Properties of the `Contact Form Submitted` event. Carries the message length, never its text.
fn completion_properties(input: &ContactFormInput, identity: &AnalyticsIdentity) -> Properties {
    let mut properties = Properties::new();
    properties.insert("user_email".to_string(), json!(identity.identified_id));
    properties.insert("user_name".to_string(), json!(input.trimmed_name()));
    properties.insert("message_length".to_string(), json!(input.message_length()));
    properties.insert("language".to_string(), json!(input.language.as_str()));
    properties.insert("form_source".to_string(), json!(FORM_SOURCE));
    properties.insert("success".to_string(), json!(true));
    properties.insert("timestamp".to_string(), json!(events::iso_timestamp()));
    properties.insert(
        "previous_anonymous_id".to_string(),
        json!(identity.anonymous_id),
    );
    properties
}
