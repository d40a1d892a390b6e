//! Contact form submission service.
//!
//! Orchestrates validation, email delivery, and analytics identity correlation
//! for one submission attempt.

use crate::analytics::events::contact_form_error;
use crate::analytics::{best_effort, AnalyticsClient, IdentityCorrelator};
use crate::config::Config;
use crate::domain::{validate, Locale, ValidationOutcome};
use crate::email::EmailDelivery;
use crate::messages;
use crate::models::{ClientContext, ContactFormInput, FailureReason, SubmissionOutcome, TemplateParams};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Email service identifiers and the owner's inbox.
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    pub service_id: String,
    pub template_en: String,
    pub template_es: String,
    pub public_key: String,
    pub owner_email: String,
}

impl SubmissionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            service_id: config.emailjs_service_id.clone(),
            template_en: config.emailjs_template_en.clone(),
            template_es: config.emailjs_template_es.clone(),
            public_key: config.emailjs_public_key.clone(),
            owner_email: config.owner_email.clone(),
        }
    }

    /// Template registered for `locale`. The two are not interchangeable.
    pub fn template_for(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.template_en,
            Locale::Es => &self.template_es,
        }
    }
}

/// Submission service trait for business operations.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Validate form fields without contacting any service.
    fn check(&self, input: &ContactFormInput) -> ValidationOutcome;

    /// Submit the form: validate, send the email, then correlate analytics identity.
    async fn submit(&self, input: ContactFormInput, context: &ClientContext) -> SubmissionOutcome;
}

/// Default implementation of SubmissionService.
pub struct SubmissionServiceImpl {
    settings: SubmissionSettings,
    email: Arc<dyn EmailDelivery>,
    analytics: Arc<dyn AnalyticsClient>,
    correlator: IdentityCorrelator,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SubmissionServiceImpl {
    /// Create a new submission service.
    pub fn new(
        settings: SubmissionSettings,
        email: Arc<dyn EmailDelivery>,
        analytics: Arc<dyn AnalyticsClient>,
    ) -> Self {
        Self {
            settings,
            correlator: IdentityCorrelator::new(analytics.clone()),
            email,
            analytics,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently waiting on the email service.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }

    fn failure(reason: FailureReason, message: impl Into<String>) -> SubmissionOutcome {
        SubmissionOutcome::Failure {
            reason,
            message: message.into(),
        }
    }
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
    fn check(&self, input: &ContactFormInput) -> ValidationOutcome {
        validate(input)
    }

    async fn submit(&self, input: ContactFormInput, context: &ClientContext) -> SubmissionOutcome {
        let locale = input.language;

        // Rejections return before the first await
        if let ValidationOutcome::Invalid(reason) = validate(&input) {
            tracing::info!(reason = reason.code(), "Contact form rejected");
            return Self::failure(
                reason.into(),
                messages::validation_failed(reason).localize(locale),
            );
        }

        let Some(_guard) = self.try_begin() else {
            tracing::info!("Contact form submission already in flight");
            return Self::failure(
                FailureReason::InFlight,
                messages::ALREADY_SENDING.localize(locale),
            );
        };

        let template_id = self.settings.template_for(locale);
        let params = TemplateParams::for_owner(&input, &self.settings.owner_email);

        tracing::info!(
            language = %locale,
            template = %template_id,
            message_len = input.message_length(),
            "Sending contact form message"
        );

        let sent = self
            .email
            .send(
                &self.settings.service_id,
                template_id,
                &params,
                &self.settings.public_key,
            )
            .await;

        match sent {
            Ok(()) => {
                tracing::info!(language = %locale, "Contact form message sent");
                self.correlator.correlate(&input, context);
                SubmissionOutcome::Success {
                    message: messages::MESSAGE_SENT.localize(locale).to_string(),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, language = %locale, "Email delivery failed");
                let event = contact_form_error(&e.to_string(), locale);
                best_effort("contact form error event", || {
                    self.analytics.track_event(&event)
                });
                Self::failure(
                    FailureReason::Delivery,
                    messages::delivery_failed(locale, &self.settings.owner_email),
                )
            }
        }
    }
}
