//! Integration tests for the submission orchestrator and identity correlation.

mod mocks;

use mocks::{AnalyticsCall, MockEmailDelivery, RecordingAnalytics};
use portfolio_contact::analytics::{AnalyticsClient, NullAnalytics};
use portfolio_contact::domain::Locale;
use portfolio_contact::models::{ClientContext, ContactFormInput, FailureReason, SubmissionOutcome};
use portfolio_contact::services::{SubmissionService, SubmissionServiceImpl, SubmissionSettings};
use std::sync::Arc;

fn settings() -> SubmissionSettings {
    SubmissionSettings {
        service_id: "service_test".to_string(),
        template_en: "template_en".to_string(),
        template_es: "template_es".to_string(),
        public_key: "public_key".to_string(),
        owner_email: "owner@example.com".to_string(),
    }
}

fn service(
    email: &MockEmailDelivery,
    analytics: Arc<dyn AnalyticsClient>,
) -> SubmissionServiceImpl {
    SubmissionServiceImpl::new(settings(), Arc::new(email.clone()), analytics)
}

fn ana() -> ContactFormInput {
    ContactFormInput::new("Ana Ruiz", "ana@example.com", "Hola!", Locale::Es)
}

#[tokio::test]
async fn test_blank_fields_are_rejected_without_side_effects() {
    let blanks = [
        ContactFormInput::new("", "ana@example.com", "Hola!", Locale::En),
        ContactFormInput::new("Ana", "   ", "Hola!", Locale::En),
        ContactFormInput::new("Ana", "ana@example.com", "\n\t", Locale::En),
        ContactFormInput::new("", "", "", Locale::Es),
    ];

    for input in blanks {
        let email = MockEmailDelivery::new();
        let analytics = RecordingAnalytics::new(Some("anon-1"));
        let svc = service(&email, Arc::new(analytics.clone()));
        let locale = input.language;

        let outcome = svc.submit(input, &ClientContext::default()).await;

        assert_eq!(outcome.failure_reason(), Some(FailureReason::MissingField));
        assert_eq!(
            outcome.message(),
            locale.pick("Please fill in all fields", "Por favor completa todos los campos")
        );
        assert_eq!(email.call_count(), 0);
        assert!(analytics.calls().is_empty());
    }
}

#[tokio::test]
async fn test_malformed_email_is_rejected() {
    for address in ["ana.example.com", "ana@example", "ana@", "ana smith@example.com"] {
        let email = MockEmailDelivery::new();
        let analytics = RecordingAnalytics::new(Some("anon-1"));
        let svc = service(&email, Arc::new(analytics.clone()));

        let input = ContactFormInput::new("Ana", address, "Hola!", Locale::En);
        let outcome = svc.submit(input, &ClientContext::default()).await;

        assert_eq!(
            outcome.failure_reason(),
            Some(FailureReason::InvalidEmailFormat),
            "{} should be rejected",
            address
        );
        assert_eq!(outcome.message(), "Please enter a valid email address");
        assert!(!outcome.should_clear_fields());
        assert_eq!(email.call_count(), 0);
        assert!(analytics.calls().is_empty());
    }
}

#[tokio::test]
async fn test_padded_email_is_rejected_before_sending() {
    let email = MockEmailDelivery::new();
    let analytics = RecordingAnalytics::new(Some("anon-1"));
    let svc = service(&email, Arc::new(analytics.clone()));

    let input = ContactFormInput::new("Ana", " ana@example.com ", "Hola!", Locale::Es);
    let outcome = svc.submit(input, &ClientContext::default()).await;

    assert_eq!(
        outcome.failure_reason(),
        Some(FailureReason::InvalidEmailFormat)
    );
    assert_eq!(
        outcome.message(),
        "Por favor ingresa una dirección de correo válida"
    );
    assert_eq!(email.call_count(), 0);
    assert!(analytics.calls().is_empty());
}

#[tokio::test]
async fn test_concrete_spanish_submission() {
    let email = MockEmailDelivery::new();
    let analytics = RecordingAnalytics::new(Some("anon-123"));
    let svc = service(&email, Arc::new(analytics.clone()));

    let outcome = svc.submit(ana(), &ClientContext::default()).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::Success {
            message: "¡Mensaje enviado exitosamente! Te responderé pronto.".to_string()
        }
    );
    assert!(outcome.should_clear_fields());

    let sent = email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].service_id, "service_test");
    assert_eq!(sent[0].template_id, "template_es");
    assert_eq!(sent[0].public_key, "public_key");
    assert_eq!(sent[0].params.from_name, "Ana Ruiz");
    assert_eq!(sent[0].params.from_email, "ana@example.com");
    assert_eq!(sent[0].params.message, "Hola!");
    assert_eq!(sent[0].params.to_email, "owner@example.com");

    assert_eq!(
        analytics.kinds(),
        vec!["alias", "identify", "set_profile", "track"]
    );

    let calls = analytics.calls();
    assert_eq!(
        calls[0],
        AnalyticsCall::Alias {
            new_id: "ana@example.com".to_string(),
            previous_id: "anon-123".to_string(),
        }
    );
    assert_eq!(calls[1], AnalyticsCall::Identify("ana@example.com".to_string()));

    match &calls[2] {
        AnalyticsCall::SetProfile(profile) => {
            assert_eq!(profile["$first_name"], "Ana");
            assert_eq!(profile["$last_name"], "Ruiz");
            assert_eq!(profile["$email"], "ana@example.com");
            assert_eq!(profile["Preferred Language"], "es");
            assert_eq!(profile["First Contact Anonymous ID"], "anon-123");
        }
        other => panic!("Expected profile update, got {:?}", other),
    }

    match &calls[3] {
        AnalyticsCall::Track { event, properties } => {
            assert_eq!(event, "Contact Form Submitted");
            assert_eq!(properties["message_length"], 5);
            assert_eq!(properties["language"], "es");
            assert_eq!(properties["user_email"], "ana@example.com");
            assert_eq!(properties["previous_anonymous_id"], "anon-123");
            assert_eq!(properties["success"], true);
        }
        other => panic!("Expected completion event, got {:?}", other),
    }

    assert_eq!(analytics.distinct_id().as_deref(), Some("ana@example.com"));
}

#[tokio::test]
async fn test_english_submission_uses_english_template() {
    let email = MockEmailDelivery::new();
    let svc = service(&email, Arc::new(NullAnalytics));

    let input = ContactFormInput::new("  John  ", "john@example.com", "Hi there", Locale::En);
    let outcome = svc.submit(input, &ClientContext::default()).await;

    assert_eq!(
        outcome.message(),
        "Message sent successfully! I'll get back to you soon."
    );
    let sent = email.sent();
    assert_eq!(sent[0].template_id, "template_en");
    assert_eq!(sent[0].params.from_name, "John");
    assert_eq!(sent[0].params.from_email, "john@example.com");
}

#[tokio::test]
async fn test_resubmission_skips_alias() {
    let email = MockEmailDelivery::new();
    let analytics = RecordingAnalytics::new(Some("ana@example.com"));
    let svc = service(&email, Arc::new(analytics.clone()));

    let outcome = svc.submit(ana(), &ClientContext::default()).await;

    assert!(outcome.is_success());
    assert_eq!(analytics.kinds(), vec!["identify", "set_profile", "track"]);
}

#[tokio::test]
async fn test_blank_anonymous_id_is_not_aliased() {
    for blank in ["", "   "] {
        let email = MockEmailDelivery::new();
        let analytics = RecordingAnalytics::new(Some(blank));
        let svc = service(&email, Arc::new(analytics.clone()));

        let outcome = svc.submit(ana(), &ClientContext::default()).await;

        assert!(outcome.is_success());
        assert_eq!(analytics.kinds(), vec!["identify", "set_profile", "track"]);
        match &analytics.calls()[1] {
            AnalyticsCall::SetProfile(profile) => {
                assert_eq!(profile["First Contact Anonymous ID"], serde_json::Value::Null);
            }
            other => panic!("Expected profile update, got {:?}", other),
        }
        match &analytics.calls()[2] {
            AnalyticsCall::Track { properties, .. } => {
                assert_eq!(properties["previous_anonymous_id"], serde_json::Value::Null);
                assert_eq!(properties["message_length"], 5);
            }
            other => panic!("Expected completion event, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_second_submission_in_same_session_is_idempotent() {
    let email = MockEmailDelivery::new();
    let analytics = RecordingAnalytics::new(Some("anon-123"));
    let svc = service(&email, Arc::new(analytics.clone()));

    assert!(svc.submit(ana(), &ClientContext::default()).await.is_success());
    assert!(svc.submit(ana(), &ClientContext::default()).await.is_success());

    let aliases = analytics
        .calls()
        .into_iter()
        .filter(|c| matches!(c, AnalyticsCall::Alias { .. }))
        .count();
    assert_eq!(aliases, 1);
    assert_eq!(email.call_count(), 2);
}

#[tokio::test]
async fn test_delivery_failure_skips_correlation() {
    let email = MockEmailDelivery::new();
    email.fail_with("Monthly limit reached");
    let analytics = RecordingAnalytics::new(Some("anon-123"));
    let svc = service(&email, Arc::new(analytics.clone()));

    let outcome = svc.submit(ana(), &ClientContext::default()).await;

    assert_eq!(outcome.failure_reason(), Some(FailureReason::Delivery));
    assert_eq!(
        outcome.message(),
        "Error al enviar mensaje. Por favor envíame un email directamente a owner@example.com"
    );
    assert!(!outcome.should_clear_fields());

    assert_eq!(analytics.kinds(), vec!["track"]);
    match &analytics.calls()[0] {
        AnalyticsCall::Track { event, properties } => {
            assert_eq!(event, "Contact Form Error");
            assert_eq!(properties["language"], "es");
            assert!(properties["error_message"]
                .as_str()
                .unwrap()
                .contains("Monthly limit reached"));
        }
        other => panic!("Expected error event, got {:?}", other),
    }
    assert_eq!(analytics.distinct_id().as_deref(), Some("anon-123"));
}

#[tokio::test]
async fn test_failed_error_event_does_not_surface() {
    let email = MockEmailDelivery::new();
    email.fail_with("Service down");
    let analytics = RecordingAnalytics::new(Some("anon-123"));
    analytics.fail_on("track");
    let svc = service(&email, Arc::new(analytics.clone()));

    let outcome = svc.submit(ana(), &ClientContext::default()).await;

    assert_eq!(outcome.failure_reason(), Some(FailureReason::Delivery));
    assert_eq!(analytics.tracked(), vec!["Contact Form Error"]);
}

#[tokio::test]
async fn test_success_without_analytics() {
    let email = MockEmailDelivery::new();
    let svc = service(&email, Arc::new(NullAnalytics));

    let outcome = svc.submit(ana(), &ClientContext::default()).await;

    assert!(outcome.is_success());
    assert_eq!(email.call_count(), 1);
}

#[tokio::test]
async fn test_correlation_failure_sends_reduced_event() {
    let email = MockEmailDelivery::new();
    let analytics = RecordingAnalytics::new(Some("anon-123"));
    analytics.fail_on("alias");
    let svc = service(&email, Arc::new(analytics.clone()));

    let outcome = svc.submit(ana(), &ClientContext::default()).await;

    assert!(outcome.is_success());
    assert_eq!(analytics.kinds(), vec!["alias", "track"]);
    match &analytics.calls()[1] {
        AnalyticsCall::Track { event, properties } => {
            assert_eq!(event, "Contact Form Submitted");
            assert_eq!(properties.len(), 2);
            assert_eq!(properties["language"], "es");
            assert_eq!(properties["success"], true);
        }
        other => panic!("Expected reduced event, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unavailable_analytics_still_succeeds() {
    let email = MockEmailDelivery::new();
    let analytics = RecordingAnalytics::new(Some("anon-123"));
    for kind in ["alias", "identify", "set_profile", "track"] {
        analytics.fail_on(kind);
    }
    let svc = service(&email, Arc::new(analytics.clone()));

    let outcome = svc.submit(ana(), &ClientContext::default()).await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_profile_carries_client_context() {
    let email = MockEmailDelivery::new();
    let analytics = RecordingAnalytics::new(None);
    let svc = service(&email, Arc::new(analytics.clone()));

    let context = ClientContext {
        user_agent: Some("Mozilla/5.0".to_string()),
        referrer: Some("https://www.linkedin.com/".to_string()),
    };
    let outcome = svc.submit(ana(), &context).await;
    assert!(outcome.is_success());

    // No anonymous id to merge, so no alias
    assert_eq!(analytics.kinds(), vec!["identify", "set_profile", "track"]);
    match &analytics.calls()[1] {
        AnalyticsCall::SetProfile(profile) => {
            assert_eq!(profile["User Agent"], "Mozilla/5.0");
            assert_eq!(profile["Referrer"], "https://www.linkedin.com/");
            assert_eq!(profile["First Contact Anonymous ID"], serde_json::Value::Null);
        }
        other => panic!("Expected profile update, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_submission_is_rejected_while_in_flight() {
    let email = MockEmailDelivery::new();
    let gate = email.hold();
    let svc = Arc::new(service(&email, Arc::new(NullAnalytics)));

    let first = {
        let svc = svc.clone();
        tokio::spawn(async move { svc.submit(ana(), &ClientContext::default()).await })
    };

    email.wait_started().await;
    assert!(svc.is_in_flight());

    let second = svc.submit(ana(), &ClientContext::default()).await;
    assert_eq!(second.failure_reason(), Some(FailureReason::InFlight));
    assert_eq!(
        second.message(),
        "Tu mensaje ya se está enviando. Por favor espera."
    );

    gate.notify_one();
    let first = first.await.unwrap();
    assert!(first.is_success());
    assert!(!svc.is_in_flight());
    assert_eq!(email.call_count(), 1);

    // Guard is released, so a new attempt goes through
    gate.notify_one();
    assert!(svc.submit(ana(), &ClientContext::default()).await.is_success());
}

#[tokio::test]
async fn test_check_never_sends() {
    let email = MockEmailDelivery::new();
    let svc = service(&email, Arc::new(NullAnalytics));

    let input = ContactFormInput::new("Ana", "not-an-email", "Hola!", Locale::En);
    assert!(!svc.check(&input).is_valid());
    assert!(svc.check(&ana()).is_valid());
    assert_eq!(email.call_count(), 0);
}
