//! Data models for the contact pipeline.
//!
//! This module contains the per-submission input, the outcomes handed back to
//! the caller, the outbound email template payload, and analytics events.

pub mod event;
pub mod form;
pub mod outcome;

pub use event::{AnalyticsEvent, AnalyticsIdentity, Properties};
pub use form::{ClientContext, ContactFormInput, TemplateParams};
pub use outcome::{FailureReason, Notification, NotificationKind, SubmissionOutcome};
