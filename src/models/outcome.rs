//! Submission outcomes and the notification the caller renders from them.

use crate::domain::ValidationError;
use serde::Serialize;

/// Why a submission did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    MissingField,
    InvalidEmailFormat,
    /// The email service rejected or never received the message
    Delivery,
    /// Another submission from the same form is still pending
    InFlight,
}

impl From<ValidationError> for FailureReason {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingField => Self::MissingField,
            ValidationError::InvalidEmailFormat => Self::InvalidEmailFormat,
        }
    }
}

/// Modal style for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Localized text plus style, ready to show to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Result of one call to the submission orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The email was accepted; the caller should clear the form.
    Success { message: String },

    /// Nothing was sent (or sending failed); the form keeps its values.
    Failure {
        reason: FailureReason,
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Localized text for the visitor.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message } | Self::Failure { message, .. } => message,
        }
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason, .. } => Some(*reason),
        }
    }

    /// Whether the caller should reset the input fields.
    pub fn should_clear_fields(&self) -> bool {
        self.is_success()
    }

    pub fn notification(&self) -> Notification {
        let kind = if self.is_success() {
            NotificationKind::Success
        } else {
            NotificationKind::Error
        };

        Notification {
            kind,
            message: self.message().to_string(),
        }
    }
}
