//! Contact form validation errors.

use std::fmt;

/// Why a contact form submission was rejected before any external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    /// Name, email or message is empty or whitespace-only.
    MissingField,

    /// The email does not have a `local@domain.tld` shape.
    InvalidEmailFormat,
}

impl ValidationError {
    /// Stable machine-readable code used in tool responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidEmailFormat => "invalid_email_format",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "A required field is empty"),
            Self::InvalidEmailFormat => write!(f, "Email address is not well formed"),
        }
    }
}

impl std::error::Error for ValidationError {}
