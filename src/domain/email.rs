//! EmailAddress value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` shape. Deliberately looser than RFC 5322.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Check whether `email` has the accepted `local@domain.tld` shape.
///
/// The local part and domain may not contain whitespace or a second `@`,
/// and the domain needs at least one `.` followed by something.
pub fn is_well_formed_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// A type-safe wrapper for email addresses.
///
/// Used for addresses the pipeline owns (the portfolio owner's inbox), which
/// must be valid at startup rather than per request.
///
/// # Example
///
/// ```
/// use portfolio_contact::domain::EmailAddress;
///
/// let email = EmailAddress::new(" owner@example.com ").unwrap();
/// assert_eq!(email.into_inner(), "owner@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` for a blank address and
    /// `ValidationError::InvalidEmailFormat` when the shape check fails.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        let trimmed = email.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::MissingField);
        }
        if !is_well_formed_email(trimmed) {
            return Err(ValidationError::InvalidEmailFormat);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}
