//! Contact form validator.
//!
//! Pure and synchronous: completeness is checked before format, so a blank
//! email reports `MissingField` rather than `InvalidEmailFormat`. Only the
//! completeness check ignores surrounding whitespace; the format check sees
//! the email exactly as typed.

use super::email::is_well_formed_email;
use super::errors::ValidationError;
use crate::models::ContactFormInput;

/// Result of validating a contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationError),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Validate the raw form fields.
pub fn validate(input: &ContactFormInput) -> ValidationOutcome {
    let required = [&input.name, &input.email, &input.message];
    if required.iter().any(|field| field.trim().is_empty()) {
        return ValidationOutcome::Invalid(ValidationError::MissingField);
    }

    if !is_well_formed_email(&input.email) {
        return ValidationOutcome::Invalid(ValidationError::InvalidEmailFormat);
    }

    ValidationOutcome::Valid
}
