//! Localized notification texts shown after a submission attempt.

use crate::domain::{Locale, ValidationError};

/// A user-facing string in both published languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedText {
    pub en: &'static str,
    pub es: &'static str,
}

impl LocalizedText {
    pub fn localize(&self, locale: Locale) -> &'static str {
        locale.pick(self.en, self.es)
    }
}

pub const MISSING_FIELD: LocalizedText = LocalizedText {
    en: "Please fill in all fields",
    es: "Por favor completa todos los campos",
};

pub const INVALID_EMAIL: LocalizedText = LocalizedText {
    en: "Please enter a valid email address",
    es: "Por favor ingresa una dirección de correo válida",
};

pub const MESSAGE_SENT: LocalizedText = LocalizedText {
    en: "Message sent successfully! I'll get back to you soon.",
    es: "¡Mensaje enviado exitosamente! Te responderé pronto.",
};

pub const ALREADY_SENDING: LocalizedText = LocalizedText {
    en: "Your message is already being sent. Please wait.",
    es: "Tu mensaje ya se está enviando. Por favor espera.",
};

const DELIVERY_FAILED: LocalizedText = LocalizedText {
    en: "Failed to send message. Please try emailing me directly at",
    es: "Error al enviar mensaje. Por favor envíame un email directamente a",
};

pub fn validation_failed(reason: ValidationError) -> LocalizedText {
    match reason {
        ValidationError::MissingField => MISSING_FIELD,
        ValidationError::InvalidEmailFormat => INVALID_EMAIL,
    }
}

/// Fallback instruction pointing the visitor at the owner's inbox.
pub fn delivery_failed(locale: Locale, owner_email: &str) -> String {
    format!("{} {}", DELIVERY_FAILED.localize(locale), owner_email)
}
