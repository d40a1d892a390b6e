//! Domain types for the contact form.
//!
//! This module contains the locale selector, the email format rule, the name
//! splitting used for analytics profiles, and the form validator. Everything
//! here is pure and performs no I/O.

pub mod email;
pub mod errors;
pub mod locale;
pub mod name;
pub mod validator;

pub use email::{is_well_formed_email, EmailAddress};
pub use errors::ValidationError;
pub use locale::Locale;
pub use name::PersonName;
pub use validator::{validate, ValidationOutcome};
