//! Locale value object.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two languages the portfolio is published in.
///
/// Serializes as the lowercase language code (`"en"` / `"es"`).
///
/// # Example
///
/// ```
/// use portfolio_contact::domain::Locale;
///
/// let locale: Locale = "es".parse().unwrap();
/// assert_eq!(locale.pick("Hello", "Hola"), "Hola");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Select the text matching this locale.
    ///
    /// This is the translation function every user-facing string goes through.
    pub fn pick<'a>(&self, en: &'a str, es: &'a str) -> &'a str {
        match self {
            Self::En => en,
            Self::Es => es,
        }
    }

    /// Language code as sent to the analytics service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Name of the localized resume file for this locale.
    pub fn resume_filename(&self, prefix: &str) -> String {
        format!("{}_{}.pdf", prefix, self.as_str().to_uppercase())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
