//! Contact form input and the payload derived from it.

use crate::domain::Locale;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Raw field values from one submission attempt.
///
/// Nothing here is validated; see [`crate::domain::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContactFormInput {
    /// Sender's name as typed
    #[serde(default)]
    pub name: String,

    /// Sender's reply-to address
    #[serde(default)]
    pub email: String,

    /// Message body
    #[serde(default)]
    pub message: String,

    /// Language the page was displayed in
    #[serde(default)]
    pub language: Locale,
}

impl ContactFormInput {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
        language: Locale,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            language,
        }
    }

    /// Name with surrounding whitespace removed.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Email with surrounding whitespace removed. This is the identity used for analytics.
    pub fn trimmed_email(&self) -> &str {
        self.email.trim()
    }

    /// Message length in characters. The content itself is never sent to analytics.
    pub fn message_length(&self) -> usize {
        self.message.chars().count()
    }
}

/// Request metadata forwarded by the caller for analytics profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClientContext {
    /// Browser user agent of the visitor
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Page the visitor arrived from
    #[serde(default)]
    pub referrer: Option<String>,
}

impl ClientContext {
    /// Sentinel recorded when the visitor arrived without a referrer.
    pub const DIRECT_REFERRER: &'static str = "Direct";

    pub fn user_agent(&self) -> String {
        self.user_agent
            .as_deref()
            .filter(|ua| !ua.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("portfolio-contact/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn referrer(&self) -> &str {
        self.referrer
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(Self::DIRECT_REFERRER)
    }
}

/// Variables substituted into the email template.
///
/// Field names match the placeholders registered with the email service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_email: String,
}

impl TemplateParams {
    /// Build template variables addressed to the portfolio owner.
    pub fn for_owner(input: &ContactFormInput, owner_email: &str) -> Self {
        Self {
            from_name: input.trimmed_name().to_string(),
            from_email: input.trimmed_email().to_string(),
            message: input.message.clone(),
            to_email: owner_email.to_string(),
        }
    }
}
