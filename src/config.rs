//! Configuration management for the portfolio contact pipeline.
//!
//! This module handles loading and validating configuration from environment variables.
//! Missing email credentials abort startup; there are no baked-in fallback keys.
//! Analytics is optional and is disabled when no token is set.

use crate::domain::EmailAddress;
use crate::error::{ConfigError, ConfigResult};
use std::env;

pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com";
pub const DEFAULT_MIXPANEL_API_URL: &str = "https://api-js.mixpanel.com";
pub const DEFAULT_LOG_LEVEL: &str = "error";

/// Configuration for the portfolio contact pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// EmailJS service id
    pub emailjs_service_id: String,

    /// EmailJS template for English submissions
    pub emailjs_template_en: String,

    /// EmailJS template for Spanish submissions
    pub emailjs_template_es: String,

    /// EmailJS public key (sent as `user_id`)
    pub emailjs_public_key: String,

    /// EmailJS private key, required when strict mode is enabled on the account
    pub emailjs_private_key: Option<String>,

    /// EmailJS API base URL
    pub emailjs_api_url: String,

    /// Address that receives contact form messages
    pub owner_email: String,

    /// Mixpanel project token; `None` disables analytics
    pub mixpanel_token: Option<String>,

    /// Mixpanel ingestion API base URL
    pub mixpanel_api_url: String,

    /// Existing anonymous distinct id to resume instead of generating one
    pub mixpanel_distinct_id: Option<String>,

    /// Seconds between analytics queue flushes (default: 5)
    pub analytics_flush_interval_secs: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Prefix of the localized resume file names (default: "Resume")
    pub resume_file_prefix: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_EN`, `EMAILJS_TEMPLATE_ES`, `EMAILJS_PUBLIC_KEY`
    /// - `CONTACT_OWNER_EMAIL`: inbox that receives messages
    ///
    /// Optional environment variables:
    /// - `EMAILJS_PRIVATE_KEY`: access token for strict mode
    /// - `EMAILJS_API_URL`: EmailJS base URL (default: https://api.emailjs.com)
    /// - `MIXPANEL_TOKEN`: enables analytics
    /// - `MIXPANEL_API_URL`: ingestion base URL (default: https://api-js.mixpanel.com)
    /// - `MIXPANEL_DISTINCT_ID`: anonymous id to resume
    /// - `ANALYTICS_FLUSH_INTERVAL_SECS`: queue flush period (default: 5)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `RESUME_FILE_PREFIX`: resume file name prefix (default: "Resume")
    ///
    /// `LOG_LEVEL` is read separately by [`Config::log_level`].
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout, which carries MCP traffic
        let _ = dotenvy::dotenv();

        let emailjs_service_id = Self::required("EMAILJS_SERVICE_ID")?;
        let emailjs_template_en = Self::required("EMAILJS_TEMPLATE_EN")?;
        let emailjs_template_es = Self::required("EMAILJS_TEMPLATE_ES")?;
        let emailjs_public_key = Self::required("EMAILJS_PUBLIC_KEY")?;
        let owner_email = Self::required("CONTACT_OWNER_EMAIL")?;

        // The two templates carry different copy; sharing one is a misconfiguration
        if emailjs_template_en == emailjs_template_es {
            return Err(ConfigError::InvalidValue {
                var: "EMAILJS_TEMPLATE_ES".to_string(),
                reason: "Must differ from EMAILJS_TEMPLATE_EN".to_string(),
            });
        }

        let owner_email = EmailAddress::new(owner_email)
            .map_err(|e| ConfigError::InvalidValue {
                var: "CONTACT_OWNER_EMAIL".to_string(),
                reason: e.to_string(),
            })?
            .into_inner();

        let emailjs_api_url = Self::url_or_default("EMAILJS_API_URL", DEFAULT_EMAILJS_API_URL)?;
        let mixpanel_api_url =
            Self::url_or_default("MIXPANEL_API_URL", DEFAULT_MIXPANEL_API_URL)?;

        let analytics_flush_interval_secs =
            Self::parse_env_u64("ANALYTICS_FLUSH_INTERVAL_SECS", 5)?;
        if analytics_flush_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "ANALYTICS_FLUSH_INTERVAL_SECS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        Ok(Config {
            emailjs_service_id,
            emailjs_template_en,
            emailjs_template_es,
            emailjs_public_key,
            emailjs_private_key: Self::optional("EMAILJS_PRIVATE_KEY"),
            emailjs_api_url,
            owner_email,
            mixpanel_token: Self::optional("MIXPANEL_TOKEN"),
            mixpanel_api_url,
            mixpanel_distinct_id: Self::optional("MIXPANEL_DISTINCT_ID"),
            analytics_flush_interval_secs,
            request_timeout,
            resume_file_prefix: Self::optional("RESUME_FILE_PREFIX")
                .unwrap_or_else(|| "Resume".to_string()),
        })
    }

    /// Tracing filter from `LOG_LEVEL` (default: "error").
    ///
    /// Read before [`Config::from_env`] so configuration errors reach the log.
    pub fn log_level() -> String {
        Self::optional("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }

    /// Whether a Mixpanel token is configured.
    pub fn analytics_enabled(&self) -> bool {
        self.mixpanel_token.is_some()
    }

    /// Read a required, non-blank environment variable.
    fn required(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(value.trim().to_string())
    }

    /// Read an optional environment variable, treating blank as unset.
    fn optional(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Read a URL variable, validating its scheme.
    fn url_or_default(var_name: &str, default: &str) -> ConfigResult<String> {
        let url = Self::optional(var_name).unwrap_or_else(|| default.to_string());

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        Ok(url)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            emailjs_service_id: String::new(),
            emailjs_template_en: String::new(),
            emailjs_template_es: String::new(),
            emailjs_public_key: String::new(),
            emailjs_private_key: None,
            emailjs_api_url: DEFAULT_EMAILJS_API_URL.to_string(),
            owner_email: String::new(),
            mixpanel_token: None,
            mixpanel_api_url: DEFAULT_MIXPANEL_API_URL.to_string(),
            mixpanel_distinct_id: None,
            analytics_flush_interval_secs: 5,
            request_timeout: 10,
            resume_file_prefix: "Resume".to_string(),
        }
    }
}
