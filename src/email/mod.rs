//! HTTP client for the EmailJS transactional email API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles the request envelope and maps
//! HTTP failures onto [`DeliveryError`].

mod async_wrapper;
pub use async_wrapper::{AsyncEmailJsClient, EmailDelivery};

use crate::config::Config;
use crate::error::{DeliveryError, DeliveryResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::TemplateParams;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const SEND_PATH: &str = "/api/v1.0/email/send";

/// Request envelope for `POST /api/v1.0/email/send`.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    /// EmailJS calls the public key `user_id`
    user_id: &'a str,
    template_params: &'a TemplateParams,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

/// HTTP client for the EmailJS API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct EmailJsClient {
    /// Base URL for the EmailJS API
    base_url: String,

    /// Private key, sent as `accessToken` when set
    private_key: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl EmailJsClient {
    /// Create a new EmailJsClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.emailjs_api_url.clone(),
            private_key: config.emailjs_private_key.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create an EmailJsClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, private_key: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            private_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Send a templated email.
    ///
    /// # Arguments
    /// * `service_id` - EmailJS service that owns the SMTP connection
    /// * `template_id` - Locale-specific template
    /// * `params` - Template variables
    /// * `public_key` - Account public key
    pub fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> DeliveryResult<()> {
        let url = self.build_url(SEND_PATH);
        let request = SendEmailRequest {
            service_id,
            template_id,
            user_id: public_key,
            template_params: params,
            access_token: self.private_key.as_deref(),
        };

        tracing::debug!(
            "POST {} (service: {}, template: {}, message_len: {})",
            url,
            service_id,
            template_id,
            params.message.chars().count()
        );

        let timer = HttpTimer::new(self.metrics.clone());
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(&request)
            .map_err(|e| self.map_error(e));
        timer.finish(&result);

        match result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
                self.metrics.record_email_sent();
                Ok(())
            }
            Err(e) => {
                tracing::debug!("POST {} - Error: {:?}", url, e);
                Err(e)
            }
        }
    }

    /// Map a ureq error to a DeliveryError.
    fn map_error(&self, error: ureq::Error) -> DeliveryError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    400 => DeliveryError::Malformed(message),
                    401 | 403 => DeliveryError::Unauthorized(message),
                    402 | 429 => DeliveryError::QuotaExceeded(message),
                    _ => DeliveryError::Api {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::Dns => {
                    DeliveryError::Network(transport.to_string())
                }
                ureq::ErrorKind::Io if is_timeout(&transport) => DeliveryError::Timeout,
                ureq::ErrorKind::Io => DeliveryError::Network(transport.to_string()),
                _ => DeliveryError::Other(transport.to_string()),
            },
        }
    }
}

/// Whether an I/O transport error came from the agent's read/write deadline.
fn is_timeout(transport: &ureq::Transport) -> bool {
    std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .map(|io| {
            matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        })
        .unwrap_or(false)
}
