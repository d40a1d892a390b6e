//! Async wrapper around the synchronous EmailJsClient.
//!
//! This module provides an async interface to the synchronous EmailJsClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::email::EmailJsClient;
use crate::error::{DeliveryError, DeliveryResult};
use crate::models::TemplateParams;
use async_trait::async_trait;
use std::sync::Arc;

/// The email delivery collaborator of the submission pipeline.
///
/// Fails with a [`DeliveryError`] whose message is human-readable.
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> DeliveryResult<()>;
}

/// Async wrapper around synchronous EmailJsClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncEmailJsClient {
    client: Arc<EmailJsClient>,
}

impl AsyncEmailJsClient {
    pub fn new(client: EmailJsClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl EmailDelivery for AsyncEmailJsClient {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> DeliveryResult<()> {
        let client = self.client.clone();
        let service_id = service_id.to_string();
        let template_id = template_id.to_string();
        let params = params.clone();
        let public_key = public_key.to_string();

        tokio::task::spawn_blocking(move || {
            client.send(&service_id, &template_id, &params, &public_key)
        })
        .await
        .map_err(|e| DeliveryError::Other(format!("Task join error: {}", e)))?
    }
}
