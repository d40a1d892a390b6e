use async_trait::async_trait;
use portfolio_contact::email::EmailDelivery;
use portfolio_contact::error::{DeliveryError, DeliveryResult};
use portfolio_contact::models::TemplateParams;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One captured call to [`EmailDelivery::send`].
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub service_id: String,
    pub template_id: String,
    pub params: TemplateParams,
    pub public_key: String,
}

/// Mock email service for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockEmailDelivery {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failure: Arc<Mutex<Option<String>>>,
    hold: Arc<Mutex<Option<Arc<Notify>>>>,
    started: Arc<Notify>,
}

#[allow(dead_code)]
impl MockEmailDelivery {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            hold: Arc::new(Mutex::new(None)),
            started: Arc::new(Notify::new()),
        }
    }

    /// Make every send fail with a quota error carrying `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Park sends until the returned handle is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Resolves once a send has been entered.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockEmailDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailDelivery for MockEmailDelivery {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> DeliveryResult<()> {
        self.sent.lock().unwrap().push(SentEmail {
            service_id: service_id.to_string(),
            template_id: template_id.to_string(),
            params: params.clone(),
            public_key: public_key.to_string(),
        });
        self.started.notify_one();

        let gate = self.hold.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(DeliveryError::QuotaExceeded(message)),
            None => Ok(()),
        }
    }
}
