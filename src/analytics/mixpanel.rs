//! In-memory Mixpanel client.
//!
//! Keeps the session's distinct id and turns protocol calls into ingestion
//! payloads on an [`EventQueue`]. Nothing here touches the network.

use super::AnalyticsClient;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::Properties;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Library tag attached to every event.
const LIB_NAME: &str = "portfolio-contact";

/// Payloads waiting to be sent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueuedBatch {
    /// Bodies for the `/track` endpoint
    pub events: Vec<Value>,

    /// Bodies for the `/engage` endpoint
    pub profile_updates: Vec<Value>,
}

impl QueuedBatch {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.profile_updates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len() + self.profile_updates.len()
    }
}

/// Shared buffer between [`MixpanelClient`] and the flusher.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    inner: Arc<Mutex<QueuedBatch>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_event(&self, payload: Value) -> AnalyticsResult<()> {
        let mut batch = self
            .inner
            .lock()
            .map_err(|e| AnalyticsError::Unavailable(e.to_string()))?;
        batch.events.push(payload);
        Ok(())
    }

    fn push_profile_update(&self, payload: Value) -> AnalyticsResult<()> {
        let mut batch = self
            .inner
            .lock()
            .map_err(|e| AnalyticsError::Unavailable(e.to_string()))?;
        batch.profile_updates.push(payload);
        Ok(())
    }

    /// Take everything queued so far, leaving the queue empty.
    pub fn drain(&self) -> QueuedBatch {
        match self.inner.lock() {
            Ok(mut batch) => std::mem::take(&mut *batch),
            Err(_) => QueuedBatch::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mixpanel client for one visitor session.
pub struct MixpanelClient {
    token: String,
    distinct_id: Mutex<String>,
    queue: EventQueue,
}

impl MixpanelClient {
    /// Start a session under a fresh anonymous id.
    pub fn new(token: impl Into<String>, queue: EventQueue) -> Self {
        Self::with_distinct_id(token, Self::anonymous_id(), queue)
    }

    /// Resume a session whose anonymous id was assigned elsewhere.
    pub fn with_distinct_id(
        token: impl Into<String>,
        distinct_id: impl Into<String>,
        queue: EventQueue,
    ) -> Self {
        Self {
            token: token.into(),
            distinct_id: Mutex::new(distinct_id.into()),
            queue,
        }
    }

    /// Device-style anonymous id, as the browser SDK assigns them.
    pub fn anonymous_id() -> String {
        format!("$device:{}", uuid::Uuid::new_v4())
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    fn current_id(&self) -> AnalyticsResult<String> {
        self.distinct_id
            .lock()
            .map(|id| id.clone())
            .map_err(|e| AnalyticsError::Unavailable(e.to_string()))
    }

    /// Enqueue an event. `properties` wins over the defaults for `distinct_id`.
    fn enqueue_event(&self, event_name: &str, properties: Properties) -> AnalyticsResult<()> {
        let mut merged = Properties::new();
        merged.insert("token".to_string(), json!(self.token));
        merged.insert("distinct_id".to_string(), json!(self.current_id()?));
        merged.insert(
            "time".to_string(),
            json!(chrono::Utc::now().timestamp_millis()),
        );
        merged.insert(
            "$insert_id".to_string(),
            json!(uuid::Uuid::new_v4().simple().to_string()),
        );
        merged.insert("mp_lib".to_string(), json!(LIB_NAME));
        merged.extend(properties);

        self.queue.push_event(json!({
            "event": event_name,
            "properties": merged,
        }))
    }
}

fn require_id(value: &str, what: &str) -> AnalyticsResult<()> {
    if value.trim().is_empty() {
        return Err(AnalyticsError::InvalidCall(format!("{} cannot be empty", what)));
    }
    Ok(())
}

impl AnalyticsClient for MixpanelClient {
    fn distinct_id(&self) -> Option<String> {
        self.current_id().ok()
    }

    fn alias(&self, new_id: &str, previous_id: &str) -> AnalyticsResult<()> {
        require_id(new_id, "alias")?;
        require_id(previous_id, "previous id")?;
        if new_id == previous_id {
            return Err(AnalyticsError::InvalidCall(
                "Cannot alias an id to itself".to_string(),
            ));
        }

        let mut properties = Properties::new();
        properties.insert("distinct_id".to_string(), json!(previous_id));
        properties.insert("alias".to_string(), json!(new_id));
        self.enqueue_event("$create_alias", properties)
    }

    fn identify(&self, id: &str) -> AnalyticsResult<()> {
        require_id(id, "distinct id")?;

        let previous = self.current_id()?;
        if previous == id {
            return Ok(());
        }

        let mut properties = Properties::new();
        properties.insert("distinct_id".to_string(), json!(id));
        properties.insert("$identified_id".to_string(), json!(id));
        properties.insert("$anon_id".to_string(), json!(previous));
        self.enqueue_event("$identify", properties)?;

        let mut current = self
            .distinct_id
            .lock()
            .map_err(|e| AnalyticsError::Unavailable(e.to_string()))?;
        *current = id.to_string();
        Ok(())
    }

    fn set_profile(&self, attributes: &Properties) -> AnalyticsResult<()> {
        self.queue.push_profile_update(json!({
            "$token": self.token,
            "$distinct_id": self.current_id()?,
            "$set": attributes,
        }))
    }

    fn track(&self, event_name: &str, properties: &Properties) -> AnalyticsResult<()> {
        require_id(event_name, "event name")?;
        self.enqueue_event(event_name, properties.clone())
    }
}
