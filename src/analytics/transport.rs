//! HTTP transport for the Mixpanel ingestion API.
//!
//! Blocking `ureq` calls; run them through `tokio::task::spawn_blocking` from async code.

use super::mixpanel::{EventQueue, QueuedBatch};
use crate::config::Config;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::{HttpTimer, Metrics};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Largest batch the ingestion endpoints accept per request.
const MAX_BATCH_SIZE: usize = 50;

/// Body returned when `verbose=1` is requested.
#[derive(Debug, Deserialize)]
struct VerboseResponse {
    status: i64,
    #[serde(default)]
    error: Option<String>,
}

/// Outcome of one flush.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    pub sent: usize,
    pub dropped: usize,
}

/// HTTP client for `/track` and `/engage`.
#[derive(Clone)]
pub struct MixpanelTransport {
    /// Base URL for the ingestion API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl MixpanelTransport {
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.mixpanel_api_url.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a transport with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}?verbose=1", base, path)
    }

    /// POST a JSON array and check the verbose status body.
    fn post_batch(&self, path: &str, payloads: &[Value]) -> AnalyticsResult<()> {
        let url = self.build_url(path);
        tracing::debug!("POST {} ({} payloads)", url, payloads.len());

        let timer = HttpTimer::new(self.metrics.clone());
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_json(payloads)
            .map_err(map_error)
            .and_then(|response| {
                let body = response
                    .into_string()
                    .map_err(|e| AnalyticsError::Http(e.to_string()))?;
                let verbose: VerboseResponse = serde_json::from_str(&body)?;
                if verbose.status == 1 {
                    Ok(())
                } else {
                    Err(AnalyticsError::Api {
                        status: 200,
                        message: verbose
                            .error
                            .unwrap_or_else(|| "Payload rejected".to_string()),
                    })
                }
            });
        timer.finish(&result);

        result
    }

    /// Send events to `/track`.
    pub fn send_events(&self, events: &[Value]) -> AnalyticsResult<()> {
        self.post_batch("/track", events)
    }

    /// Send profile updates to `/engage`.
    pub fn send_profile_updates(&self, updates: &[Value]) -> AnalyticsResult<()> {
        self.post_batch("/engage", updates)
    }

    /// Send a drained batch in chunks. Failed chunks are dropped, not retried.
    pub fn send(&self, batch: &QueuedBatch) -> FlushReport {
        let mut report = FlushReport::default();

        // Events first so `$identify` lands before the profile it keys
        for chunk in batch.events.chunks(MAX_BATCH_SIZE) {
            self.record(self.send_events(chunk), chunk.len(), &mut report);
        }
        for chunk in batch.profile_updates.chunks(MAX_BATCH_SIZE) {
            self.record(self.send_profile_updates(chunk), chunk.len(), &mut report);
        }

        report
    }

    /// Drain `queue` and send everything in it.
    pub fn flush(&self, queue: &EventQueue) -> FlushReport {
        let batch = queue.drain();
        if batch.is_empty() {
            return FlushReport::default();
        }
        self.send(&batch)
    }

    fn record(&self, result: AnalyticsResult<()>, count: usize, report: &mut FlushReport) {
        match result {
            Ok(()) => {
                report.sent += count;
                self.metrics.record_analytics_flushed(count);
            }
            Err(e) => {
                tracing::warn!(error = %e, payloads = count, "Dropping analytics batch");
                report.dropped += count;
                self.metrics.record_analytics_dropped(count);
            }
        }
    }
}

fn map_error(error: ureq::Error) -> AnalyticsError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());
            AnalyticsError::Api {
                status: code,
                message,
            }
        }
        ureq::Error::Transport(transport) => AnalyticsError::Http(transport.to_string()),
    }
}
