//! Basic metrics instrumentation for tracking outbound traffic.
//!
//! Provides counters and duration tracking for HTTP requests made to the email
//! and analytics services.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the outbound HTTP clients.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Emails accepted by the delivery service
    emails_sent_total: Arc<AtomicU64>,

    /// Analytics payloads accepted by the ingestion API
    analytics_flushed_total: Arc<AtomicU64>,

    /// Analytics payloads discarded after a failed flush
    analytics_dropped_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            emails_sent_total: Arc::new(AtomicU64::new(0)),
            analytics_flushed_total: Arc::new(AtomicU64::new(0)),
            analytics_dropped_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an email accepted for delivery.
    pub fn record_email_sent(&self) {
        self.emails_sent_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record analytics payloads delivered in one batch.
    pub fn record_analytics_flushed(&self, count: usize) {
        self.analytics_flushed_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record analytics payloads lost to a failed batch.
    pub fn record_analytics_dropped(&self, count: usize) {
        self.analytics_dropped_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn emails_sent_total(&self) -> u64 {
        self.emails_sent_total.load(Ordering::Relaxed)
    }

    pub fn analytics_flushed_total(&self) -> u64 {
        self.analytics_flushed_total.load(Ordering::Relaxed)
    }

    pub fn analytics_dropped_total(&self) -> u64 {
        self.analytics_dropped_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            emails_sent_total: self.emails_sent_total(),
            analytics_flushed_total: self.analytics_flushed_total(),
            analytics_dropped_total: self.analytics_dropped_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub emails_sent_total: u64,
    pub analytics_flushed_total: u64,
    pub analytics_dropped_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }

    /// Complete according to the request result.
    pub fn finish<T, E>(self, result: &Result<T, E>) {
        if result.is_ok() {
            self.complete();
        } else {
            self.complete_with_error();
        }
    }
}
