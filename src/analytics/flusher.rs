//! Background delivery of queued analytics payloads.

use super::mixpanel::EventQueue;
use super::transport::{FlushReport, MixpanelTransport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Periodically drains an [`EventQueue`] into a [`MixpanelTransport`].
///
/// The queue is flushed one last time on [`AnalyticsFlusher::shutdown`].
pub struct AnalyticsFlusher {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl AnalyticsFlusher {
    /// Start the flush loop on the current runtime.
    pub fn spawn(transport: MixpanelTransport, queue: EventQueue, interval: Duration) -> Self {
        let transport = Arc::new(transport);
        let (stop, mut stop_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        flush_once(transport.clone(), queue.clone()).await;
                    }
                    _ = &mut stop_rx => break,
                }
            }

            let report = flush_once(transport, queue).await;
            tracing::info!(
                sent = report.sent,
                dropped = report.dropped,
                "Final analytics flush complete"
            );
        });

        Self { stop, handle }
    }

    /// Stop the loop and wait for the final flush.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "Analytics flusher task failed");
        }
    }
}

/// Drain the queue on the blocking pool.
async fn flush_once(transport: Arc<MixpanelTransport>, queue: EventQueue) -> FlushReport {
    if queue.is_empty() {
        return FlushReport::default();
    }

    match tokio::task::spawn_blocking(move || transport.flush(&queue)).await {
        Ok(report) => {
            tracing::debug!(sent = report.sent, dropped = report.dropped, "Analytics flushed");
            report
        }
        Err(e) => {
            tracing::warn!(error = %e, "Analytics flush task join error");
            FlushReport::default()
        }
    }
}
