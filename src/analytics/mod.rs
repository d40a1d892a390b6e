//! Behavioral analytics collaborator.
//!
//! The pipeline only talks to analytics through [`AnalyticsClient`]. When no
//! Mixpanel token is configured (or the service is otherwise unavailable) a
//! [`NullAnalytics`] is substituted, so callers never branch on presence.
//!
//! Every call is synchronous and local: [`MixpanelClient`] only enqueues
//! payloads, and [`AnalyticsFlusher`] ships them in the background.

pub mod events;
mod flusher;
mod identity;
mod mixpanel;
mod transport;

pub use events::PortfolioEvent;
pub use flusher::AnalyticsFlusher;
pub use identity::IdentityCorrelator;
pub use mixpanel::{EventQueue, MixpanelClient, QueuedBatch};
pub use transport::{FlushReport, MixpanelTransport};

use crate::error::AnalyticsResult;
use crate::models::{AnalyticsEvent, Properties};

/// Capability interface of the analytics service.
///
/// Mirrors the browser SDK surface: read the current distinct id, merge an
/// anonymous history into a durable id, switch identity, update the people
/// profile, and record events.
pub trait AnalyticsClient: Send + Sync {
    /// Current distinct id, or `None` when the service is unavailable.
    fn distinct_id(&self) -> Option<String>;

    /// Bind `new_id` as the canonical identity for history recorded under `previous_id`.
    fn alias(&self, new_id: &str, previous_id: &str) -> AnalyticsResult<()>;

    /// Make `id` the active identity.
    fn identify(&self, id: &str) -> AnalyticsResult<()>;

    /// Set people-profile attributes on the active identity.
    fn set_profile(&self, attributes: &Properties) -> AnalyticsResult<()>;

    /// Record an event for the active identity.
    fn track(&self, event_name: &str, properties: &Properties) -> AnalyticsResult<()>;

    fn track_event(&self, event: &AnalyticsEvent) -> AnalyticsResult<()> {
        self.track(&event.name, &event.properties)
    }
}

/// Stand-in used when analytics is disabled or blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnalytics;

impl AnalyticsClient for NullAnalytics {
    fn distinct_id(&self) -> Option<String> {
        None
    }

    fn alias(&self, _new_id: &str, _previous_id: &str) -> AnalyticsResult<()> {
        Ok(())
    }

    fn identify(&self, _id: &str) -> AnalyticsResult<()> {
        Ok(())
    }

    fn set_profile(&self, _attributes: &Properties) -> AnalyticsResult<()> {
        Ok(())
    }

    fn track(&self, event_name: &str, _properties: &Properties) -> AnalyticsResult<()> {
        tracing::trace!(event = %event_name, "Analytics disabled, dropping event");
        Ok(())
    }
}

/// Run an analytics operation whose failure must never reach the caller.
///
/// Errors are logged at `warn` and turned into `None`.
pub fn best_effort<T>(operation: &str, op: impl FnOnce() -> AnalyticsResult<T>) -> Option<T> {
    match op() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(operation = %operation, error = %e, "Analytics call failed, ignoring");
            None
        }
    }
}
