use portfolio_contact::analytics::AnalyticsClient;
use portfolio_contact::error::{AnalyticsError, AnalyticsResult};
use portfolio_contact::models::Properties;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// A call made against the analytics collaborator, in order.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsCall {
    Alias { new_id: String, previous_id: String },
    Identify(String),
    SetProfile(Properties),
    Track { event: String, properties: Properties },
}

#[allow(dead_code)]
impl AnalyticsCall {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Alias { .. } => "alias",
            Self::Identify(_) => "identify",
            Self::SetProfile(_) => "set_profile",
            Self::Track { .. } => "track",
        }
    }
}

/// Mock analytics client that records every call.
///
/// Behaves like the browser SDK for the distinct id: `identify` switches it.
#[allow(dead_code)]
#[derive(Clone)]
pub struct RecordingAnalytics {
    calls: Arc<Mutex<Vec<AnalyticsCall>>>,
    distinct_id: Arc<Mutex<Option<String>>>,
    failing: Arc<Mutex<HashSet<&'static str>>>,
}

#[allow(dead_code)]
impl RecordingAnalytics {
    pub fn new(distinct_id: Option<&str>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            distinct_id: Arc::new(Mutex::new(distinct_id.map(str::to_string))),
            failing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Make calls of `kind` ("alias", "identify", "set_profile", "track") fail.
    pub fn fail_on(&self, kind: &'static str) {
        self.failing.lock().unwrap().insert(kind);
    }

    pub fn calls(&self) -> Vec<AnalyticsCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.calls().iter().map(AnalyticsCall::kind).collect()
    }

    /// Names of tracked events, in order.
    pub fn tracked(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AnalyticsCall::Track { event, .. } => Some(event),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: AnalyticsCall) -> AnalyticsResult<()> {
        let kind = call.kind();
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(kind) {
            return Err(AnalyticsError::Unavailable(format!("{} blocked", kind)));
        }
        Ok(())
    }
}

impl AnalyticsClient for RecordingAnalytics {
    fn distinct_id(&self) -> Option<String> {
        self.distinct_id.lock().unwrap().clone()
    }

    fn alias(&self, new_id: &str, previous_id: &str) -> AnalyticsResult<()> {
        self.record(AnalyticsCall::Alias {
            new_id: new_id.to_string(),
            previous_id: previous_id.to_string(),
        })
    }

    fn identify(&self, id: &str) -> AnalyticsResult<()> {
        self.record(AnalyticsCall::Identify(id.to_string()))?;
        *self.distinct_id.lock().unwrap() = Some(id.to_string());
        Ok(())
    }

    fn set_profile(&self, attributes: &Properties) -> AnalyticsResult<()> {
        self.record(AnalyticsCall::SetProfile(attributes.clone()))
    }

    fn track(&self, event_name: &str, properties: &Properties) -> AnalyticsResult<()> {
        self.record(AnalyticsCall::Track {
            event: event_name.to_string(),
            properties: properties.clone(),
        })
    }
}
