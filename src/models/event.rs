//! Analytics event and identity types.

use serde::Serialize;
use serde_json::{Map, Value};

/// Event and profile properties. Values are strings, numbers, booleans or null.
pub type Properties = Map<String, Value>;

/// A named, fire-and-forget analytics event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub properties: Properties,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
        }
    }

    /// Add a property, replacing any previous value under the same key.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// Identity pair used while correlating one submission.
///
/// Long-term identity state belongs to the analytics client; this only
/// lives for the duration of a single protocol run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsIdentity {
    /// Distinct id in effect before the visitor identified themselves
    pub anonymous_id: Option<String>,

    /// The submitted email address
    pub identified_id: String,
}

impl AnalyticsIdentity {
    /// Whether history recorded under the anonymous id still needs merging.
    pub fn needs_alias(&self) -> bool {
        matches!(&self.anonymous_id, Some(anon) if anon != &self.identified_id)
    }
}
