pub mod mock_email_delivery;
pub mod recording_analytics;

#[allow(unused_imports)]
pub use mock_email_delivery::{MockEmailDelivery, SentEmail};
#[allow(unused_imports)]
pub use recording_analytics::{AnalyticsCall, RecordingAnalytics};
