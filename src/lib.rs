//! Portfolio Contact - the contact form pipeline of a bilingual (English/Spanish)
//! portfolio site.
//!
//! A visitor's message is validated, delivered to the site owner through
//! EmailJS, and, once delivery succeeds, the visitor's anonymous Mixpanel
//! history is merged into an identity keyed by their email address.
//!
//! # Architecture
//!
//! - **domain**: Locale, email format, name splitting, and form validation
//! - **models**: Form input, template parameters, outcomes, and analytics events
//! - **messages**: Localized notification texts
//! - **email**: EmailJS client and its async delivery trait
//! - **analytics**: Mixpanel session, identity correlation, transport, and flusher
//! - **services**: The submission orchestrator
//! - **server**: MCP protocol server exposing the pipeline as tools
//! - **config**, **error**, **metrics**: Ambient configuration, error types, and counters

pub mod analytics;
pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod messages;
pub mod metrics;
pub mod models;
pub mod server;
pub mod services;

pub use analytics::{AnalyticsClient, IdentityCorrelator, MixpanelClient, NullAnalytics};
pub use config::Config;
pub use domain::{validate, Locale, ValidationError, ValidationOutcome};
pub use email::{AsyncEmailJsClient, EmailDelivery, EmailJsClient};
pub use error::{AnalyticsError, ConfigError, DeliveryError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{ClientContext, ContactFormInput, FailureReason, SubmissionOutcome};
pub use server::PortfolioContactServer;
pub use services::{SubmissionService, SubmissionServiceImpl, SubmissionSettings};
