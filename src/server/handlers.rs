//! MCP tool handlers for the portfolio contact server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::analytics::{best_effort, AnalyticsClient, PortfolioEvent};
use crate::domain::{Locale, ValidationOutcome};
use crate::messages;
use crate::metrics::Metrics;
use crate::models::{ClientContext, ContactFormInput};
use crate::services::SubmissionService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes the contact form pipeline.
#[derive(Clone)]
pub struct PortfolioContactServer {
    submission_service: Arc<dyn SubmissionService>,
    analytics: Arc<dyn AnalyticsClient>,
    metrics: Metrics,
    analytics_enabled: bool,
    resume_file_prefix: String,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for PortfolioContactServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "portfolio-contact".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Contact form pipeline for a bilingual (en/es) portfolio site - validates and sends visitor messages to the site owner and records visitor analytics.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct ContactFormToolParams {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
    /// "en" or "es" (default: "en")
    #[serde(default)]
    language: Locale,
}

impl From<ContactFormToolParams> for ContactFormInput {
    fn from(params: ContactFormToolParams) -> Self {
        ContactFormInput::new(params.name, params.email, params.message, params.language)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SubmitContactFormToolParams {
    #[serde(flatten)]
    form: ContactFormToolParams,
    #[serde(default)]
    user_agent: Option<String>,
    #[serde(default)]
    referrer: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TrackPortfolioEventToolParams {
    /// One of: portfolio_loaded, language_changed, navigation_click,
    /// resume_downloaded, project_clicked, social_link_clicked
    event: String,
    #[serde(default)]
    language: Option<Locale>,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    platform: Option<String>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(message: impl Into<String>) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(message.into()),
        data: None,
    }
}

fn required(value: Option<String>, field: &str, event: &str) -> Result<String, McpError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| invalid_params(format!("'{}' is required for {}", field, event)))
}

impl PortfolioContactServer {
    /// Turn flat tool parameters into a typed event.
    fn parse_event(&self, params: TrackPortfolioEventToolParams) -> Result<PortfolioEvent, McpError> {
        let event = params.event.trim().to_ascii_lowercase();
        match event.as_str() {
            "portfolio_loaded" => Ok(PortfolioEvent::Loaded),
            "language_changed" => Ok(PortfolioEvent::LanguageChanged {
                language: params
                    .language
                    .ok_or_else(|| invalid_params("'language' is required for language_changed"))?,
            }),
            "navigation_click" => Ok(PortfolioEvent::NavigationClick {
                section: required(params.section, "section", &event)?,
            }),
            "resume_downloaded" => Ok(PortfolioEvent::resume_downloaded(
                params.language.unwrap_or_default(),
                &self.resume_file_prefix,
            )),
            "project_clicked" => Ok(PortfolioEvent::ProjectClicked {
                project: required(params.project, "project", &event)?,
            }),
            "social_link_clicked" => Ok(PortfolioEvent::SocialLinkClicked {
                platform: required(params.platform, "platform", &event)?,
            }),
            other => Err(invalid_params(format!("Unknown portfolio event: {}", other))),
        }
    }
}

// Tool router implementation
#[tool_router]
impl PortfolioContactServer {
    /// Create a new portfolio contact MCP server.
    pub fn new(
        submission_service: Arc<dyn SubmissionService>,
        analytics: Arc<dyn AnalyticsClient>,
        metrics: Metrics,
        analytics_enabled: bool,
        resume_file_prefix: String,
    ) -> Self {
        Self {
            submission_service,
            analytics,
            metrics,
            analytics_enabled,
            resume_file_prefix,
            tool_router: Self::tool_router(),
        }
    }

    /// Check the contact form fields without sending anything.
    #[tool(
        description = "Validate contact form fields (name, email, message, language) without sending anything. Returns whether the form is valid and the localized error to display if not."
    )]
    async fn validate_contact_form(
        &self,
        params: Parameters<ContactFormToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let input: ContactFormInput = params.0.into();

        let response = match self.submission_service.check(&input) {
            ValidationOutcome::Valid => serde_json::json!({
                "valid": true,
            }),
            ValidationOutcome::Invalid(reason) => serde_json::json!({
                "valid": false,
                "reason": reason.code(),
                "message": messages::validation_failed(reason).localize(input.language),
            }),
        };

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response).map_err(to_mcp_error)?,
        )]))
    }

    /// Send a contact form message to the portfolio owner.
    #[tool(
        description = "Submit the portfolio contact form. Validates the fields, emails the message to the site owner using the template for the given language, and links the visitor's analytics history to their email. Returns a localized notification to show the visitor."
    )]
    async fn submit_contact_form(
        &self,
        params: Parameters<SubmitContactFormToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: submit_contact_form called");
        tracing::debug!(
            "Parameters: language={}, message_len={}",
            params.form.language,
            params.form.message.chars().count()
        );

        let context = ClientContext {
            user_agent: params.user_agent,
            referrer: params.referrer,
        };
        let outcome = self
            .submission_service
            .submit(params.form.into(), &context)
            .await;

        let response = serde_json::json!({
            "notification": outcome.notification(),
            "reason": outcome.failure_reason(),
            "clear_fields": outcome.should_clear_fields(),
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response).map_err(to_mcp_error)?,
        )]))
    }

    /// Record a visitor interaction from the page layer.
    #[tool(
        description = "Record a portfolio interaction event (portfolio_loaded, language_changed, navigation_click, resume_downloaded, project_clicked, social_link_clicked). Fire-and-forget: analytics failures are never reported as errors."
    )]
    async fn track_portfolio_event(
        &self,
        params: Parameters<TrackPortfolioEventToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let portfolio_event = self.parse_event(params.0)?;
        let distinct_id = self.analytics.distinct_id();
        let event = portfolio_event.to_event(distinct_id.as_deref());

        let recorded = best_effort("portfolio event", || self.analytics.track_event(&event))
            .is_some();

        let response = serde_json::json!({
            "event": event.name,
            "properties": event.properties,
            "queued": recorded && self.analytics_enabled,
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response).map_err(to_mcp_error)?,
        )]))
    }

    /// Report the analytics identity currently in effect.
    #[tool(
        description = "Show the visitor's current analytics distinct id (anonymous until a contact form is submitted) and outbound request metrics."
    )]
    async fn get_analytics_identity(&self) -> Result<CallToolResult, McpError> {
        let response = serde_json::json!({
            "analytics_enabled": self.analytics_enabled,
            "distinct_id": self.analytics.distinct_id(),
            "metrics": self.metrics.summary(),
        });

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&response).map_err(to_mcp_error)?,
        )]))
    }
}
