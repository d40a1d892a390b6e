//! Portfolio Contact - Main entry point
//!
//! Serves the contact form pipeline over the Model Context Protocol on stdio.

use anyhow::Result;
use portfolio_contact::analytics::{AnalyticsFlusher, EventQueue, MixpanelTransport};
use portfolio_contact::{
    AnalyticsClient, AsyncEmailJsClient, Config, EmailDelivery, EmailJsClient, Metrics,
    MixpanelClient, NullAnalytics, PortfolioContactServer, SubmissionServiceImpl,
    SubmissionSettings,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env before the filter so LOG_LEVEL can come from it
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Config::log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Missing EmailJS credentials are fatal
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Starting Portfolio Contact server with EmailJS URL: {}", config.emailjs_api_url);

    let metrics = Metrics::new();

    let email = Arc::new(AsyncEmailJsClient::new(EmailJsClient::new(
        &config,
        metrics.clone(),
    ))) as Arc<dyn EmailDelivery>;

    let (analytics, flusher) = match config.mixpanel_token.as_deref() {
        Some(token) => {
            let queue = EventQueue::new();
            let client = match config.mixpanel_distinct_id.as_deref() {
                Some(id) => MixpanelClient::with_distinct_id(token, id, queue.clone()),
                None => MixpanelClient::new(token, queue.clone()),
            };
            let transport = MixpanelTransport::new(&config, metrics.clone());
            let flusher = AnalyticsFlusher::spawn(
                transport,
                queue,
                Duration::from_secs(config.analytics_flush_interval_secs),
            );
            info!(
                "Mixpanel analytics enabled (flush every {}s)",
                config.analytics_flush_interval_secs
            );
            (Arc::new(client) as Arc<dyn AnalyticsClient>, Some(flusher))
        }
        None => {
            warn!("MIXPANEL_TOKEN not set, analytics disabled");
            (Arc::new(NullAnalytics) as Arc<dyn AnalyticsClient>, None)
        }
    };

    let service = Arc::new(SubmissionServiceImpl::new(
        SubmissionSettings::from_config(&config),
        email,
        analytics.clone(),
    ));

    let server = PortfolioContactServer::new(
        service,
        analytics,
        metrics.clone(),
        config.analytics_enabled(),
        config.resume_file_prefix.clone(),
    );

    info!("Starting MCP server with stdio transport");
    let served = portfolio_contact::server::run_server(server).await;

    if let Some(flusher) = flusher {
        flusher.shutdown().await;
    }

    let summary = metrics.summary();
    info!(
        emails_sent = summary.emails_sent_total,
        analytics_flushed = summary.analytics_flushed_total,
        analytics_dropped = summary.analytics_dropped_total,
        http_errors = summary.http_errors_total,
        "Portfolio Contact server shutdown complete"
    );

    served
}
