//! MCP server for the portfolio contact pipeline.
//!
//! One server process serves one visitor session: the analytics identity it
//! holds is the visitor's, and the in-flight guard covers that visitor's form.

pub mod handlers;

pub use handlers::PortfolioContactServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server over stdio until the peer disconnects.
pub async fn run_server(server: PortfolioContactServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
