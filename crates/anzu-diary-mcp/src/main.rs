//! Anzu Diary MCP Server
//!
//! Model Context Protocol server for the diary API
//! Run with: DIARY_API_BASE=xxx anzu-diary-mcp

use anyhow::Context;
use anzu_diary_mcp::{logging, ApiClient, DiaryConfig, DiaryService};
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = DiaryConfig::from_env()
        .context("Failed to load configuration. Set DIARY_API_BASE environment variable")?;

    logging::init(config.log_file.as_deref())?;

    let api_client = ApiClient::from_config(&config).context("Failed to create API client")?;
    tracing::info!(
        api_base = %config.api_base,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting anzu diary MCP server"
    );

    let service = DiaryService::new(api_client);
    let running = service.serve(stdio()).await.context("MCP transport failed")?;
    running.waiting().await.context("MCP server error")?;

    Ok(())
}
