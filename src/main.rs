use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mcp_github::config::Config;
use mcp_github::github::GitHubClient;
use mcp_github::server::Server;
use mcp_github::tools::{self, ToolRegistry};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> mcp_github::ToolResult<()> {
    let config = Config::from_env()?;
    let github = Arc::new(GitHubClient::new(
        config.api_url.clone(),
        config.github_token.clone(),
    )?);
    let registry = ToolRegistry::from_definitions(tools::github::definitions());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let mut server = Server::bind(addr, registry, github).await?;
    tracing::info!(
        "mcp-github server listening on http://0.0.0.0:{}",
        server.addr().port()
    );

    // Serve until the process is asked to stop.
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {err}");
    }
    tracing::info!("shutting down");
    server.shutdown();
    Ok(())
}
