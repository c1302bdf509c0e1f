//! GitHub Workflow API server
//!
//! ## Usage
//! ```bash
//! github-workflow-api --github-owner my-org --bind 0.0.0.0:8000
//!
//! # With environment variables
//! GITHUB_TOKEN=<TOKEN> GITHUB_OWNER=my-org github-workflow-api
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use github_workflow_api::config::{DEFAULT_API_BASE, DEFAULT_TRIGGER_COMMENT};
use github_workflow_api::{router, AppState, ServiceConfig};

/// GitHub workflow automation service
#[derive(Parser, Debug)]
#[command(name = "github-workflow-api")]
#[command(about = "Create issues, create pull requests and approve-merge them via the GitHub API")]
#[command(version)]
struct Cli {
    /// GitHub token (PAT or installation token)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Account or organization owning the repositories
    #[arg(long, env = "GITHUB_OWNER")]
    github_owner: Option<String>,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    github_api_url: String,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Timeout for each GitHub API call, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    upstream_timeout_secs: u64,

    /// Comment added to every new issue
    #[arg(long, env = "TRIGGER_COMMENT", default_value = DEFAULT_TRIGGER_COMMENT)]
    trigger_comment: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();

    let config = ServiceConfig::new(cli.github_token, cli.github_owner)
        .api_base(cli.github_api_url)
        .upstream_timeout(Duration::from_secs(cli.upstream_timeout_secs))
        .trigger_comment(cli.trigger_comment);

    if !config.has_token() {
        warn!("GITHUB_TOKEN not set; action endpoints will fail until it is configured");
    }
    if !config.has_owner() {
        warn!("GITHUB_OWNER not set; action endpoints will fail until it is configured");
    }
    info!(config = ?config, "Starting GitHub workflow API");

    let state = AppState::new(config).context("Failed to build HTTP client")?;
    let app = router(state);

    info!("Listening on {}", cli.bind);
    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}
