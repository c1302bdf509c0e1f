//! GitHub Workflow API
//!
//! HTTP service that automates a repository workflow on top of the GitHub
//! REST API:
//!
//! - `POST /create-issue`: open an issue and tag the automation agent
//! - `POST /create-pr`: open a pull request, picking the most recently
//!   updated branch when none is named
//! - `POST /approve-merge-pr`: approve then merge a pull request, picking the
//!   latest open one when none is named
//!
//! ## Example
//!
//! ```bash
//! GITHUB_TOKEN=<TOKEN> GITHUB_OWNER=my-org github-workflow-api
//!
//! curl -X POST localhost:8000/create-pr \
//!   -H 'content-type: application/json' \
//!   -d '{"repository": "my-repo"}'
//! ```

pub mod config;
pub mod error;
pub mod github;
pub mod handlers;
pub mod selectors;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use github::GitHubClient;

/// State shared by every handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> reqwest::Result<Self> {
        let http = github::http_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Authenticated client for one request.
    ///
    /// # Errors
    /// Fails with [`ServiceError::Configuration`] when the token or owner is unset.
    pub fn github(&self) -> Result<GitHubClient, ServiceError> {
        GitHubClient::from_config(&self.config, self.http.clone())
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::banner))
        .route("/health", get(handlers::root::health_check))
        .route("/create-issue", post(handlers::issue::create_issue))
        .route("/create-pr", post(handlers::pull_request::create_pull_request))
        .route("/approve-merge-pr", post(handlers::merge::approve_and_merge))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
