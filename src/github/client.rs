//! GitHub API Client
//!
//! Thin adapter over `reqwest` that adds authentication and version headers
//! and turns any status other than the one a call expects into
//! [`ServiceError::Upstream`], carrying GitHub's status and raw body verbatim.
//!
//! No retries, no rate-limit handling, no pagination.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::ServiceError;

const ACCEPT_VALUE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Build the shared HTTP client used for every upstream call.
pub fn http_client(config: &ServiceConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("github-workflow-api/", env!("CARGO_PKG_VERSION")))
        .timeout(config.upstream_timeout)
        .build()
}

/// Authenticated GitHub client scoped to one owner.
///
/// Cheap to construct: it clones the shared `reqwest::Client` handle.
pub struct GitHubClient {
    http: Client,
    api_base: String,
    token: String,
    owner: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("owner", &self.owner)
            .finish()
    }
}

impl GitHubClient {
    /// Create a client from the service configuration.
    ///
    /// # Errors
    /// Returns [`ServiceError::Configuration`] if the token or owner is unset.
    /// No network activity happens before this check.
    pub fn from_config(config: &ServiceConfig, http: Client) -> Result<Self, ServiceError> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| ServiceError::missing_setting("GITHUB_TOKEN"))?;
        let owner = config
            .owner
            .clone()
            .ok_or_else(|| ServiceError::missing_setting("GITHUB_OWNER"))?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            token,
            owner,
        })
    }

    /// Path of a repository resource, e.g. `/repos/{owner}/{repo}/pulls`
    pub fn repo_path(&self, repository: &str, resource: &str) -> String {
        format!("/repos/{}/{}{}", self.owner, repository, resource)
    }

    /// Start a call. `action` names the step in error messages ("create issue").
    pub fn call(&self, method: Method, path: &str, action: &'static str) -> ApiCall {
        let url = format!("{}{}", self.api_base, path);
        debug!(method = %method, url = %url, "GitHub API call");

        let builder = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_VALUE)
            .header(API_VERSION_HEADER, API_VERSION);

        ApiCall {
            builder,
            expected: StatusCode::OK,
            action,
        }
    }

    pub fn get(&self, path: &str, action: &'static str) -> ApiCall {
        self.call(Method::GET, path, action)
    }

    /// POST calls default to expecting `201 Created`
    pub fn post(&self, path: &str, action: &'static str) -> ApiCall {
        self.call(Method::POST, path, action)
            .expect_status(StatusCode::CREATED)
    }

    pub fn put(&self, path: &str, action: &'static str) -> ApiCall {
        self.call(Method::PUT, path, action)
    }
}

/// A pending upstream call and the exact status it must answer with.
#[must_use]
pub struct ApiCall {
    builder: RequestBuilder,
    expected: StatusCode,
    action: &'static str,
}

impl ApiCall {
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expected = status;
        self
    }

    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        self.builder = self.builder.query(query);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.builder = self.builder.json(body);
        self
    }

    /// Send the call and decode the response body.
    ///
    /// # Errors
    /// - [`ServiceError::Transport`] if no response arrived
    /// - [`ServiceError::Upstream`] if the status differs from the expected one
    /// - [`ServiceError::Decode`] if the body does not match `T`
    pub async fn send<T: DeserializeOwned>(self) -> Result<T, ServiceError> {
        let action = self.action;
        let response = self
            .builder
            .send()
            .await
            .map_err(|source| ServiceError::Transport { action, source })?;

        let status = response.status();
        if status != self.expected {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(action = %action, error = %e, "Failed to read upstream error body");
                    String::new()
                }
            };
            debug!(status = status.as_u16(), expected = self.expected.as_u16(), "Unexpected status");
            return Err(ServiceError::Upstream {
                action,
                status,
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| ServiceError::Transport { action, source })?;

        serde_json::from_str(&text).map_err(|source| ServiceError::Decode { action, source })
    }
}
