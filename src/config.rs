//! Service Configuration
//!
//! Process-wide settings read once at startup and shared read-only with every
//! handler. The credential and owner are optional here: their absence is only
//! reported when an endpoint actually needs them.

use std::time::Duration;

/// Default GitHub REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Comment posted on every newly created issue to hand it to the automation agent.
pub const DEFAULT_TRIGGER_COMMENT: &str = "@claude 実装して";

/// Default per-call timeout for upstream requests.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable configuration for the service.
#[derive(Clone)]
pub struct ServiceConfig {
    /// GitHub token (PAT or installation token)
    pub token: Option<String>,
    /// Account or organization that owns the target repositories
    pub owner: Option<String>,
    /// API root, without trailing slash
    pub api_base: String,
    /// Timeout applied to each upstream call
    pub upstream_timeout: Duration,
    /// Body of the comment added after an issue is created
    pub trigger_comment: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("has_token", &self.token.is_some())
            .field("owner", &self.owner)
            .field("api_base", &self.api_base)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("trigger_comment", &self.trigger_comment)
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: None,
            api_base: DEFAULT_API_BASE.to_string(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            trigger_comment: DEFAULT_TRIGGER_COMMENT.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Create a configuration with the given credentials and defaults elsewhere.
    ///
    /// Empty strings are treated as unset.
    pub fn new(token: Option<String>, owner: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            owner: owner.filter(|o| !o.is_empty()),
            ..Self::default()
        }
    }

    /// Override the API root (GitHub Enterprise, tests).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the upstream timeout.
    pub fn upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Override the comment posted on new issues.
    pub fn trigger_comment(mut self, comment: impl Into<String>) -> Self {
        self.trigger_comment = comment.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_owner(&self) -> bool {
        self.owner.is_some()
    }
}
