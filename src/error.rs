//! Service errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

/// Errors that terminate a request
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required setting (token, owner) is missing
    #[error("{0}")]
    Configuration(String),

    /// GitHub answered with a status other than the one the call expects
    #[error("Failed to {action}: {body}")]
    Upstream {
        action: &'static str,
        status: StatusCode,
        body: String,
    },

    /// A selector found nothing to operate on
    #[error("{0}")]
    NotFound(String),

    /// The request never produced a response (connect failure, timeout)
    #[error("Failed to {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A success response did not have the expected shape
    #[error("Failed to {action}: unexpected response body: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ServiceError {
    pub fn missing_setting(name: &str) -> Self {
        ServiceError::Configuration(format!("{} environment variable is not set", name))
    }

    /// HTTP status reported to the caller
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Upstream { status, .. } => *status,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Transport { .. } | ServiceError::Decode { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Configuration(_) => "configuration_error",
            ServiceError::Upstream { .. } => "upstream_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Transport { .. } => "transport_error",
            ServiceError::Decode { .. } => "decode_error",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ServiceError::Upstream { action, .. } => {
                warn!(status = status.as_u16(), action = %action, "Upstream call rejected");
            }
            ServiceError::NotFound(message) => warn!("{}", message),
            other => error!(error = %other, "Request failed"),
        }

        (
            status,
            Json(serde_json::json!({
                "success": false,
                "error": self.kind(),
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_passes_through() {
        let err = ServiceError::Upstream {
            action: "merge pull request",
            status: StatusCode::METHOD_NOT_ALLOWED,
            body: "{\"message\":\"Pull Request is not mergeable\"}".to_string(),
        };
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            err.to_string(),
            "Failed to merge pull request: {\"message\":\"Pull Request is not mergeable\"}"
        );
    }

    #[test]
    fn test_configuration_is_internal_error() {
        let err = ServiceError::missing_setting("GITHUB_TOKEN");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "configuration_error");
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_not_found_status() {
        let err = ServiceError::NotFound("No branches found in repository".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = ServiceError::NotFound("nothing here".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "nothing here");
    }
}
