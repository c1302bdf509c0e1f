//! HTTP Endpoint Handlers
//!
//! Each action handler is a short sequential chain of upstream calls. The
//! first failure ends the request; earlier side effects on GitHub are kept.

pub mod issue;
pub mod merge;
pub mod pull_request;
pub mod root;

use serde::Serialize;

/// Success envelope shared by the action endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Treat an empty string as if the field had been omitted.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Treat an empty list as if the field had been omitted.
pub(crate) fn non_empty<T>(value: Option<Vec<T>>) -> Option<Vec<T>> {
    value.filter(|v| !v.is_empty())
}

/// Treat zero as if the field had been omitted.
pub(crate) fn non_zero(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_absent() {
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_empty::<String>(Some(vec![])), None);
        assert_eq!(non_zero(Some(0)), None);
        assert_eq!(non_zero(Some(7)), Some(7));
    }

    #[test]
    fn test_envelope() {
        let body = serde_json::to_value(ApiResponse::ok("done", 1)).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "message": "done", "data": 1}));
    }
}
