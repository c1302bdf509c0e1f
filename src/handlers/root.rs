//! Service banner and liveness probe

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET / - service description and configuration status
pub async fn banner(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "message": "GitHub workflow API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /create-issue": "Create a GitHub issue and add the trigger comment",
            "POST /create-pr": "Create a pull request (latest branch when none is given)",
            "POST /approve-merge-pr": "Approve and merge a pull request (latest open one when none is given)"
        },
        "environment": {
            "github_token_set": config.has_token(),
            "github_owner_set": config.has_owner(),
            "github_owner": config.owner,
        }
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "github-workflow-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
