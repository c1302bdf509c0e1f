//! POST /create-pr
//!
//! Opens a pull request. Without an explicit branch, the branch with the most
//! recent tip commit is used as head.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{non_blank, ApiResponse};
use crate::error::ServiceError;
use crate::github::types::{NewPullRequest, PullRequest};
use crate::github::GitHubClient;
use crate::selectors::select_latest_branch;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePullRequestRequest {
    pub repository: String,
    pub branch: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub base: Option<String>,
}

fn default_base() -> String {
    "main".to_string()
}

#[derive(Debug, Serialize)]
pub struct PullRequestCreated {
    pub pr_number: u64,
    pub pr_url: String,
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
}

pub async fn create_pull_request(
    State(state): State<AppState>,
    Json(req): Json<CreatePullRequestRequest>,
) -> Result<Json<ApiResponse<PullRequestCreated>>, ServiceError> {
    let client = state.github()?;
    let created = open_pull_request(&client, req).await?;

    Ok(Json(ApiResponse::ok("Created pull request", created)))
}

/// Title used when the caller does not supply one
pub fn default_title(branch: &str) -> String {
    format!("PR from {}", branch)
}

pub async fn open_pull_request(
    client: &GitHubClient,
    req: CreatePullRequestRequest,
) -> Result<PullRequestCreated, ServiceError> {
    let head = match non_blank(req.branch) {
        Some(branch) => branch,
        None => select_latest_branch(client, &req.repository)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No branches found in repository {}",
                    req.repository
                ))
            })?,
    };

    let payload = NewPullRequest {
        title: non_blank(req.title).unwrap_or_else(|| default_title(&head)),
        body: req.body.unwrap_or_default(),
        head,
        base: non_blank(req.base).unwrap_or_else(default_base),
    };

    let pr: PullRequest = client
        .post(&client.repo_path(&req.repository, "/pulls"), "create pull request")
        .json(&payload)
        .send()
        .await?;
    info!(
        repository = %req.repository,
        pr_number = pr.number,
        head = %payload.head,
        base = %payload.base,
        "Pull request created"
    );

    Ok(PullRequestCreated {
        pr_number: pr.number,
        pr_url: pr.html_url,
        head_branch: payload.head,
        base_branch: payload.base,
        title: pr.title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: CreatePullRequestRequest =
            serde_json::from_value(serde_json::json!({"repository": "hello"})).unwrap();
        assert!(req.base.is_none());
        assert!(req.body.is_none());
        assert!(req.branch.is_none());
        assert!(req.title.is_none());
    }

    #[test]
    fn test_request_accepts_null_defaults() {
        let req: CreatePullRequestRequest = serde_json::from_value(serde_json::json!({
            "repository": "hello",
            "branch": "f",
            "title": null,
            "body": null,
            "base": null
        }))
        .unwrap();
        assert!(req.base.is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_default_title() {
        assert_eq!(default_title("feature/login"), "PR from feature/login");
    }
}
