//! POST /create-issue
//!
//! Creates an issue, then adds the trigger comment that hands it to the
//! automation agent. A failing comment call leaves the issue in place.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{non_empty, non_zero, ApiResponse};
use crate::error::ServiceError;
use crate::github::types::{Issue, IssueComment, NewComment, NewIssue};
use crate::github::GitHubClient;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateIssueRequest {
    pub repository: String,
    pub title: String,
    pub body: String,
    pub labels: Option<Vec<String>>,
    pub assignees: Option<Vec<String>>,
    pub milestone: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct IssueCreated {
    pub issue: IssueInfo,
    pub comment: CommentInfo,
}

#[derive(Debug, Serialize)]
pub struct IssueInfo {
    pub issue_number: u64,
    pub issue_url: String,
    pub title: String,
    pub state: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CommentInfo {
    pub comment_id: u64,
    pub comment_url: String,
    pub body: String,
    pub created_at: String,
}

impl From<Issue> for IssueInfo {
    fn from(issue: Issue) -> Self {
        Self {
            issue_number: issue.number,
            issue_url: issue.html_url,
            title: issue.title,
            state: issue.state,
            created_at: issue.created_at,
        }
    }
}

impl From<IssueComment> for CommentInfo {
    fn from(comment: IssueComment) -> Self {
        Self {
            comment_id: comment.id,
            comment_url: comment.html_url,
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}

pub async fn create_issue(
    State(state): State<AppState>,
    Json(req): Json<CreateIssueRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IssueCreated>>), ServiceError> {
    let client = state.github()?;
    let created = open_issue(&client, req, &state.config.trigger_comment).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Created issue and added comment", created)),
    ))
}

/// Create the issue and post `trigger_comment` on it.
pub async fn open_issue(
    client: &GitHubClient,
    req: CreateIssueRequest,
    trigger_comment: &str,
) -> Result<IssueCreated, ServiceError> {
    let payload = NewIssue {
        title: req.title,
        body: req.body,
        labels: non_empty(req.labels),
        assignees: non_empty(req.assignees),
        milestone: non_zero(req.milestone),
    };

    let issue: Issue = client
        .post(&client.repo_path(&req.repository, "/issues"), "create issue")
        .json(&payload)
        .send()
        .await?;
    info!(repository = %req.repository, issue_number = issue.number, "Issue created");

    let comment: IssueComment = client
        .post(
            &client.repo_path(&req.repository, &format!("/issues/{}/comments", issue.number)),
            "add comment",
        )
        .json(&NewComment {
            body: trigger_comment.to_string(),
        })
        .send()
        .await?;
    info!(issue_number = issue.number, comment_id = comment.id, "Trigger comment added");

    Ok(IssueCreated {
        issue: issue.into(),
        comment: comment.into(),
    })
}
