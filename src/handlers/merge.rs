//! POST /approve-merge-pr
//!
//! Approves a pull request and merges it. Without an explicit number, the
//! most recently created open pull request is used. An approval followed by a
//! failed merge is reported as a merge failure; the approval stays.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{non_blank, non_zero, ApiResponse};
use crate::error::ServiceError;
use crate::github::types::{MergeMethod, MergeRequest, MergeResult, NewReview, Review};
use crate::github::GitHubClient;
use crate::selectors::select_latest_open_pr;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ApproveMergeRequest {
    pub repository: String,
    pub pr_number: Option<u64>,
    pub review_comment: Option<String>,
    pub merge_method: Option<MergeMethod>,
    pub commit_title: Option<String>,
    pub commit_message: Option<String>,
}

fn default_review_comment() -> String {
    "LGTM".to_string()
}

#[derive(Debug, Serialize)]
pub struct ApprovedAndMerged {
    pub pr_number: u64,
    pub approval: ApprovalInfo,
    pub merge: MergeInfo,
}

#[derive(Debug, Serialize)]
pub struct ApprovalInfo {
    pub review_id: u64,
    pub state: String,
    pub submitted_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MergeInfo {
    pub sha: String,
    pub merged: bool,
    pub message: String,
}

pub async fn approve_and_merge(
    State(state): State<AppState>,
    Json(req): Json<ApproveMergeRequest>,
) -> Result<Json<ApiResponse<ApprovedAndMerged>>, ServiceError> {
    let client = state.github()?;
    let result = approve_then_merge(&client, req).await?;

    Ok(Json(ApiResponse::ok(
        "Approved and merged pull request",
        result,
    )))
}

pub async fn approve_then_merge(
    client: &GitHubClient,
    req: ApproveMergeRequest,
) -> Result<ApprovedAndMerged, ServiceError> {
    let merge_method = req.merge_method.unwrap_or_default();
    let review_comment = req.review_comment.unwrap_or_else(default_review_comment);

    let pr_number = match non_zero(req.pr_number) {
        Some(number) => number,
        None => select_latest_open_pr(client, &req.repository)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No open pull requests found in repository {}",
                    req.repository
                ))
            })?,
    };

    let review: Review = client
        .post(
            &client.repo_path(&req.repository, &format!("/pulls/{}/reviews", pr_number)),
            "approve pull request",
        )
        .expect_status(StatusCode::OK)
        .json(&NewReview::approve(review_comment))
        .send()
        .await?;
    info!(repository = %req.repository, pr_number, review_id = review.id, "Pull request approved");

    let merge: MergeResult = client
        .put(
            &client.repo_path(&req.repository, &format!("/pulls/{}/merge", pr_number)),
            "merge pull request",
        )
        .json(&MergeRequest {
            merge_method,
            commit_title: non_blank(req.commit_title),
            commit_message: non_blank(req.commit_message),
        })
        .send()
        .await?;
    info!(
        repository = %req.repository,
        pr_number,
        sha = %merge.sha,
        method = %merge_method,
        "Pull request merged"
    );

    Ok(ApprovedAndMerged {
        pr_number,
        approval: ApprovalInfo {
            review_id: review.id,
            state: review.state,
            submitted_at: review.submitted_at,
        },
        merge: MergeInfo {
            sha: merge.sha,
            merged: merge.merged,
            message: merge.message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: ApproveMergeRequest =
            serde_json::from_value(serde_json::json!({"repository": "hello"})).unwrap();
        assert!(req.review_comment.is_none());
        assert!(req.merge_method.is_none());
        assert!(req.pr_number.is_none());
    }

    #[test]
    fn test_request_accepts_null_defaults() {
        let req: ApproveMergeRequest = serde_json::from_value(serde_json::json!({
            "repository": "hello",
            "pr_number": 3,
            "review_comment": null,
            "merge_method": null
        }))
        .unwrap();
        assert_eq!(req.merge_method.unwrap_or_default(), MergeMethod::Merge);
        assert!(req.review_comment.is_none());
    }

    #[test]
    fn test_rejects_unknown_merge_method() {
        let result = serde_json::from_value::<ApproveMergeRequest>(serde_json::json!({
            "repository": "hello",
            "merge_method": "octopus"
        }));
        assert!(result.is_err());
    }
}
