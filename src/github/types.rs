//! GitHub REST API shapes
//!
//! Only the fields this service reads or writes. Timestamps are kept as the
//! strings GitHub returns so they are echoed back unchanged.

use serde::{Deserialize, Serialize};

// ============================================================
// Response Types
// ============================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub html_url: String,
    pub title: String,
    pub state: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    pub html_url: String,
    pub body: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
    pub title: String,
}

/// Entry of the pull request listing; only the number is needed
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub id: u64,
    pub state: String,
    /// Absent for pending reviews
    pub submitted_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeResult {
    pub sha: String,
    pub merged: bool,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: CommitRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub committer: Option<GitActor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitActor {
    pub date: Option<String>,
}

impl Commit {
    /// Raw committer timestamp, if GitHub reported one
    pub fn committer_date(&self) -> Option<&str> {
        self.commit
            .committer
            .as_ref()
            .and_then(|c| c.date.as_deref())
    }
}

// ============================================================
// Request Payloads
// ============================================================

#[derive(Debug, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct NewComment {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

#[derive(Debug, Serialize)]
pub struct NewReview {
    pub event: &'static str,
    pub body: String,
}

impl NewReview {
    pub fn approve(body: impl Into<String>) -> Self {
        Self {
            event: "APPROVE",
            body: body.into(),
        }
    }
}

/// How GitHub combines the pull request's commits into the base branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    #[default]
    Merge,
    Squash,
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeMethod::Merge => write!(f, "merge"),
            MergeMethod::Squash => write!(f, "squash"),
            MergeMethod::Rebase => write!(f, "rebase"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MergeRequest {
    pub merge_method: MergeMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_issue_omits_absent_fields() {
        let issue = NewIssue {
            title: "Bug".to_string(),
            body: "It broke".to_string(),
            labels: None,
            assignees: None,
            milestone: None,
        };
        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({"title": "Bug", "body": "It broke"})
        );
    }

    #[test]
    fn test_new_issue_includes_present_fields() {
        let issue = NewIssue {
            title: "Bug".to_string(),
            body: "It broke".to_string(),
            labels: Some(vec!["bug".to_string(), "p1".to_string()]),
            assignees: Some(vec!["octocat".to_string()]),
            milestone: Some(3),
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["labels"], json!(["bug", "p1"]));
        assert_eq!(value["assignees"], json!(["octocat"]));
        assert_eq!(value["milestone"], 3);
    }

    #[test]
    fn test_merge_method_wire_format() {
        assert_eq!(MergeMethod::default(), MergeMethod::Merge);
        assert_eq!(serde_json::to_value(MergeMethod::Squash).unwrap(), "squash");
        let parsed: MergeMethod = serde_json::from_value(json!("rebase")).unwrap();
        assert_eq!(parsed, MergeMethod::Rebase);
        assert!(serde_json::from_value::<MergeMethod>(json!("fast-forward")).is_err());
        assert_eq!(MergeMethod::Rebase.to_string(), "rebase");
    }

    #[test]
    fn test_merge_request_optional_commit_fields() {
        let request = MergeRequest {
            merge_method: MergeMethod::Squash,
            commit_title: Some("Release".to_string()),
            commit_message: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"merge_method": "squash", "commit_title": "Release"})
        );
    }

    #[test]
    fn test_approve_review_payload() {
        let review = NewReview::approve("LGTM");
        assert_eq!(
            serde_json::to_value(&review).unwrap(),
            json!({"event": "APPROVE", "body": "LGTM"})
        );
    }

    #[test]
    fn test_commit_committer_date() {
        let commit: Commit = serde_json::from_value(json!({
            "sha": "abc",
            "commit": {"committer": {"name": "x", "date": "2024-01-02T03:04:05Z"}}
        }))
        .unwrap();
        assert_eq!(commit.committer_date(), Some("2024-01-02T03:04:05Z"));

        let bare: Commit = serde_json::from_value(json!({
            "sha": "def",
            "commit": {"committer": null}
        }))
        .unwrap();
        assert_eq!(bare.committer_date(), None);
    }
}
