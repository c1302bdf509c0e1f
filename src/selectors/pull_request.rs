//! Latest Open Pull Request Selection
//!
//! Relies on GitHub's ordering: one listing call sorted by creation date,
//! newest first, limited to a single result.

use tracing::info;

use crate::error::ServiceError;
use crate::github::types::PullRequestSummary;
use crate::github::GitHubClient;

/// Number of the most recently created open pull request, if any.
pub async fn select_latest_open_pr(
    client: &GitHubClient,
    repository: &str,
) -> Result<Option<u64>, ServiceError> {
    let pulls: Vec<PullRequestSummary> = client
        .get(&client.repo_path(repository, "/pulls"), "list pull requests")
        .query(&[
            ("state", "open"),
            ("sort", "created"),
            ("direction", "desc"),
            ("per_page", "1"),
        ])
        .send()
        .await?;

    let latest = pulls.first().map(|pr| pr.number);
    if let Some(number) = latest {
        info!(repository = %repository, pr_number = number, "Selected latest open pull request");
    }
    Ok(latest)
}
