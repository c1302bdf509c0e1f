//! Latest Branch Selection
//!
//! Picks the branch whose tip commit has the most recent committer date.
//! Branches whose commit cannot be resolved are skipped so one bad branch
//! does not block selection among the rest.

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, warn};

use crate::error::ServiceError;
use crate::github::types::{Branch, Commit};
use crate::github::GitHubClient;

/// Find the branch with the most recent tip commit.
///
/// Returns `Ok(None)` when the repository has no branches or none of them
/// could be resolved. Only the first page of the branch listing is scanned.
pub async fn select_latest_branch(
    client: &GitHubClient,
    repository: &str,
) -> Result<Option<String>, ServiceError> {
    let branches: Vec<Branch> = client
        .get(&client.repo_path(repository, "/branches"), "list branches")
        .send()
        .await?;

    if branches.is_empty() {
        return Ok(None);
    }

    let mut dated = Vec::with_capacity(branches.len());
    for branch in branches {
        if let Some(date) = tip_commit_date(client, repository, &branch).await? {
            dated.push((branch.name, date));
        }
    }

    let latest = pick_latest(dated);
    if let Some(name) = &latest {
        info!(repository = %repository, branch = %name, "Selected latest branch");
    }
    Ok(latest)
}

/// Committer date of the branch tip, or `None` if it cannot be resolved.
async fn tip_commit_date(
    client: &GitHubClient,
    repository: &str,
    branch: &Branch,
) -> Result<Option<DateTime<FixedOffset>>, ServiceError> {
    let path = client.repo_path(repository, &format!("/commits/{}", branch.commit.sha));
    let commit: Commit = match client.get(&path, "get commit").send().await {
        Ok(commit) => commit,
        Err(err @ (ServiceError::Upstream { .. } | ServiceError::Decode { .. })) => {
            warn!(branch = %branch.name, error = %err, "Skipping branch");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let Some(raw) = commit.committer_date() else {
        warn!(branch = %branch.name, sha = %commit.sha, "Commit has no committer date");
        return Ok(None);
    };

    match parse_commit_date(raw) {
        Ok(date) => {
            debug!(branch = %branch.name, date = %date, "Resolved tip commit");
            Ok(Some(date))
        }
        Err(e) => {
            warn!(branch = %branch.name, date = %raw, error = %e, "Unparseable commit date");
            Ok(None)
        }
    }
}

/// Parse a GitHub timestamp, rewriting the trailing `Z` marker as `+00:00`.
pub fn parse_commit_date(raw: &str) -> chrono::ParseResult<DateTime<FixedOffset>> {
    let normalized = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalized)
}

/// Name with the greatest timestamp. Equal timestamps keep the first one seen.
pub fn pick_latest<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = (String, DateTime<FixedOffset>)>,
{
    let mut latest: Option<(String, DateTime<FixedOffset>)> = None;
    for (name, date) in candidates {
        let newer = match &latest {
            Some((_, best)) => date > *best,
            None => true,
        };
        if newer {
            latest = Some((name, date));
        }
    }
    latest.map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> DateTime<FixedOffset> {
        parse_commit_date(raw).unwrap()
    }

    #[test]
    fn test_parse_zulu_suffix() {
        let date = at("2024-05-01T12:00:00Z");
        assert_eq!(date.offset().local_minus_utc(), 0);
        assert_eq!(date.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_parse_explicit_offset() {
        let tokyo = at("2024-05-01T21:00:00+09:00");
        assert_eq!(tokyo, at("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_commit_date("yesterday").is_err());
    }

    #[test]
    fn test_pick_latest() {
        let picked = pick_latest(vec![
            ("a".to_string(), at("2024-01-01T00:00:00Z")),
            ("b".to_string(), at("2024-03-01T00:00:00Z")),
            ("c".to_string(), at("2024-02-01T00:00:00Z")),
        ]);
        assert_eq!(picked.as_deref(), Some("b"));
    }

    #[test]
    fn test_pick_latest_tie_keeps_first() {
        let picked = pick_latest(vec![
            ("old".to_string(), at("2023-01-01T00:00:00Z")),
            ("first".to_string(), at("2024-01-01T00:00:00Z")),
            ("second".to_string(), at("2024-01-01T09:00:00+09:00")),
        ]);
        assert_eq!(picked.as_deref(), Some("first"));
    }

    #[test]
    fn test_pick_latest_empty() {
        assert_eq!(pick_latest(Vec::new()), None);
    }
}
