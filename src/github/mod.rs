//! GitHub REST API access

pub mod client;
pub mod types;

pub use client::{http_client, ApiCall, GitHubClient};
pub use types::MergeMethod;
