//! Selectors
//!
//! Resolve identifiers the caller left out by querying GitHub.

pub mod branch;
pub mod pull_request;

pub use branch::select_latest_branch;
pub use pull_request::select_latest_open_pr;
