//! Error types for `issuelog`.
//!
//! Every variant is fatal: the pipeline aborts on the first error and
//! renders nothing. There is no partial-output mode.

use thiserror::Error;

/// Primary error type for changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    // === Configuration Errors ===
    /// The origin remote URL does not name a GitHub repository.
    #[error("{url}: is not a valid repository URL")]
    InvalidRemoteUrl { url: String },

    /// An issue reference carried a number that does not parse.
    #[error("Invalid issue number: {value}")]
    InvalidIssueNumber { value: String },

    // === External Command Errors ===
    /// A git subprocess failed to spawn or exited non-zero.
    #[error("git {args} failed: {detail}")]
    GitCommand { args: String, detail: String },

    // === Fetch Errors ===
    /// The issue tracker rejected a metadata request (not-found, auth,
    /// rate-limit).
    #[error("Fetching {issue} failed: {status}")]
    IssueFetch { issue: String, status: String },

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // === I/O Errors ===
    /// File system or stream I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using `ChangelogError`.
pub type Result<T> = std::result::Result<T, ChangelogError>;
