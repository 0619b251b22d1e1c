//! `issuelog` - categorized changelog generator library.
//!
//! Scans git commit messages between two refs for issue mentions
//! (`#123`, `owner/repo#123`), fetches each referenced issue from the
//! GitHub API, groups issues by label into named sections, and prints a
//! Markdown-like report plus a numeric summary.
//!
//! # Architecture
//!
//! The pipeline is a single linear pass: extract, fetch, bucket, render.
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (`RepoRef`, `IssueRef`, `IssueDetail`)
//! - [`git`] - Git subprocess collaborators (remote URL, commit log)
//! - [`extract`] - Issue reference extraction from commit bodies
//! - [`registry`] - Deduplicated issue/repository registries
//! - [`fetch`] - Sequential issue metadata retrieval
//! - [`categorize`] - Label-to-section bucketing
//! - [`report`] - Section and summary rendering
//! - [`pipeline`] - Configuration and stage wiring
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod categorize;
pub mod cli;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod git;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod registry;
pub mod report;

pub use error::{ChangelogError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if any pipeline stage fails; every error is fatal
/// and nothing is rendered.
pub fn run() -> Result<()> {
    cli::run()
}
