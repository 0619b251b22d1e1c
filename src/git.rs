//! Git collaborators: remote URL resolution and commit log capture.
//!
//! Both operations shell out to the `git` binary; a spawn failure or a
//! non-zero exit is a fatal `GitCommand` error with the subprocess
//! stderr captured into the message.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Command;

use crate::error::{ChangelogError, Result};
use crate::model::RepoRef;

/// Pretty format producing one record per commit: commit-id line, full
/// message body, then a literal `---` sentinel line.
pub const LOG_FORMAT: &str = "--pretty=format:%H%n%B%n---";

/// Accepted remote URL forms: SSH-style `git@github.com:owner/name.git`
/// and HTTPS-style `https://github.com/owner/name`, with
/// lowercase-alphanumeric owner and name.
static REMOTE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:git@github\.com:([a-z0-9]+)/([a-z0-9]+)\.git|https://github\.com/([a-z0-9]+)/([a-z0-9]+))$",
    )
    .expect("remote URL pattern is valid")
});

/// Resolve the current repository's `owner/name` from its `origin`
/// remote URL.
///
/// # Errors
///
/// Returns `GitCommand` if git fails, or `InvalidRemoteUrl` if the URL
/// matches neither accepted form.
pub fn repository_from_remote(dir: &Path) -> Result<RepoRef> {
    let url = run_git(dir, &["remote", "get-url", "origin"])?;
    parse_remote_url(url.trim())
}

/// Parse an SSH-style or HTTPS-style GitHub remote URL into a `RepoRef`.
///
/// # Errors
///
/// Returns `InvalidRemoteUrl` when the URL matches neither form.
pub fn parse_remote_url(url: &str) -> Result<RepoRef> {
    let caps = REMOTE_URL
        .captures(url)
        .ok_or_else(|| ChangelogError::InvalidRemoteUrl {
            url: url.to_string(),
        })?;

    if let (Some(owner), Some(name)) = (caps.get(1), caps.get(2)) {
        return Ok(RepoRef::new(owner.as_str(), name.as_str()));
    }
    if let (Some(owner), Some(name)) = (caps.get(3), caps.get(4)) {
        return Ok(RepoRef::new(owner.as_str(), name.as_str()));
    }
    Err(ChangelogError::InvalidRemoteUrl {
        url: url.to_string(),
    })
}

/// Capture the commit log, optionally restricted to a ref range such as
/// `master..feature`.
///
/// # Errors
///
/// Returns `GitCommand` if git fails (for instance on an unknown ref).
pub fn commit_log(dir: &Path, compare: Option<&str>) -> Result<String> {
    let mut args = vec!["log", LOG_FORMAT];
    if let Some(range) = compare {
        args.push(range);
    }
    run_git(dir, &args)
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| ChangelogError::GitCommand {
            args: args.join(" "),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChangelogError::GitCommand {
            args: args.join(" "),
            detail: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
