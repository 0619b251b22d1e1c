//! Commit-log parsing and issue reference extraction.
//!
//! A commit record is a commit-id line followed by free-text body lines,
//! terminated by a literal `---` sentinel line (the `git log` pretty
//! format used by [`crate::git::commit_log`]).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ChangelogError, Result};
use crate::model::RepoRef;
use crate::registry::IssueRegistry;

/// Bounded-match policy: at most this many references are consumed from
/// a single commit body.
pub const MAX_REFS_PER_COMMIT: usize = 50;

/// Issue reference pattern: optional lowercase-alphanumeric `owner/name`
/// followed by `#` and digits.
static ISSUE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:([a-z0-9]+)/([a-z0-9]+))?#([0-9]+)").expect("issue reference pattern is valid")
});

/// One parsed commit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub body: String,
}

/// Split raw `git log` output into commit records.
///
/// Body lines are echoed as debug events for verbose mode.
#[must_use]
pub fn parse_commits(log: &str) -> Vec<Commit> {
    let mut commits = Vec::new();
    let mut lines = log.lines();

    while let Some(id) = lines.next() {
        if id.is_empty() {
            continue;
        }
        tracing::debug!("commit {id}");
        let mut body = String::new();
        for line in lines.by_ref() {
            if line == "---" {
                break;
            }
            tracing::debug!("    {line}");
            if !body.is_empty() {
                body.push('\n');
            }
            body.push_str(line);
        }
        commits.push(Commit {
            id: id.to_string(),
            body,
        });
    }

    commits
}

/// Extract every issue reference from the given commits into the registry.
///
/// References without an explicit `owner/name` resolve to the default
/// repository. References naming a different repository are "external"
/// and are discarded entirely when `include_external` is false.
///
/// # Errors
///
/// Returns `InvalidIssueNumber` when a reference's numeric part does not
/// parse; the input is malformed and the run aborts.
pub fn extract_references(
    commits: &[Commit],
    default_repo: &RepoRef,
    include_external: bool,
    registry: &mut IssueRegistry,
) -> Result<()> {
    for commit in commits {
        for caps in ISSUE_REF.captures_iter(&commit.body).take(MAX_REFS_PER_COMMIT) {
            let (owner, name) = match (caps.get(1), caps.get(2)) {
                (Some(owner), Some(name)) => (owner.as_str(), name.as_str()),
                _ => (default_repo.owner.as_str(), default_repo.name.as_str()),
            };

            let external = owner != default_repo.owner || name != default_repo.name;
            if external && !include_external {
                tracing::debug!("ignoring external issue reference {}", &caps[0]);
                continue;
            }

            let digits = &caps[3];
            let number: u64 =
                digits
                    .parse()
                    .map_err(|_| ChangelogError::InvalidIssueNumber {
                        value: digits.to_string(),
                    })?;

            registry.issue(owner, name, number);
        }
    }

    Ok(())
}
