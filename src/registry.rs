//! Deduplicated issue and repository registries.
//!
//! The registry is the single source of truth for issue identities
//! within a run: re-mentioning the same `owner/name#number` key does not
//! create a duplicate entry or a duplicate fetch.

use std::collections::{HashMap, HashSet};

use crate::model::{IssueRef, RepoRef};

/// Registry of issue references and interned repository identities.
///
/// Issue iteration order is insertion order, which keeps fetch progress
/// deterministic for a given commit log.
#[derive(Debug, Default)]
pub struct IssueRegistry {
    repositories: HashMap<String, RepoRef>,
    seen: HashSet<String>,
    issues: Vec<IssueRef>,
}

impl IssueRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a repository identity, creating it on first use.
    pub fn repository(&mut self, owner: &str, name: &str) -> RepoRef {
        let key = format!("{owner}/{name}");
        self.repositories
            .entry(key)
            .or_insert_with(|| RepoRef::new(owner, name))
            .clone()
    }

    /// Register an issue reference. Re-registering an existing key is a
    /// no-op lookup.
    pub fn issue(&mut self, owner: &str, name: &str, number: u64) {
        let key = format!("{owner}/{name}#{number}");
        if !self.seen.insert(key) {
            return;
        }
        let repository = self.repository(owner, name);
        self.issues.push(IssueRef { repository, number });
    }

    /// Registered issue references, in insertion order.
    #[must_use]
    pub fn issues(&self) -> &[IssueRef] {
        &self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of distinct repositories referenced so far.
    #[must_use]
    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }
}
