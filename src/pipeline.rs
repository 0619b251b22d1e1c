//! The linear changelog pipeline.
//!
//! `Configure → Extract → Fetch(sequential) → Bucket → Sort+Render`, a
//! single pass with no backtracking. All collaborators come in as
//! arguments (an explicit context, not process-wide state), which is
//! what lets tests drive the whole pipeline with a fake fetcher and an
//! in-memory sink.

use std::io::Write;

use crate::categorize::CategorySet;
use crate::error::Result;
use crate::extract;
use crate::fetch::{self, IssueFetcher};
use crate::model::RepoRef;
use crate::registry::IssueRegistry;
use crate::report;

/// Pipeline configuration, reduced from CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ordered category specs, `label` or `label:text`.
    pub labels: Vec<String>,
    /// Drop issues that are not yet closed.
    pub only_closed: bool,
    /// Keep references to repositories other than the scanned one.
    pub external_issues: bool,
    /// Print the per-category count table and grand total.
    pub summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: vec![
                "enhancement:Enhancements".to_string(),
                "bug:Bugs".to_string(),
                "!:Other".to_string(),
            ],
            only_closed: true,
            external_issues: true,
            summary: true,
        }
    }
}

/// Run the full pipeline over an already-captured commit log.
///
/// # Errors
///
/// Propagates the first extraction, fetch, or rendering error; nothing
/// is written on failure paths before rendering starts.
pub fn run<F: IssueFetcher, W: Write>(
    config: &Config,
    default_repo: &RepoRef,
    log_text: &str,
    fetcher: &F,
    out: &mut W,
) -> Result<()> {
    let mut categories = CategorySet::parse(&config.labels);

    let commits = extract::parse_commits(log_text);
    let mut registry = IssueRegistry::new();
    extract::extract_references(&commits, default_repo, config.external_issues, &mut registry)?;

    eprintln!("Commits found: {}", commits.len());
    eprintln!("Fetching issues information...");

    let details = fetch::fetch_all(registry.issues(), fetcher, config.only_closed)?;
    for detail in details {
        categories.assign(detail);
    }

    report::render(out, categories.categories_mut(), config.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChangelogError;
    use crate::model::IssueDetail;
    use std::collections::HashMap;

    struct FakeFetcher {
        issues: HashMap<String, IssueDetail>,
    }

    impl FakeFetcher {
        fn new(entries: Vec<(&str, IssueDetail)>) -> Self {
            Self {
                issues: entries
                    .into_iter()
                    .map(|(key, detail)| (key.to_string(), detail))
                    .collect(),
            }
        }
    }

    impl IssueFetcher for FakeFetcher {
        fn fetch_issue(&self, owner: &str, name: &str, number: u64) -> Result<IssueDetail> {
            let key = format!("{owner}/{name}#{number}");
            self.issues
                .get(&key)
                .cloned()
                .ok_or(ChangelogError::IssueFetch {
                    issue: key,
                    status: "404 Not Found".to_string(),
                })
        }
    }

    fn detail(number: u64, title: &str, closed: bool, labels: &[&str]) -> IssueDetail {
        IssueDetail {
            number,
            title: title.to_string(),
            closed_at: closed.then(|| "2020-05-01T00:00:00Z".parse().unwrap()),
            labels: labels.iter().map(|l| (*l).to_string()).collect(),
        }
    }

    fn run_to_string(config: &Config, log_text: &str, fetcher: &FakeFetcher) -> String {
        let default_repo = RepoRef::new("owner1", "repo1");
        let mut out = Vec::new();
        run(config, &default_repo, log_text, fetcher, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_external_issues_disabled_drops_foreign_reference() {
        // Two commits: one in-repo reference, one external. With
        // external issues disabled only owner1/repo1#1 is fetched; the
        // fake would 404 on owner2/repo2#5, so success proves the drop.
        let log = "aaa\nfixes #1\n---\nbbb\nsee owner2/repo2#5\n---\n";
        let fetcher = FakeFetcher::new(vec![(
            "owner1/repo1#1",
            detail(1, "Fix the parser", true, &["bug"]),
        )]);
        let config = Config {
            external_issues: false,
            ..Config::default()
        };
        let output = run_to_string(&config, log, &fetcher);
        assert!(output.contains("* #1: Fix the parser;"));
        assert!(!output.contains("#5"));
        assert!(output.ends_with("Total: 1\n"));
    }

    #[test]
    fn test_full_categorized_report() {
        let log = "aaa\nfixes #1, #2 and #3\n---\n";
        let fetcher = FakeFetcher::new(vec![
            ("owner1/repo1#1", detail(1, "Add dark mode", true, &["enhancement"])),
            ("owner1/repo1#2", detail(2, "Crash on start", true, &["bug", "urgent"])),
            ("owner1/repo1#3", detail(3, "Update docs", true, &["documentation"])),
        ]);
        let output = run_to_string(&Config::default(), log, &fetcher);
        assert_eq!(
            output,
            "### Enhancements\n\
             * #1: Add dark mode;\n\
             \n\
             ### Bugs\n\
             * #2: Crash on start;\n\
             \n\
             ### Other\n\
             * #3: Update docs;\n\
             \n\
             \n\
             Enhancements: 1\n\
             Bugs: 1\n\
             Other: 1\n\
             Total: 3\n"
        );
    }

    #[test]
    fn test_open_issue_excluded_from_summary() {
        let log = "aaa\nfixes #1 and #2\n---\n";
        let fetcher = FakeFetcher::new(vec![
            ("owner1/repo1#1", detail(1, "Done", true, &["bug"])),
            ("owner1/repo1#2", detail(2, "Still open", false, &["bug"])),
        ]);
        let output = run_to_string(&Config::default(), log, &fetcher);
        assert!(output.contains("* #1: Done;"));
        assert!(!output.contains("Still open"));
        assert!(output.ends_with("Total: 1\n"));
    }

    #[test]
    fn test_unmatched_issue_without_wildcard_is_uncounted() {
        let log = "aaa\nfixes #1\n---\n";
        let fetcher = FakeFetcher::new(vec![(
            "owner1/repo1#1",
            detail(1, "Unlabeled", true, &[]),
        )]);
        let config = Config {
            labels: vec!["bug:Bugs".to_string()],
            ..Config::default()
        };
        let output = run_to_string(&config, log, &fetcher);
        assert!(!output.contains("Unlabeled"));
        assert!(output.ends_with("Total: 0\n"));
    }

    #[test]
    fn test_duplicate_mention_fetched_once() {
        // The fake 404s on anything unknown, so a double fetch of #1
        // cannot fail; assert the report lists it once.
        let log = "aaa\nfixes #1\n---\nbbb\nrevisits #1\n---\n";
        let fetcher = FakeFetcher::new(vec![(
            "owner1/repo1#1",
            detail(1, "Mentioned twice", true, &["bug"]),
        )]);
        let output = run_to_string(&Config::default(), log, &fetcher);
        assert_eq!(output.matches("Mentioned twice").count(), 1);
        assert!(output.ends_with("Total: 1\n"));
    }

    #[test]
    fn test_fetch_failure_aborts_run() {
        let log = "aaa\nfixes #404\n---\n";
        let fetcher = FakeFetcher::new(vec![]);
        let default_repo = RepoRef::new("owner1", "repo1");
        let mut out = Vec::new();
        let err = run(&Config::default(), &default_repo, log, &fetcher, &mut out).unwrap_err();
        assert!(matches!(err, ChangelogError::IssueFetch { .. }));
    }
}
