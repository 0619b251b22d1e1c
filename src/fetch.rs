//! Issue metadata retrieval from the GitHub REST API.
//!
//! Fetches are sequential and blocking; any failure aborts the run. The
//! [`IssueFetcher`] trait is the seam that lets the pipeline run against
//! an in-memory fake in tests.

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use crate::error::{ChangelogError, Result};
use crate::model::{IssueDetail, IssueRef};

const API_ROOT: &str = "https://api.github.com";

/// Fetches issue metadata by repository coordinates and number.
pub trait IssueFetcher {
    /// Fetch a single issue. Any failure is fatal for the run.
    ///
    /// # Errors
    ///
    /// Returns a fetch or transport error when the tracker call fails.
    fn fetch_issue(&self, owner: &str, name: &str, number: u64) -> Result<IssueDetail>;
}

/// GitHub REST client. Sends a bearer token when one is configured.
pub struct GithubClient {
    http: Client,
    token: Option<String>,
    api_root: String,
}

impl GithubClient {
    /// Build a client. `token` may be empty for public repositories.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(token: &str) -> Result<Self> {
        // GitHub rejects requests without a User-Agent.
        let http = Client::builder()
            .user_agent(concat!("ilog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            token: (!token.is_empty()).then(|| token.to_string()),
            api_root: API_ROOT.to_string(),
        })
    }

    fn issue_url(&self, owner: &str, name: &str, number: u64) -> String {
        format!("{}/repos/{owner}/{name}/issues/{number}", self.api_root)
    }
}

/// Wire representation of a GitHub issue, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
    title: String,
    closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    labels: Vec<LabelResponse>,
}

#[derive(Debug, Deserialize)]
struct LabelResponse {
    name: String,
}

impl From<IssueResponse> for IssueDetail {
    fn from(response: IssueResponse) -> Self {
        Self {
            number: response.number,
            title: response.title,
            closed_at: response.closed_at,
            labels: response.labels.into_iter().map(|label| label.name).collect(),
        }
    }
}

impl IssueFetcher for GithubClient {
    fn fetch_issue(&self, owner: &str, name: &str, number: u64) -> Result<IssueDetail> {
        let mut request = self
            .http
            .get(self.issue_url(owner, name, number))
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(ChangelogError::IssueFetch {
                issue: format!("{owner}/{name}#{number}"),
                status: response.status().to_string(),
            });
        }

        let body: IssueResponse = response.json()?;
        Ok(body.into())
    }
}

/// Fetch every registered issue sequentially, drawing progress to stderr.
///
/// With `only_closed` set, issues lacking a closing timestamp are
/// discarded here: not categorized, not rendered, not counted.
///
/// # Errors
///
/// Propagates the first fetch failure; there is no retry.
pub fn fetch_all<F: IssueFetcher>(
    refs: &[IssueRef],
    fetcher: &F,
    only_closed: bool,
) -> Result<Vec<IssueDetail>> {
    let bar = ProgressBar::new(refs.len() as u64);
    let mut details = Vec::with_capacity(refs.len());

    for issue_ref in refs {
        bar.inc(1);
        let detail = fetcher.fetch_issue(
            &issue_ref.repository.owner,
            &issue_ref.repository.name,
            issue_ref.number,
        )?;

        if detail.closed_at.is_none() && only_closed {
            tracing::debug!("skipping open issue {}", issue_ref.key());
            continue;
        }
        details.push(detail);
    }

    bar.finish_and_clear();
    Ok(details)
}
