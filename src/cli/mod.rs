//! Command-line interface for `issuelog`.
//!
//! Parses flags into a plain [`Config`], resolves the current repository
//! from its git remote, captures the commit log, and hands everything to
//! the pipeline.

use clap::Parser;

use crate::error::Result;
use crate::fetch::GithubClient;
use crate::pipeline::{self, Config};
use crate::{git, logging};

/// `issuelog` (ilog) - categorized changelog generator.
#[derive(Parser, Debug)]
#[command(name = "ilog")]
#[command(
    author,
    version,
    about = "List tracker issues mentioned between two commits/branches/tags",
    long_about = None
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Ref range passed to `git log`. Ex: master..issue-32, issue-323..HEAD^^
    pub compare: Option<String>,

    /// Echo each scanned commit id and body line to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// API token granting access to the referenced issues; required for
    /// private repositories
    #[arg(
        short,
        long,
        env = "ILOG_TOKEN",
        default_value = "",
        hide_env_values = true
    )]
    pub token: String,

    /// Ordered category specs, `label` or `label:TEXT`. `!` matches any
    /// issue no other category claims
    #[arg(
        short,
        long,
        value_name = "LABEL[:TEXT]",
        default_values = ["enhancement:Enhancements", "bug:Bugs", "!:Other"]
    )]
    pub labels: Vec<String>,

    /// Include only closed issues
    #[arg(
        short = 'c',
        long,
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        action = clap::ArgAction::Set
    )]
    pub only_closed: bool,

    /// Include issues from outside of this repository
    #[arg(
        short = 'e',
        long,
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        action = clap::ArgAction::Set
    )]
    pub external_issues: bool,

    /// Display the per-category summary table
    #[arg(
        short,
        long,
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        action = clap::ArgAction::Set
    )]
    pub summary: bool,
}

impl Cli {
    /// Reduce parsed flags to the pipeline configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            labels: self.labels.clone(),
            only_closed: self.only_closed,
            external_issues: self.external_issues,
            summary: self.summary,
        }
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the repository cannot be resolved, the log cannot
/// be captured, or any pipeline stage fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let dir = std::env::current_dir()?;
    let default_repo = git::repository_from_remote(&dir)?;
    let log_text = git::commit_log(&dir, cli.compare.as_deref())?;
    let fetcher = GithubClient::new(&cli.token)?;

    let mut stdout = std::io::stdout().lock();
    pipeline::run(&cli.config(), &default_repo, &log_text, &fetcher, &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_table() {
        let cli = Cli::parse_from(["ilog"]);
        assert!(cli.compare.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.token, "");
        assert_eq!(
            cli.labels,
            vec!["enhancement:Enhancements", "bug:Bugs", "!:Other"]
        );
        assert!(cli.only_closed);
        assert!(cli.external_issues);
        assert!(cli.summary);
    }

    #[test]
    fn test_boolean_flags_accept_explicit_false() {
        let cli = Cli::parse_from(["ilog", "--only-closed=false", "--summary=false"]);
        assert!(!cli.only_closed);
        assert!(!cli.summary);
        assert!(cli.external_issues);
    }

    #[test]
    fn test_bare_boolean_flag_means_true() {
        let cli = Cli::parse_from(["ilog", "--external-issues"]);
        assert!(cli.external_issues);
    }

    #[test]
    fn test_labels_override_replaces_defaults() {
        let cli = Cli::parse_from(["ilog", "-l", "bug:Bugs", "-l", "!:Other"]);
        assert_eq!(cli.labels, vec!["bug:Bugs", "!:Other"]);
    }

    #[test]
    fn test_compare_positional() {
        let cli = Cli::parse_from(["ilog", "v1.0.0..v1.1.0"]);
        assert_eq!(cli.compare.as_deref(), Some("v1.0.0..v1.1.0"));
    }

    #[test]
    fn test_config_reduction() {
        let cli = Cli::parse_from(["ilog", "--only-closed=false", "-l", "bug"]);
        let config = cli.config();
        assert!(!config.only_closed);
        assert_eq!(config.labels, vec!["bug"]);
        assert!(config.summary);
    }
}
