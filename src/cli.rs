use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::types::{ListFilter, RepoRef, StateFilter};

#[derive(Debug, Parser)]
#[command(
    name = "gh-pr",
    version,
    about = "Work with GitHub pull requests from a local checkout"
)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Select another repository using the OWNER/REPO format.
    #[arg(short = 'R', long, global = true, value_parser = parse_repo)]
    pub repo: Option<RepoRef>,

    /// Enable debug logging to debug.log.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Work with pull requests.
    #[command(subcommand)]
    Pr(PrCommand),
}

#[derive(Debug, Subcommand)]
pub enum PrCommand {
    /// Show status of relevant pull requests.
    Status,
    /// List pull requests in the repository.
    List {
        /// Filter by state.
        #[arg(short, long, value_enum)]
        state: Option<StateFilter>,

        /// Filter by label (repeatable).
        #[arg(short, long = "label")]
        labels: Vec<String>,

        /// Maximum number of pull requests to fetch (1 to 100).
        #[arg(short = 'L', long, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: Option<u32>,
    },
    /// Open a pull request in the browser.
    View {
        /// PR number; defaults to the PR for the current branch.
        number: Option<u64>,
    },
}

impl PrCommand {
    /// Build the list filter, using `default_state` when `--state` was omitted.
    pub fn list_filter(
        state: Option<StateFilter>,
        labels: &[String],
        default_state: StateFilter,
    ) -> ListFilter {
        ListFilter::new(state.unwrap_or(default_state), labels.to_vec())
    }
}

fn parse_repo(s: &str) -> Result<RepoRef, String> {
    RepoRef::from_full_name(s).ok_or_else(|| format!("expected OWNER/REPO, got {s:?}"))
}
