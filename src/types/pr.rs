use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PR-specific enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrState {
    Open,
    Closed,
    Merged,
    /// The server omitted the field (e.g. a lookup that only asked for `url`).
    #[serde(other)]
    Unknown,
}

impl PrState {
    /// GraphQL enum value as transmitted in query variables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Merged => "MERGED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// State requested by `pr list --state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    Merged,
    All,
}

impl StateFilter {
    /// Expand to the state sequence sent to the server.
    ///
    /// `All` always expands to `[OPEN, CLOSED, MERGED]` in that order.
    pub fn expand(self) -> Vec<PrState> {
        match self {
            Self::Open => vec![PrState::Open],
            Self::Closed => vec![PrState::Closed],
            Self::Merged => vec![PrState::Merged],
            Self::All => vec![PrState::Open, PrState::Closed, PrState::Merged],
        }
    }
}

// ---------------------------------------------------------------------------
// PR domain types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    /// `owner:branch` when the head lives in another repository, else `branch`.
    pub head_label: String,
    pub state: PrState,
    /// Label names in server order.
    pub labels: Vec<String>,
}

/// Pull requests relevant to the viewer, grouped by the server.
///
/// The partitions are opaque: they are rendered as received and never
/// re-derived locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBuckets {
    pub created: Vec<PullRequest>,
    pub review_requested: Vec<PullRequest>,
    pub mentioned: Vec<PullRequest>,
}

impl StatusBuckets {
    /// Buckets in render order, paired with their section heading.
    pub fn sections(&self) -> [(&'static str, &[PullRequest]); 3] {
        [
            ("Created by you", self.created.as_slice()),
            ("Requesting a code review from you", self.review_requested.as_slice()),
            ("Mentioning you", self.mentioned.as_slice()),
        ]
    }
}

/// Filter for `pr list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub state: StateFilter,
    /// Caller order is kept and duplicates are not removed.
    pub labels: Vec<String>,
}

impl ListFilter {
    pub fn new(state: StateFilter, labels: Vec<String>) -> Self {
        Self { state, labels }
    }

    pub fn states(&self) -> Vec<PrState> {
        self.state.expand()
    }
}

/// What a single-PR lookup is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// An explicit PR number; any state is acceptable.
    Number(u64),
    /// A head-ref label derived from the current branch, with the branch
    /// part that is sent as `headRefName`.
    HeadRef { label: String, branch: String },
}

impl ResolvedTarget {
    /// `label` is `branch` or `owner:branch`.
    pub fn head_ref(label: impl Into<String>) -> Self {
        let label = label.into();
        let branch = label
            .split_once(':')
            .map_or(label.as_str(), |(_, branch)| branch)
            .to_owned();
        Self::HeadRef { label, branch }
    }
}
