use serde::Serialize;

use crate::types::{ListFilter, PrState, RepoRef, ResolvedTarget};

// ---------------------------------------------------------------------------
// GraphQL query strings
// ---------------------------------------------------------------------------

const PULL_REQUEST_STATUS_QUERY: &str = r"
query PullRequestStatus($viewerQuery: String!, $reviewerQuery: String!, $mentionQuery: String!, $perPage: Int!) {
  viewerCreated: search(query: $viewerQuery, type: ISSUE, first: $perPage) {
    nodes {
      ... on PullRequest {
        number
        title
        url
        state
        headRefName
        isCrossRepository
        headRepositoryOwner { login }
        labels(first: 20) { nodes { name } }
      }
    }
  }
  reviewRequested: search(query: $reviewerQuery, type: ISSUE, first: $perPage) {
    nodes {
      ... on PullRequest {
        number
        title
        url
        state
        headRefName
        isCrossRepository
        headRepositoryOwner { login }
        labels(first: 20) { nodes { name } }
      }
    }
  }
  mentioned: search(query: $mentionQuery, type: ISSUE, first: $perPage) {
    nodes {
      ... on PullRequest {
        number
        title
        url
        state
        headRefName
        isCrossRepository
        headRepositoryOwner { login }
        labels(first: 20) { nodes { name } }
      }
    }
  }
}
";

const PULL_REQUEST_LIST_QUERY: &str = r"
query PullRequestList($owner: String!, $repo: String!, $limit: Int!, $state: [PullRequestState!], $labels: [String!]) {
  repository(owner: $owner, name: $repo) {
    pullRequests(states: $state, labels: $labels, first: $limit, orderBy: { field: CREATED_AT, direction: DESC }) {
      nodes {
        number
        title
        url
        state
        headRefName
        isCrossRepository
        headRepositoryOwner { login }
        labels(first: 20) { nodes { name } }
      }
    }
  }
}
";

const PULL_REQUEST_BY_NUMBER_QUERY: &str = r"
query PullRequestByNumber($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $number) {
      number
      title
      url
      state
      headRefName
      isCrossRepository
      headRepositoryOwner { login }
      labels(first: 20) { nodes { name } }
    }
  }
}
";

const PULL_REQUEST_FOR_BRANCH_QUERY: &str = r"
query PullRequestForBranch($owner: String!, $repo: String!, $headRefName: String!) {
  repository(owner: $owner, name: $repo) {
    pullRequests(headRefName: $headRefName, first: 30, orderBy: { field: CREATED_AT, direction: DESC }) {
      nodes {
        number
        title
        url
        state
        headRefName
        isCrossRepository
        headRepositoryOwner { login }
        labels(first: 20) { nodes { name } }
      }
    }
  }
}
";

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// Which response shape a payload expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Status,
    List,
    ByNumber,
    ForBranch,
}

/// A serializable `{ query, variables }` body handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPayload {
    pub query: &'static str,
    pub variables: Variables,
    #[serde(skip)]
    pub kind: QueryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Variables {
    Status(StatusVariables),
    List(ListVariables),
    Lookup(LookupVariables),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusVariables {
    pub viewer_query: String,
    pub reviewer_query: String,
    pub mention_query: String,
    pub per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListVariables {
    pub owner: String,
    pub repo: String,
    pub limit: u32,
    /// Always a sequence, even for a single state.
    pub state: Vec<PrState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupVariables {
    pub owner: String,
    pub repo: String,
    #[serde(flatten)]
    pub key: LookupKey,
}

/// Exactly one of `number` / `headRefName` is ever transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LookupKey {
    #[serde(rename = "number")]
    Number(u64),
    #[serde(rename = "headRefName")]
    HeadRefName(String),
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Search qualifier prefix shared by the three status buckets.
fn status_scope(repo: &RepoRef) -> String {
    format!("repo:{} state:open is:pr", repo.full_name())
}

/// Build the status query for `viewer` (a login, or `@me`).
pub fn status_query(repo: &RepoRef, viewer: &str, per_page: u32) -> QueryPayload {
    let scope = status_scope(repo);
    QueryPayload {
        query: PULL_REQUEST_STATUS_QUERY,
        variables: Variables::Status(StatusVariables {
            viewer_query: format!("{scope} author:{viewer}"),
            reviewer_query: format!("{scope} review-requested:{viewer}"),
            mention_query: format!("{scope} mentions:{viewer}"),
            per_page,
        }),
        kind: QueryKind::Status,
    }
}

pub fn list_query(repo: &RepoRef, filter: &ListFilter, limit: u32) -> QueryPayload {
    QueryPayload {
        query: PULL_REQUEST_LIST_QUERY,
        variables: Variables::List(ListVariables {
            owner: repo.owner.clone(),
            repo: repo.name.clone(),
            limit,
            state: filter.states(),
            labels: filter.labels.clone(),
        }),
        kind: QueryKind::List,
    }
}

/// Build a single-PR lookup. For a fork label (`owner:branch`) only the
/// branch is sent; the owner is matched when decoding.
pub fn lookup_query(repo: &RepoRef, target: &ResolvedTarget) -> QueryPayload {
    let (query, key, kind) = match target {
        ResolvedTarget::Number(number) => (
            PULL_REQUEST_BY_NUMBER_QUERY,
            LookupKey::Number(*number),
            QueryKind::ByNumber,
        ),
        ResolvedTarget::HeadRef { branch, .. } => (
            PULL_REQUEST_FOR_BRANCH_QUERY,
            LookupKey::HeadRefName(branch.clone()),
            QueryKind::ForBranch,
        ),
    };
    QueryPayload {
        query,
        variables: Variables::Lookup(LookupVariables {
            owner: repo.owner.clone(),
            repo: repo.name.clone(),
            key,
        }),
        kind,
    }
}
