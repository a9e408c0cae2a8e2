//! Decoding of GraphQL response bodies into domain records.
//!
//! `{ "data": {} }` is a legitimate empty answer for status, list and branch
//! lookups. A body that is not a GraphQL envelope, or a number lookup without
//! `repository.pullRequest`, is a decode error.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::types::{PrState, PullRequest, StatusBuckets};

// ---------------------------------------------------------------------------
// Response types (mirror the GraphQL response shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
struct GraphQLResponse<D> {
    data: Option<D>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Connection<T> {
    #[serde(default)]
    nodes: Vec<Option<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
struct StatusData {
    #[serde(rename = "viewerCreated")]
    viewer_created: Option<Connection<RawPullRequest>>,
    #[serde(rename = "reviewRequested")]
    review_requested: Option<Connection<RawPullRequest>>,
    mentioned: Option<Connection<RawPullRequest>>,
}

#[derive(Debug, Deserialize)]
struct RepositoryData<R> {
    repository: Option<R>,
}

#[derive(Debug, Deserialize)]
struct PullRequestsRepo {
    #[serde(rename = "pullRequests")]
    pull_requests: Option<Connection<RawPullRequest>>,
}

#[derive(Debug, Deserialize)]
struct PullRequestRepo {
    #[serde(rename = "pullRequest")]
    pull_request: Option<RawPullRequest>,
}

/// Raw PR as returned by the GraphQL API.
///
/// Every field is optional: search results may contain non-PR nodes (`{}`)
/// and a lookup may select only a subset of fields.
#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: Option<u64>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    state: Option<PrState>,
    #[serde(rename = "headRefName", default)]
    head_ref_name: String,
    #[serde(rename = "isCrossRepository", default)]
    is_cross_repository: bool,
    #[serde(rename = "headRepositoryOwner")]
    head_repository_owner: Option<RawActorLogin>,
    labels: Option<Connection<RawLabel>>,
}

#[derive(Debug, Deserialize)]
struct RawActorLogin {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    name: String,
}

// ---------------------------------------------------------------------------
// Conversion: Raw → Domain
// ---------------------------------------------------------------------------

impl RawPullRequest {
    /// Convert into the domain type; `None` for nodes that carry no number.
    fn into_domain(self) -> Option<PullRequest> {
        let number = self.number?;
        Some(self.into_domain_with_number(number))
    }

    fn into_domain_with_number(self, number: u64) -> PullRequest {
        let head_label = match self.head_repository_owner {
            Some(owner) if self.is_cross_repository => {
                format!("{}:{}", owner.login, self.head_ref_name)
            }
            _ => self.head_ref_name,
        };

        let labels = self
            .labels
            .map(|c| c.nodes.into_iter().flatten().map(|l| l.name).collect())
            .unwrap_or_default();

        PullRequest {
            number,
            title: self.title,
            url: self.url,
            head_label,
            state: self.state.unwrap_or(PrState::Unknown),
            labels,
        }
    }
}

fn collect(connection: Option<Connection<RawPullRequest>>) -> Vec<PullRequest> {
    connection
        .unwrap_or_default()
        .nodes
        .into_iter()
        .flatten()
        .filter_map(RawPullRequest::into_domain)
        .collect()
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

fn parse_envelope<D: DeserializeOwned>(body: &str) -> Result<D> {
    let response: GraphQLResponse<D> =
        serde_json::from_str(body).map_err(|e| Error::Decode(e.to_string()))?;

    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        return Err(Error::Api(messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| Error::Decode("response missing data field".to_owned()))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn decode_status(body: &str) -> Result<StatusBuckets> {
    let data: StatusData = parse_envelope(body)?;
    Ok(StatusBuckets {
        created: collect(data.viewer_created),
        review_requested: collect(data.review_requested),
        mentioned: collect(data.mentioned),
    })
}

/// Decode a list response, keeping server order.
pub fn decode_list(body: &str) -> Result<Vec<PullRequest>> {
    let data: RepositoryData<PullRequestsRepo> = parse_envelope(body)?;
    Ok(collect(data.repository.and_then(|r| r.pull_requests)))
}

/// Decode a lookup by number. A response that only selected `url` still
/// decodes; the number is filled in from the request.
pub fn decode_by_number(body: &str, number: u64) -> Result<PullRequest> {
    let data: RepositoryData<PullRequestRepo> = parse_envelope(body)?;
    let repository = data
        .repository
        .ok_or_else(|| Error::Decode("response missing repository".to_owned()))?;
    let raw = repository.pull_request.ok_or_else(|| {
        Error::Decode(format!("response missing pullRequest for #{number}"))
    })?;
    let requested = raw.number.unwrap_or(number);
    Ok(raw.into_domain_with_number(requested))
}

/// Decode a head-ref lookup and pick the PR whose head label is `label`.
///
/// An OPEN match wins over closed or merged ones; `None` when nothing matches.
pub fn decode_for_branch(body: &str, label: &str) -> Result<Option<PullRequest>> {
    let data: RepositoryData<PullRequestsRepo> = parse_envelope(body)?;
    let mut candidates: Vec<PullRequest> = collect(data.repository.and_then(|r| r.pull_requests))
        .into_iter()
        .filter(|pr| labels_match(&pr.head_label, label))
        .collect();

    if candidates.is_empty() {
        return Ok(None);
    }
    let pick = candidates
        .iter()
        .position(|pr| pr.state == PrState::Open)
        .unwrap_or(0);
    Ok(Some(candidates.swap_remove(pick)))
}

/// Branch names compare exactly, owners case-insensitively.
fn labels_match(a: &str, b: &str) -> bool {
    match (a.split_once(':'), b.split_once(':')) {
        (Some((owner_a, branch_a)), Some((owner_b, branch_b))) => {
            owner_a.eq_ignore_ascii_case(owner_b) && branch_a == branch_b
        }
        (None, None) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_BODY: &str = r#"
    { "data": { "repository": { "pullRequests": { "nodes": [
        { "number": 32, "title": "New feature", "url": "https://github.com/OWNER/REPO/pull/32",
          "state": "OPEN", "headRefName": "feature", "isCrossRepository": false,
          "headRepositoryOwner": { "login": "OWNER" },
          "labels": { "nodes": [ { "name": "enhancement" }, { "name": "ui" } ] } },
        { "number": 29, "title": "Fixed bad bug", "url": "https://github.com/OWNER/REPO/pull/29",
          "state": "OPEN", "headRefName": "bug-fix", "isCrossRepository": true,
          "headRepositoryOwner": { "login": "hubot" } }
    ] } } } }
    "#;

    #[test]
    fn empty_data_is_an_empty_list() {
        assert!(decode_list(r#"{ "data": {} }"#).unwrap().is_empty());
    }

    #[test]
    fn empty_data_is_empty_status() {
        assert_eq!(decode_status(r#"{ "data": {} }"#).unwrap(), StatusBuckets::default());
    }

    #[test]
    fn empty_data_is_no_branch_match() {
        assert_eq!(decode_for_branch(r#"{ "data": {} }"#, "feature").unwrap(), None);
    }

    #[test]
    fn empty_data_is_a_decode_error_for_number_lookup() {
        let err = decode_by_number(r#"{ "data": {} }"#, 23).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn missing_data_is_a_decode_error() {
        assert!(matches!(decode_list("{}").unwrap_err(), Error::Decode(_)));
        assert!(matches!(decode_list("<html>").unwrap_err(), Error::Decode(_)));
    }

    #[test]
    fn graphql_errors_surface_as_api_error() {
        let body = r#"{ "data": null, "errors": [ { "message": "Could not resolve to a Repository" } ] }"#;
        let err = decode_list(body).unwrap_err();
        assert!(matches!(err, Error::Api(ref m) if m == "Could not resolve to a Repository"));
    }

    #[test]
    fn list_keeps_order_labels_and_fork_labels() {
        let prs = decode_list(LIST_BODY).unwrap();
        assert_eq!(prs.len(), 2);
        assert_eq!(prs[0].number, 32);
        assert_eq!(prs[0].head_label, "feature");
        assert_eq!(prs[0].labels, vec!["enhancement", "ui"]);
        assert_eq!(prs[1].number, 29);
        assert_eq!(prs[1].head_label, "hubot:bug-fix");
        assert!(prs[1].labels.is_empty());
    }

    #[test]
    fn number_lookup_tolerates_url_only() {
        let body = r#"{ "data": { "repository": { "pullRequest": {
            "url": "https://github.com/OWNER/REPO/pull/23"
        } } } }"#;
        let pr = decode_by_number(body, 23).unwrap();
        assert_eq!(pr.number, 23);
        assert_eq!(pr.url, "https://github.com/OWNER/REPO/pull/23");
        assert_eq!(pr.state, PrState::Unknown);
    }

    #[test]
    fn number_lookup_without_pull_request_is_decode_error() {
        let body = r#"{ "data": { "repository": { "pullRequest": null } } }"#;
        assert!(matches!(
            decode_by_number(body, 99).unwrap_err(),
            Error::Decode(_)
        ));
    }

    #[test]
    fn branch_lookup_prefers_open_match() {
        let body = r#"{ "data": { "repository": { "pullRequests": { "nodes": [
            { "number": 3, "url": "u3", "state": "MERGED", "headRefName": "feature" },
            { "number": 5, "url": "u5", "state": "OPEN", "headRefName": "feature",
              "isCrossRepository": true, "headRepositoryOwner": { "login": "hubot" } },
            { "number": 7, "url": "u7", "state": "OPEN", "headRefName": "feature" }
        ] } } } }"#;
        let pr = decode_for_branch(body, "feature").unwrap().unwrap();
        assert_eq!(pr.number, 7);
        let pr = decode_for_branch(body, "HUBOT:feature").unwrap().unwrap();
        assert_eq!(pr.number, 5);
    }

    #[test]
    fn branch_lookup_returns_closed_match_when_no_open_one() {
        let body = r#"{ "data": { "repository": { "pullRequests": { "nodes": [
            { "number": 3, "url": "u3", "state": "CLOSED", "headRefName": "feature" }
        ] } } } }"#;
        let pr = decode_for_branch(body, "feature").unwrap().unwrap();
        assert_eq!(pr.state, PrState::Closed);
    }

    #[test]
    fn search_nodes_without_number_are_skipped() {
        let body = r#"{ "data": { "viewerCreated": { "nodes": [
            {}, null, { "number": 8, "url": "u8", "state": "OPEN", "headRefName": "strawberries" }
        ] } } }"#;
        let buckets = decode_status(body).unwrap();
        assert_eq!(buckets.created.len(), 1);
        assert_eq!(buckets.created[0].head_label, "strawberries");
        assert!(buckets.review_requested.is_empty());
        assert!(buckets.mentioned.is_empty());
    }
}
