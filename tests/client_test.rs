use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gh_pr::Error;
use gh_pr::github::decode::decode_list;
use gh_pr::github::graphql::list_query;
use gh_pr::github::{GitHubClient, Transport};
use gh_pr::types::{ListFilter, RepoRef, StateFilter};

/// The mock server runs on its own runtime; the client blocks on a separate
/// current-thread runtime from the test thread.
fn start_server(rt: &tokio::runtime::Runtime, response: ResponseTemplate) -> MockServer {
    rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": {
                    "owner": "OWNER",
                    "repo": "REPO",
                    "state": ["OPEN", "CLOSED", "MERGED"],
                    "labels": ["one", "two"]
                }
            })))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        server
    })
}

fn filter() -> ListFilter {
    ListFilter::new(StateFilter::All, vec!["one".into(), "two".into()])
}

#[test]
fn graphql_request_round_trips_through_octocrab() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = start_server(
        &rt,
        ResponseTemplate::new(200).set_body_json(json!({ "data": {} })),
    );

    let client = GitHubClient::with_base_uri(&server.uri(), "test-token".into()).unwrap();
    let payload = list_query(&RepoRef::new("OWNER", "REPO"), &filter(), 30);
    let body = client.execute(&payload).unwrap();

    assert!(decode_list(&body).unwrap().is_empty());
}

#[test]
fn non_success_status_is_a_transport_error() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = start_server(
        &rt,
        ResponseTemplate::new(401)
            .set_body_json(json!({ "message": "Bad credentials", "documentation_url": null })),
    );

    let client = GitHubClient::with_base_uri(&server.uri(), "test-token".into()).unwrap();
    let payload = list_query(&RepoRef::new("OWNER", "REPO"), &filter(), 30);
    let err = client.execute(&payload).unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

#[test]
fn malformed_body_reaches_the_decoder() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = start_server(
        &rt,
        ResponseTemplate::new(200).set_body_string("<html>gateway says hi</html>"),
    );

    let client = GitHubClient::with_base_uri(&server.uri(), "test-token".into()).unwrap();
    let payload = list_query(&RepoRef::new("OWNER", "REPO"), &filter(), 30);
    let body = client.execute(&payload).unwrap();

    assert_eq!(body, "<html>gateway says hi</html>");
    let err = decode_list(&body).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {err:?}");
}
