//! Integration tests for the HTTP pipeline: bearer token injection, the
//! one-shot 401 refresh-and-retry, terminal auth failure, and the
//! single-flight refresh guard.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use portfolio_client::api::{ApiClient, ApiResponse, PortfolioApi};
use portfolio_client::auth::{LocalStore, TokenStore};
use portfolio_client::models::{About, Message, Project, Service, Tag};

async fn setup() -> (MockServer, ApiClient, TokenStore, tempfile::TempDir) {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = LocalStore::new(Some(dir.path().to_path_buf()));
    let tokens = TokenStore::new(store);
    let client =
        ApiClient::new(server.uri(), tokens.clone()).expect("Failed to build API client");
    (server, client, tokens, dir)
}

struct NoAuthorizationHeader;

impl Match for NoAuthorizationHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

fn project_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "A project",
        "featured": false,
        "order": 0
    })
}

#[tokio::test]
async fn request_carries_bearer_token_from_store() {
    let (server, client, tokens, _dir) = setup().await;
    tokens.set("tok1");

    Mock::given(method("GET"))
        .and(path("/services"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response: ApiResponse<Vec<Service>> = client
        .get("/services", &[])
        .await
        .expect("request should succeed");
    assert!(response.success);
}

#[tokio::test]
async fn request_without_token_has_no_auth_header() {
    let (server, client, _tokens, _dir) = setup().await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .and(NoAuthorizationHeader)
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response: ApiResponse<Vec<About>> = client
        .get("/about", &[])
        .await
        .expect("unauthenticated request should succeed");
    assert!(response.success);
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_once() {
    let (server, client, tokens, _dir) = setup().await;
    tokens.set("stale");

    // First dispatch is rejected once
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "error": "jwt expired"})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"success": true, "data": {"accessToken": "tok2"}}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    // The retry must carry the fresh token
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(header("authorization", "Bearer tok2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": [project_json(1, "Portfolio")]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let projects: Vec<Project> = client
        .get("/projects", &[])
        .await
        .expect("retried request should succeed")
        .into_result()
        .expect("envelope should carry data");

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "Portfolio");
    assert_eq!(tokens.get().as_deref(), Some("tok2"));
}

#[tokio::test]
async fn refresh_failure_tears_down_session_and_keeps_original_error() {
    let (server, client, tokens, _dir) = setup().await;
    tokens.set("stale");

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "error": "jwt expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "error": "refresh cookie missing"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .get::<Vec<About>>("/about", &[])
        .await
        .expect_err("request should fail");

    // The caller sees the original error, not the refresh failure
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "jwt expired");
    assert!(tokens.get().is_none());
    assert!(*client.session_expired().borrow());
}

#[tokio::test]
async fn second_401_after_retry_is_terminal() {
    let (server, client, tokens, _dir) = setup().await;
    tokens.set("stale");

    // Rejected both before and after the refresh
    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "error": "account disabled"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    // Refresh succeeds, but is attempted exactly once
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"success": true, "data": {"accessToken": "tok2"}}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .get::<Vec<Tag>>("/tags", &[])
        .await
        .expect_err("request should fail");

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "account disabled");
    assert!(tokens.get().is_none());
    assert!(*client.session_expired().borrow());
}

#[tokio::test]
async fn concurrent_401s_share_one_refresh() {
    let (server, client, tokens, _dir) = setup().await;
    tokens.set("stale");

    // Both in-flight requests are rejected with the stale token
    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"success": false, "error": "jwt expired"})),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;

    // The delay keeps the second 401 handler waiting on the gate until the
    // first one has refreshed
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"accessToken": "tok2"}}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .and(header("authorization", "Bearer tok2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let (a, b) = tokio::join!(
        client.get::<Vec<Tag>>("/tags", &[]),
        client.get::<Vec<Tag>>("/tags", &[]),
    );

    assert!(a.is_ok(), "first request should recover: {:?}", a.err());
    assert!(b.is_ok(), "second request should recover: {:?}", b.err());
    assert_eq!(tokens.get().as_deref(), Some("tok2"));
}

#[tokio::test]
async fn server_errors_are_normalized_to_messages() {
    let (server, client, _tokens, _dir) = setup().await;

    Mock::given(method("GET"))
        .and(path("/skills"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"success": false, "error": "db down"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/services"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"success": false, "error": "title is required"})),
        )
        .mount(&server)
        .await;

    let err = client
        .get::<Vec<serde_json::Value>>("/skills", &[])
        .await
        .expect_err("500 should fail");
    assert_eq!(err.to_string(), "Server error: db down");

    let err = client
        .post::<Service, _>("/services", &json!({"description": "no title"}))
        .await
        .expect_err("422 should fail");
    assert_eq!(err.to_string(), "title is required");
}

#[tokio::test]
async fn message_service_filters_and_marks_read() {
    let (server, client, tokens, _dir) = setup().await;
    tokens.set("tok1");
    let api = PortfolioApi::new(client);

    let message_json = json!({
        "id": 7,
        "name": "Jane Doe",
        "email": "jane@example.com",
        "subject": "Hello",
        "message": "Hi there",
        "read": false
    });

    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("unread", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": [message_json]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut read_json = message_json.clone();
    read_json["read"] = json!(true);
    Mock::given(method("PUT"))
        .and(path("/messages/7"))
        .and(body_json(json!({"read": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": read_json})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let unread: Vec<Message> = api
        .unread_messages()
        .await
        .expect("list should succeed")
        .into_result()
        .expect("envelope should carry data");
    assert_eq!(unread.len(), 1);
    assert!(!unread[0].read);

    let updated: Message = api
        .mark_message_read(7)
        .await
        .expect("update should succeed")
        .into_result()
        .expect("envelope should carry data");
    assert!(updated.read);
}

#[tokio::test]
async fn delete_returns_null_data_envelope() {
    let (server, client, tokens, _dir) = setup().await;
    tokens.set("tok1");
    let api = PortfolioApi::new(client);

    Mock::given(method("DELETE"))
        .and(path("/projects/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": null, "message": "Deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    api.projects
        .delete(3)
        .await
        .expect("delete should succeed")
        .ok()
        .expect("envelope should be success");
}
