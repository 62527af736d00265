//! HTTP-level tests for the transport layer: token exchange, request
//! shape and the error envelope.

mod common;

use fakturoid::{FakturoidClient, FakturoidErrorKind};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn token_exchange_sends_client_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/oauth/token"))
        .and(header_exists("authorization"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FakturoidClient::builder()
        .slug("applecorp")
        .email("steve@apple.example")
        .client_id("client-id")
        .client_secret("client-secret")
        .base_url(server.uri())
        .connect()
        .await
        .unwrap();

    assert_eq!(client.slug(), "applecorp");
}

#[tokio::test]
async fn missing_access_token_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/oauth/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"})),
        )
        .mount(&server)
        .await;

    let result = FakturoidClient::builder()
        .slug("applecorp")
        .client_id("client-id")
        .client_secret("wrong")
        .base_url(server.uri())
        .connect()
        .await;

    let error = result.unwrap_err();
    assert_eq!(*error.kind(), FakturoidErrorKind::AuthenticationFailed);
    assert_eq!(error.status_code(), Some(401));
}

#[tokio::test]
async fn non_json_token_response_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/oauth/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result = FakturoidClient::builder()
        .slug("applecorp")
        .client_id("client-id")
        .client_secret("secret")
        .base_url(server.uri())
        .connect()
        .await;

    let error = result.unwrap_err();
    assert_eq!(*error.kind(), FakturoidErrorKind::AuthenticationFailed);
}

#[tokio::test]
async fn requests_carry_bearer_token_and_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/accounts/applecorp/account.json"))
        .and(header("authorization", "Bearer test-token"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "Apple Czech s.r.o."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::connected_client(&server).await;
    let account = client.account().load().await.unwrap();
    assert_eq!(account.name(), Some("Apple Czech s.r.o."));
}

#[tokio::test]
async fn errors_payload_becomes_validation_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/accounts/applecorp/invoices/40.json"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": {"number": ["is already used"]}
        })))
        .mount(&server)
        .await;

    let client = common::connected_client(&server).await;
    let error = client.invoices().load(40).await.unwrap_err();

    assert_eq!(*error.kind(), FakturoidErrorKind::ValidationFailed);
    assert_eq!(
        error.validation_errors(),
        Some(&json!({"number": ["is already used"]}))
    );
}

#[tokio::test]
async fn plain_http_error_maps_to_status_kind() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/accounts/applecorp/invoices/9999.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Not found"})))
        .mount(&server)
        .await;

    let client = common::connected_client(&server).await;
    let error = client.invoices().load(9999).await.unwrap_err();

    assert_eq!(*error.kind(), FakturoidErrorKind::NotFound);
    assert_eq!(error.status_code(), Some(404));
}

#[tokio::test]
async fn unexpected_success_status_is_an_error() {
    let server = MockServer::start().await;

    // DELETE is expected to answer 204; a 200 is not a success here
    Mock::given(method("DELETE"))
        .and(path("/api/v3/accounts/applecorp/subjects/28.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = common::connected_client(&server).await;
    assert!(client.subjects().delete_by_id(28).await.is_err());
}
