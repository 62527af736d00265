//! Shared helpers for HTTP-level tests.

#![allow(dead_code)]

use fakturoid::FakturoidClient;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a happy-path token endpoint on the mock server.
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v3/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": 7200
        })))
        .mount(server)
        .await;
}

/// Builds a client connected against the mock server.
pub async fn connected_client(server: &MockServer) -> FakturoidClient {
    mount_token_endpoint(server).await;

    FakturoidClient::builder()
        .slug("applecorp")
        .email("steve@apple.example")
        .client_id("client-id")
        .client_secret("client-secret")
        .base_url(server.uri())
        .connect()
        .await
        .expect("client connects against the mock server")
}
