//! OAuth2 client-credential authentication for the Fakturoid API.
//!
//! Fakturoid v3 issues bearer tokens through a client-credentials grant
//! (RFC 6749 section 4.4). The exchange happens once, when the client is
//! constructed; a client keeps its token for its whole lifetime.

use crate::config::FakturoidConfig;
use crate::errors::{FakturoidError, FakturoidErrorKind, FakturoidResult};
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Bearer token obtained from the token exchange.
#[derive(Clone)]
pub struct BearerToken(SecretString);

impl BearerToken {
    /// Wraps an already-issued token. Useful in tests.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    /// Renders the `Authorization` header value.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[allow(dead_code)]
    token_type: Option<String>,
    #[allow(dead_code)]
    expires_in: Option<u64>,
}

/// Renders the `Authorization: Basic` value for the token request.
fn basic_auth(client_id: &str, client_secret: &SecretString) -> String {
    let credentials = format!("{}:{}", client_id, client_secret.expose_secret());
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {}", encoded)
}

/// Exchanges the configured client credentials for a bearer token.
///
/// Fails fatally when the endpoint rejects the credentials or when the
/// response body lacks `access_token`.
pub(crate) async fn exchange_token(
    http: &reqwest::Client,
    config: &FakturoidConfig,
) -> FakturoidResult<BearerToken> {
    let response = http
        .post(config.token_url())
        .header(reqwest::header::USER_AGENT, &config.user_agent)
        .header(reqwest::header::ACCEPT, "application/json")
        .header(
            reqwest::header::AUTHORIZATION,
            basic_auth(&config.client_id, &config.client_secret),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                FakturoidError::timeout("Token request timed out").with_cause(e)
            } else {
                FakturoidError::new(
                    FakturoidErrorKind::ConnectionFailed,
                    "Token request failed",
                )
                .with_cause(e)
            }
        })?;

    let status = response.status();
    let body: TokenResponse = match response.json().await {
        Ok(body) => body,
        Err(e) => {
            return Err(FakturoidError::authentication(format!(
                "Token endpoint returned HTTP {} with a non-JSON body",
                status.as_u16()
            ))
            .with_status(status.as_u16())
            .with_cause(e));
        }
    };

    match body.access_token {
        Some(token) if !token.is_empty() => {
            tracing::debug!(slug = %config.slug, "obtained bearer token");
            Ok(BearerToken::new(token))
        }
        _ => Err(FakturoidError::authentication(format!(
            "Token endpoint returned HTTP {} without an access_token field",
            status.as_u16()
        ))
        .with_status(status.as_u16())),
    }
}
