//! Configuration types for the Fakturoid client.

use crate::errors::{FakturoidError, FakturoidResult};
use secrecy::SecretString;
use std::time::Duration;

/// Default Fakturoid host.
pub const DEFAULT_BASE_URL: &str = "https://app.fakturoid.cz";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "fakturoid-rs/0.1.0";

/// Fakturoid client configuration.
#[derive(Debug, Clone)]
pub struct FakturoidConfig {
    /// Account slug, the `{slug}` part of `app.fakturoid.cz/api/v3/accounts/{slug}`.
    pub slug: String,
    /// Account email used as the contact identity for the integration.
    pub email: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
    /// API host, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
}

impl FakturoidConfig {
    /// Creates a configuration with the mandatory credentials and defaults
    /// for everything else.
    pub fn new(
        slug: impl Into<String>,
        email: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            email: email.into(),
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Creates a new configuration builder.
    pub fn builder() -> FakturoidConfigBuilder {
        FakturoidConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> FakturoidResult<()> {
        if self.slug.is_empty() {
            return Err(FakturoidError::configuration("account slug is required"));
        }
        if self
            .slug
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && c != '-' && c != '_')
        {
            return Err(FakturoidError::configuration(format!(
                "account slug '{}' contains characters outside [a-zA-Z0-9_-]",
                self.slug
            )));
        }
        if self.client_id.is_empty() {
            return Err(FakturoidError::configuration("client id is required"));
        }
        if self.base_url.is_empty() || !self.base_url.starts_with("http") {
            return Err(FakturoidError::configuration(format!(
                "base URL '{}' is not an http(s) URL",
                self.base_url
            )));
        }
        Ok(())
    }

    /// OAuth token endpoint for this host.
    pub fn token_url(&self) -> String {
        format!("{}/api/v3/oauth/token", self.base_url.trim_end_matches('/'))
    }
}

/// Builder for [`FakturoidConfig`].
#[derive(Debug, Default)]
pub struct FakturoidConfigBuilder {
    slug: Option<String>,
    email: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl FakturoidConfigBuilder {
    /// Sets the account slug.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Sets the account email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the OAuth client id.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the OAuth client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the API host.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> FakturoidResult<FakturoidConfig> {
        let config = FakturoidConfig {
            slug: self.slug.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            client_id: self.client_id.unwrap_or_default(),
            client_secret: SecretString::new(self.client_secret.unwrap_or_default()),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FakturoidErrorKind;

    #[test]
    fn test_builder_defaults() {
        let config = FakturoidConfig::builder()
            .slug("applecorp")
            .email("steve@apple.example")
            .client_id("abc")
            .client_secret("shhh")
            .build()
            .unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(
            config.token_url(),
            "https://app.fakturoid.cz/api/v3/oauth/token"
        );
    }

    #[test]
    fn test_missing_slug_rejected() {
        let result = FakturoidConfig::builder()
            .email("steve@apple.example")
            .client_id("abc")
            .client_secret("shhh")
            .build();

        let error = result.unwrap_err();
        assert_eq!(*error.kind(), FakturoidErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_bad_slug_rejected() {
        let result = FakturoidConfig::builder()
            .slug("apple corp!")
            .client_id("abc")
            .client_secret("shhh")
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_custom_base_url() {
        let config = FakturoidConfig::builder()
            .slug("applecorp")
            .client_id("abc")
            .client_secret("shhh")
            .base_url("http://localhost:8080")
            .build()
            .unwrap();

        assert_eq!(config.token_url(), "http://localhost:8080/api/v3/oauth/token");
    }
}
