//! Fakturoid API client implementation.

use crate::auth::{self, BearerToken};
use crate::config::{FakturoidConfig, FakturoidConfigBuilder};
use crate::errors::{FakturoidError, FakturoidErrorKind, FakturoidResult};
use crate::pagination;
use crate::services::{
    AccountService, BankAccountsService, ExpensesService, GeneratorsService, InvoicesService,
    MessagesService, PaymentsService, SubjectsService,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value as Json;

/// Decoded API response: the JSON body (when one was returned) and the
/// last-page count announced by the `Link` header (when paginated).
pub(crate) struct ApiResponse {
    pub body: Option<Json>,
    pub page_count: Option<u32>,
}

/// Fakturoid API client.
///
/// Holds one bearer token for its whole lifetime; the token exchange
/// happens in [`connect`](Self::connect) and its failure is fatal.
#[derive(Debug)]
pub struct FakturoidClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: FakturoidConfig,
    /// Bearer token from the construction-time exchange.
    token: BearerToken,
}

impl FakturoidClient {
    /// Validates the configuration, performs the client-credential token
    /// exchange and returns a ready client.
    pub async fn connect(config: FakturoidConfig) -> FakturoidResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                FakturoidError::configuration("Failed to create HTTP client").with_cause(e)
            })?;

        let token = auth::exchange_token(&http, &config).await?;

        Ok(Self {
            http,
            config,
            token,
        })
    }

    /// Creates a new client builder.
    pub fn builder() -> FakturoidClientBuilder {
        FakturoidClientBuilder::new()
    }

    /// Gets the API host.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Gets the account slug.
    pub fn slug(&self) -> &str {
        &self.config.slug
    }

    // Service accessors

    /// Gets the account service.
    pub fn account(&self) -> AccountService {
        AccountService::new(self)
    }

    /// Gets the bank accounts service.
    pub fn bank_accounts(&self) -> BankAccountsService {
        BankAccountsService::new(self)
    }

    /// Gets the subjects service.
    pub fn subjects(&self) -> SubjectsService {
        SubjectsService::new(self)
    }

    /// Gets the invoices service.
    pub fn invoices(&self) -> InvoicesService {
        InvoicesService::new(self)
    }

    /// Gets the expenses service.
    pub fn expenses(&self) -> ExpensesService {
        ExpensesService::new(self)
    }

    /// Gets the generators service.
    pub fn generators(&self) -> GeneratorsService {
        GeneratorsService::new(self)
    }

    /// Gets the invoice messages service.
    pub fn messages(&self) -> MessagesService {
        MessagesService::new(self)
    }

    /// Gets the invoice payments service.
    pub fn payments(&self) -> PaymentsService {
        PaymentsService::new(self)
    }

    // HTTP methods

    /// Makes a GET request, expecting 200.
    pub(crate) async fn get(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> FakturoidResult<ApiResponse> {
        self.request(Method::GET, endpoint, params, None, StatusCode::OK)
            .await
    }

    /// Makes a POST request, expecting 201.
    pub(crate) async fn post(
        &self,
        endpoint: &str,
        body: &Json,
        params: &[(String, String)],
    ) -> FakturoidResult<ApiResponse> {
        self.request(Method::POST, endpoint, params, Some(body), StatusCode::CREATED)
            .await
    }

    /// Makes a PUT request, expecting 200.
    pub(crate) async fn put(&self, endpoint: &str, body: &Json) -> FakturoidResult<ApiResponse> {
        self.request(Method::PUT, endpoint, &[], Some(body), StatusCode::OK)
            .await
    }

    /// Makes a DELETE request, expecting 204.
    pub(crate) async fn delete(&self, endpoint: &str) -> FakturoidResult<ApiResponse> {
        self.request(Method::DELETE, endpoint, &[], None, StatusCode::NO_CONTENT)
            .await
    }

    // Internal methods

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(String, String)],
        body: Option<&Json>,
        success: StatusCode,
    ) -> FakturoidResult<ApiResponse> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%method, %url, "dispatching request");

        let mut request = self
            .http
            .request(method, &url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, self.token.header_value());

        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FakturoidError::timeout("Request timed out").with_cause(e)
            } else if e.is_connect() {
                FakturoidError::new(FakturoidErrorKind::ConnectionFailed, "Connection failed")
                    .with_cause(e)
            } else {
                FakturoidError::new(FakturoidErrorKind::Unknown, "Request failed").with_cause(e)
            }
        })?;

        let status = response.status();
        let page_count = pagination::last_page_from_headers(response.headers());
        let body = response.json::<Json>().await.ok();

        if status == success {
            return Ok(ApiResponse { body, page_count });
        }

        tracing::debug!(status = status.as_u16(), %url, "request failed");
        if let Some(errors) = body.as_ref().and_then(|b| b.get("errors")) {
            return Err(FakturoidError::validation(status.as_u16(), errors.clone()));
        }
        Err(FakturoidError::from_status(
            status.as_u16(),
            format!("Request to {} returned HTTP {}", url, status.as_u16()),
        ))
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/v3/accounts/{}/{}.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.slug,
            endpoint
        )
    }
}

/// Builder for [`FakturoidClient`].
pub struct FakturoidClientBuilder {
    config_builder: FakturoidConfigBuilder,
}

impl FakturoidClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: FakturoidConfig::builder(),
        }
    }

    /// Sets the account slug.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.slug(slug);
        self
    }

    /// Sets the account email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.email(email);
        self
    }

    /// Sets the OAuth client id.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.client_id(client_id);
        self
    }

    /// Sets the OAuth client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.client_secret(client_secret);
        self
    }

    /// Sets the API host.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(user_agent);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Builds the configuration and connects, performing the token exchange.
    pub async fn connect(self) -> FakturoidResult<FakturoidClient> {
        let config = self.config_builder.build()?;
        FakturoidClient::connect(config).await
    }
}

impl Default for FakturoidClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
