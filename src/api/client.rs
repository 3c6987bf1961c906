//
//  spotctl
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Spot API
//!
//! This module provides the core HTTP client for the Rackspace Spot API and
//! its single request dispatcher. Every higher layer (generic CRUD, resource
//! methods) funnels through [`SpotClient::dispatch`].
//!
//! ## Features
//!
//! - Bearer token injection from a [`TokenSource`]
//! - URL composition from base URL, API version and endpoint
//! - Per-request content type (JSON, JSON Patch)
//! - Uniform mapping of non-2xx responses onto [`ApiError::Api`]
//! - Cancellation through [`Context`]
//! - Custom User-Agent header
//!
//! ## URL Layout
//!
//! ```text
//! https://spot.rackspace.com/apis / ngpc.rxt.io/v1      / namespaces/org-x/cloudspaces
//! |-------- base_url ---------|   |-- API version --|   |------- endpoint ----------|
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tracing::debug;

use super::common::ApiError;
use super::context::Context;
use crate::auth::{TokenManager, TokenSource, OAUTH_URL};

/// Default Spot API base URL.
pub const DEFAULT_BASE_URL: &str = "https://spot.rackspace.com/apis";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Content type for regular JSON bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for RFC 6902 JSON Patch bodies.
pub const CONTENT_TYPE_JSON_PATCH: &str = "application/json-patch+json";

/// API group/version a request is addressed to.
///
/// Most resources live under the default group; organizations live under the
/// auth group.
///
/// # Example
///
/// ```rust
/// use spotctl::api::ApiVersion;
///
/// assert_eq!(ApiVersion::Default.as_str(), "ngpc.rxt.io/v1");
/// assert_eq!(ApiVersion::Auth.as_str(), "auth.ngpc.rxt.io/v1");
/// assert_eq!(ApiVersion::from("auth.ngpc.rxt.io/v1"), ApiVersion::Auth);
/// assert!(!ApiVersion::from("example.io/v2").is_known());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiVersion {
    /// `ngpc.rxt.io/v1`
    #[default]
    Default,

    /// `auth.ngpc.rxt.io/v1`
    Auth,

    /// Any other group/version, passed through verbatim.
    Custom(String),
}

impl ApiVersion {
    const DEFAULT_PATH: &'static str = "ngpc.rxt.io/v1";
    const AUTH_PATH: &'static str = "auth.ngpc.rxt.io/v1";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => Self::DEFAULT_PATH,
            Self::Auth => Self::AUTH_PATH,
            Self::Custom(path) => path,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// The known versions.
    pub fn all() -> [ApiVersion; 2] {
        [Self::Default, Self::Auth]
    }
}

impl From<&str> for ApiVersion {
    fn from(value: &str) -> Self {
        match value.trim_matches('/') {
            Self::DEFAULT_PATH => Self::Default,
            Self::AUTH_PATH => Self::Auth,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to build a [`SpotClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub refresh_token: String,
    pub base_url: String,
    pub oauth_url: String,
    pub timeout: Duration,
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            refresh_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            oauth_url: OAUTH_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug: false,
        }
    }
}

impl ClientConfig {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

/// A single request for [`SpotClient::dispatch`].
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    endpoint: String,
    body: Option<Vec<u8>>,
    api_version: ApiVersion,
    content_type: Option<String>,
}

impl RequestSpec {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            api_version: ApiVersion::Default,
            content_type: None,
        }
    }

    pub fn api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Serializes `body` as JSON.
    ///
    /// # Errors
    ///
    /// [`ApiError::Internal`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::internal("failed to marshal request body", e))?;
        self.body = Some(bytes);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Short description used in log lines and error contexts.
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.endpoint)
    }
}

/// The Spot API client.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use spotctl::api::{ClientConfig, SpotClient};
///
/// let client = SpotClient::new(&ClientConfig::new("my-refresh-token"))?;
/// # Ok::<(), spotctl::api::common::ApiError>(())
/// ```
pub struct SpotClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Source of bearer tokens
    tokens: Arc<dyn TokenSource>,
}

impl SpotClient {
    /// Creates a client that authenticates with the refresh token in `config`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] if the refresh token or base URL is empty
    /// - [`ApiError::Internal`] if the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        if config.refresh_token.trim().is_empty() {
            return Err(ApiError::validation("refresh token is required"));
        }
        if config.base_url.trim().is_empty() {
            return Err(ApiError::validation("base URL is required"));
        }

        let http = Client::builder()
            .user_agent(format!("spotctl/{}", crate::VERSION))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::internal("failed to create HTTP client", e))?;

        let tokens = TokenManager::new(config.refresh_token.clone(), http.clone())
            .with_token_url(config.oauth_url.clone());

        if config.debug {
            debug!(base_url = %config.base_url, timeout = ?config.timeout, "client configured");
        }

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens: Arc::new(tokens),
        })
    }

    /// Creates a client with an explicit token source.
    pub fn with_token_source(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("spotctl/{}", crate::VERSION))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::internal("failed to create HTTP client", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `endpoint` under `api_version`.
    pub fn url_for(&self, api_version: &ApiVersion, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            api_version.as_str().trim_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Sends `spec` and returns the response if its status is 2xx.
    ///
    /// The caller owns the returned response and its body.
    ///
    /// # Errors
    ///
    /// - Any error from the token source
    /// - [`ApiError::Transport`] if the request cannot be sent
    /// - [`ApiError::Api`] for every non-2xx status
    /// - [`ApiError::Cancelled`] if `ctx` ends first
    pub async fn dispatch(&self, ctx: &Context, spec: RequestSpec) -> Result<Response, ApiError> {
        let operation = spec.describe();
        let token = self.tokens.access_token(ctx).await?;

        let url = self.url_for(&spec.api_version, &spec.endpoint);
        let content_type = spec.content_type.as_deref().unwrap_or(CONTENT_TYPE_JSON);

        debug!(
            method = %spec.method,
            url = %url,
            api_version = %spec.api_version,
            content_type,
            "dispatching request"
        );

        let mut request = self
            .http
            .request(spec.method.clone(), &url)
            .bearer_auth(token)
            .header(ACCEPT, CONTENT_TYPE_JSON)
            .header(CONTENT_TYPE, content_type);

        if let Some(body) = spec.body {
            request = request.body(body);
        }

        let response = ctx
            .run(&operation, async {
                request
                    .send()
                    .await
                    .map_err(|e| ApiError::transport(format!("{operation} failed"), e))
            })
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "{operation}");

        if status.is_success() {
            return Ok(response);
        }

        let body = ctx.run(&operation, async { Ok(response.text().await) }).await?;
        match body {
            Ok(body) => Err(ApiError::from_response(status, &body)),
            Err(_) => Err(ApiError::api(status.as_u16(), "failed to read error response")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;

    fn client(base_url: &str) -> SpotClient {
        SpotClient::with_token_source(
            base_url,
            Duration::from_secs(5),
            Arc::new(StaticToken("test-token".into())),
        )
        .unwrap()
    }

    #[test]
    fn test_url_composition() {
        let client = client("https://spot.rackspace.com/apis/");
        assert_eq!(
            client.url_for(&ApiVersion::Default, "/regions"),
            "https://spot.rackspace.com/apis/ngpc.rxt.io/v1/regions"
        );
        assert_eq!(
            client.url_for(&ApiVersion::Auth, "/organizations"),
            "https://spot.rackspace.com/apis/auth.ngpc.rxt.io/v1/organizations"
        );
        assert_eq!(
            client.url_for(&ApiVersion::Custom("example.io/v2".into()), "things"),
            "https://spot.rackspace.com/apis/example.io/v2/things"
        );
    }

    #[test]
    fn test_api_version_round_trip() {
        for version in ApiVersion::all() {
            assert_eq!(ApiVersion::from(version.as_str()), version);
            assert!(version.is_known());
        }
        assert_eq!(ApiVersion::default(), ApiVersion::Default);
    }

    #[test]
    fn test_new_requires_refresh_token() {
        let err = SpotClient::new(&ClientConfig::default()).err().unwrap();
        assert_eq!(err.to_string(), "refresh token is required");
    }

    #[tokio::test]
    async fn test_dispatch_sets_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ngpc.rxt.io/v1/regions")
            .match_header("authorization", "Bearer test-token")
            .match_header("content-type", CONTENT_TYPE_JSON)
            .match_header(
                "user-agent",
                mockito::Matcher::Regex(r"^spotctl/".to_string()),
            )
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        let response = client
            .dispatch(&Context::background(), RequestSpec::new(Method::GET, "/regions"))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_dispatch_maps_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ngpc.rxt.io/v1/namespaces/org-x/cloudspaces/missing")
            .with_status(404)
            .with_body(r#"{"code":404,"message":"CloudSpace not found"}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        let err = client
            .dispatch(
                &Context::background(),
                RequestSpec::new(Method::GET, "/namespaces/org-x/cloudspaces/missing"),
            )
            .await
            .unwrap_err();

        match err {
            ApiError::Api { code, message, .. } => {
                assert_eq!(code, 404);
                assert_eq!(message, "CloudSpace not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_unreachable_host_is_transport() {
        let client = client("http://127.0.0.1:1");
        let err = client
            .dispatch(&Context::background(), RequestSpec::new(Method::GET, "/regions"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::api::common::ErrorKind::Transport);
    }
}
