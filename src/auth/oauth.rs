//
//  spotctl
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth Refresh Exchange
//!
//! Rackspace Spot authenticates API calls with a short-lived bearer token that
//! is minted from a long-lived refresh token. This module performs that
//! exchange against the Spot identity provider.
//!
//! ## Flow
//!
//! ```text
//! POST https://login.spot.rackspace.com/oauth/token
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=refresh_token&client_id=<CLIENT_ID>&refresh_token=<token>
//! ```
//!
//! The response carries both an `access_token` and an `id_token`. The Spot API
//! expects the **ID token** as bearer credential; see
//! [`TokenResponse::bearer_token`].

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::common::ApiError;

/// Token endpoint of the Spot identity provider.
pub const OAUTH_URL: &str = "https://login.spot.rackspace.com/oauth/token";

/// Public OAuth client ID registered for Spot API clients.
pub const CLIENT_ID: &str = "mwG3lUMV8KyeMqHe4fJ5Bb3nM1vBvRNa";

/// Response from the token endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub id_token: String,

    #[serde(default)]
    pub scope: String,

    /// Lifetime in seconds, relative to the time of the response.
    #[serde(default)]
    pub expires_in: i64,

    #[serde(default)]
    pub token_type: String,
}

impl TokenResponse {
    /// The credential to present to the Spot API.
    ///
    /// The ID token when present, otherwise the access token. `None` when the
    /// response carried neither.
    pub fn bearer_token(&self) -> Option<&str> {
        [self.id_token.as_str(), self.access_token.as_str()]
            .into_iter()
            .find(|token| !token.is_empty())
    }
}

/// Exchanges `refresh_token` for a fresh token pair at `token_url`.
///
/// # Errors
///
/// - [`ApiError::Transport`] if the request cannot be sent
/// - [`ApiError::Api`] if the identity provider answers with a non-2xx status
/// - [`ApiError::Internal`] if the response body cannot be decoded
pub async fn refresh_access_token(
    http: &Client,
    token_url: &str,
    refresh_token: &str,
) -> Result<TokenResponse, ApiError> {
    let params = [
        ("grant_type", "refresh_token"),
        ("client_id", CLIENT_ID),
        ("refresh_token", refresh_token),
    ];

    debug!(token_url, "exchanging refresh token");

    let response = http
        .post(token_url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .form(&params)
        .send()
        .await
        .map_err(|e| ApiError::transport("failed to refresh token", e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::transport("failed to read token response", e))?;

    if !status.is_success() {
        return Err(ApiError::from_response(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::internal("failed to parse token response", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_prefers_id_token() {
        let response = TokenResponse {
            access_token: "access".into(),
            id_token: "id".into(),
            ..Default::default()
        };
        assert_eq!(response.bearer_token(), Some("id"));
    }

    #[test]
    fn test_bearer_falls_back_to_access_token() {
        let response = TokenResponse {
            access_token: "access".into(),
            ..Default::default()
        };
        assert_eq!(response.bearer_token(), Some("access"));
        assert_eq!(TokenResponse::default().bearer_token(), None);
    }

    #[tokio::test]
    async fn test_refresh_posts_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
                mockito::Matcher::UrlEncoded("client_id".into(), CLIENT_ID.into()),
                mockito::Matcher::UrlEncoded("refresh_token".into(), "rt-123".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"a","id_token":"i","expires_in":86400,"token_type":"Bearer"}"#)
            .create_async()
            .await;

        let url = format!("{}/oauth/token", server.url());
        let tokens = refresh_access_token(&Client::new(), &url, "rt-123")
            .await
            .unwrap();

        assert_eq!(tokens.id_token, "i");
        assert_eq!(tokens.expires_in, 86400);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/token")
            .with_status(403)
            .with_body(r#"{"error":"invalid_grant","error_description":"Unknown or invalid refresh token."}"#)
            .create_async()
            .await;

        let url = format!("{}/oauth/token", server.url());
        let err = refresh_access_token(&Client::new(), &url, "bad")
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some(403));
    }
}
