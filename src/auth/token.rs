//
//  spotctl
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Access Token Management
//!
//! [`TokenManager`] turns a long-lived refresh token into a cached bearer token
//! and refreshes it when it is about to expire. It is safe to share between
//! tasks: concurrent callers that find the cache stale perform a single
//! refresh between them.
//!
//! ## Validity
//!
//! A cached token is used only while it is non-empty and
//! `now + 5 minutes < expires_at`. Anything else triggers a refresh.
//!
//! ## Locking
//!
//! ```text
//! read lock  -> valid?  -> return cached token
//! write lock -> valid?  -> return cached token (another task refreshed)
//!            -> refresh -> store -> return new token
//! ```
//!
//! The refresh runs under the caller's [`Context`]; cancelling it drops the
//! write guard and leaves the cache as it was.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::debug;

use super::oauth::{refresh_access_token, OAUTH_URL};
use crate::api::common::ApiError;
use crate::api::Context;

/// Tokens closer than this to expiry are refreshed before use.
pub const TOKEN_REFRESH_BUFFER_SECS: i64 = 300;

/// Source of bearer tokens for the dispatcher.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns a token that is valid for at least the refresh buffer.
    async fn access_token(&self, ctx: &Context) -> Result<String, ApiError>;
}

/// The cached bearer token and its absolute expiry.
#[derive(Debug, Clone, Default)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty()
            && self
                .expires_at
                .is_some_and(|expires_at| now + Duration::seconds(TOKEN_REFRESH_BUFFER_SECS) < expires_at)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

/// Refreshing, caching token source backed by the Spot identity provider.
pub struct TokenManager {
    http: Client,
    refresh_token: String,
    token_url: String,
    cache: RwLock<CachedToken>,
}

impl TokenManager {
    pub fn new(refresh_token: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            refresh_token: refresh_token.into(),
            token_url: OAUTH_URL.to_string(),
            cache: RwLock::new(CachedToken::default()),
        }
    }

    /// Points the manager at a different token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Returns a valid bearer token, refreshing it if needed.
    ///
    /// # Errors
    ///
    /// Propagates the refresh failure ([`ApiError::Transport`],
    /// [`ApiError::Api`] or [`ApiError::Internal`]) and
    /// [`ApiError::Cancelled`] if `ctx` ends first. The cache is never
    /// updated with a partial result.
    pub async fn valid_access_token(&self, ctx: &Context) -> Result<String, ApiError> {
        {
            let cache = self.cache.read().await;
            if cache.is_valid() {
                return Ok(cache.access_token.clone());
            }
        }

        ctx.run("token refresh", async {
            let mut cache = self.cache.write().await;
            if cache.is_valid() {
                return Ok(cache.access_token.clone());
            }

            debug!("access token missing or near expiry, refreshing");
            let tokens = refresh_access_token(&self.http, &self.token_url, &self.refresh_token).await?;

            let token = tokens
                .bearer_token()
                .ok_or_else(|| {
                    ApiError::internal("failed to parse token response", "response contained no token")
                })?
                .to_string();
            let expires_at = expiry_after(Utc::now(), tokens.expires_in).ok_or_else(|| {
                ApiError::internal(
                    "failed to parse token response",
                    format!("expires_in {} is out of range", tokens.expires_in),
                )
            })?;

            *cache = CachedToken {
                access_token: token.clone(),
                expires_at: Some(expires_at),
            };
            debug!(expires_in = tokens.expires_in, "access token refreshed");

            Ok(token)
        })
        .await
    }

    /// Snapshot of the cached token.
    pub async fn cached(&self) -> CachedToken {
        self.cache.read().await.clone()
    }
}

/// `now + expires_in` seconds, or `None` when it does not fit a timestamp.
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    now.checked_add_signed(Duration::try_seconds(expires_in)?)
}

#[async_trait]
impl TokenSource for TokenManager {
    async fn access_token(&self, ctx: &Context) -> Result<String, ApiError> {
        self.valid_access_token(ctx).await
    }
}

/// A fixed bearer token; never refreshes.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self, _ctx: &Context) -> Result<String, ApiError> {
        Ok(self.0.clone())
    }
}
