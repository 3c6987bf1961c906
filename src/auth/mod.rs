//
//  spotctl
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Rackspace Spot uses OAuth 2.0 refresh tokens. The user configures a
//! long-lived refresh token once; the client exchanges it for a short-lived
//! bearer token on demand and caches the result.
//!
//! ## Module Structure
//!
//! - [`oauth`]: the refresh-token exchange against the Spot identity provider
//! - [`token`]: [`TokenManager`], the caching token source, and the
//!   [`TokenSource`] trait the dispatcher depends on
//!
//! ## Example
//!
//! ```rust,no_run
//! use spotctl::api::Context;
//! use spotctl::auth::TokenManager;
//!
//! # async fn demo() -> Result<(), spotctl::api::common::ApiError> {
//! let manager = TokenManager::new("my-refresh-token", reqwest::Client::new());
//! let bearer = manager.valid_access_token(&Context::background()).await?;
//! # let _ = bearer;
//! # Ok(())
//! # }
//! ```

mod oauth;
mod token;

pub use oauth::*;
pub use token::*;

/// Masks a secret for display, keeping its first eight characters.
pub fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return String::new();
    }
    let visible: String = token.chars().take(8).collect();
    format!("{visible}***")
}
