//
//  spotctl
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # spotctl Library
//!
//! A command-line interface and client library for the Rackspace Spot API.
//!
//! ## Overview
//!
//! Rackspace Spot sells servers through an open market. Users create
//! cloudspaces (managed Kubernetes control planes) and attach spot node pools
//! that bid for servers. This library provides the typed client behind the
//! `spotctl` binary:
//!
//! - **Token Management**: Exchanges a long-lived refresh token for short-lived
//!   access tokens, caches them and refreshes them before they expire
//! - **Resource Operations**: Typed list/get/create/edit/delete for regions,
//!   server classes, organizations, cloudspaces and node pools
//! - **JSON Patch Edits**: RFC 6902 patch files loaded, displayed and applied
//! - **Cancellation**: Every call takes a [`api::Context`] carrying a deadline
//!   and a cancellation signal
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP client, generic CRUD layer, resources and JSON Patch
//! - [`auth`]: OAuth refresh-token exchange and the access-token cache
//! - [`config`]: Configuration file and settings resolution
//! - [`output`]: Output formatting (table, wide, JSON, YAML)
//! - [`interactive`]: Interactive prompts and selectors
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use spotctl::api::{ClientConfig, Context, SpotClient};
//!
//! # async fn demo() -> Result<(), spotctl::api::ApiError> {
//! let client = SpotClient::new(&ClientConfig::new("my-refresh-token"))?;
//! let pools = client.list_spot_node_pools(&Context::background(), "org-abc123").await?;
//! println!("{} spot node pools", pools.len());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// API client for Rackspace Spot.
///
/// The client handles authentication, request dispatch, JSON Patch edits and
/// error mapping.
pub mod api;

/// Authentication: refresh-token exchange and access-token caching.
pub mod auth;

/// Configuration file management.
///
/// Manages the configuration stored in platform-specific locations:
/// - Linux: `~/.config/spotctl/config.toml`
/// - macOS: `~/Library/Application Support/spotctl/config.toml`
/// - Windows: `%APPDATA%\spotctl\config.toml`
pub mod config;

/// Output formatting for different modes.
pub mod output;

/// Interactive terminal UI components.
pub mod interactive;

pub use api::{ApiError, Context, SpotClient};
pub use cli::Cli;
pub use config::{Config, Settings};

/// Application name, used for the binary and configuration paths.
pub const APP_NAME: &str = "spotctl";

/// Application version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16-31`: Operation-related issues
pub mod exit_codes {
    use crate::api::{ApiError, ErrorKind};

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage, arguments or settings. Nothing was sent to the API.
    pub const USAGE: i32 = 2;

    /// The API rejected the credentials (401 or 403).
    ///
    /// Check the refresh token with `spotctl config show`.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist (404).
    pub const NOT_FOUND: i32 = 8;

    /// The operation was cancelled, by Ctrl+C or by its deadline.
    pub const CANCELLED: i32 = 16;

    /// Picks the exit code for `err` from the first [`ApiError`] in its chain.
    pub fn for_error(err: &anyhow::Error) -> i32 {
        let Some(api) = err.chain().find_map(|e| e.downcast_ref::<ApiError>()) else {
            return ERROR;
        };
        for_api_error(api)
    }

    pub fn for_api_error(err: &ApiError) -> i32 {
        if err.is_cancelled() {
            return CANCELLED;
        }
        match err.kind() {
            ErrorKind::Validation => USAGE,
            ErrorKind::Api if err.is_unauthorized() => AUTH_ERROR,
            ErrorKind::Api if err.is_not_found() => NOT_FOUND,
            _ => ERROR,
        }
    }

}
