//
//  spotctl
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Rackspace Spot REST API.
//!
//! ## Architecture
//!
//! ```text
//! resources (list_cloudspaces, edit_spot_node_pool, ...)
//!     -> generic CRUD (list / get / create / edit / delete)
//!         -> dispatcher (SpotClient::dispatch)
//!             -> token source (TokenManager)
//! ```
//!
//! - [`client`]: Core HTTP client, API versions and the request dispatcher
//! - [`context`]: Cancellation and deadlines for every operation
//! - [`generic`]: Typed CRUD operations shared by all resources
//! - [`patch`]: RFC 6902 JSON Patch documents
//! - [`resources`]: Regions, server classes, organizations, cloudspaces, node pools
//! - [`common`]: Error taxonomy and Kubernetes-style envelopes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spotctl::api::{ClientConfig, Context, SpotClient};
//!
//! # async fn demo() -> Result<(), spotctl::api::common::ApiError> {
//! let client = SpotClient::new(&ClientConfig::new("my-refresh-token"))?;
//! let ctx = Context::background();
//!
//! for region in client.list_regions(&ctx).await?.items {
//!     println!("{} ({})", region.metadata.name, region.spec.country);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]; branch on [`ApiError::kind`]:
//!
//! - `Validation`: bad arguments, nothing was sent
//! - `Transport`: network failure or cancellation
//! - `Api`: non-2xx response, with the server's code and message
//! - `Internal`: encode/decode or file failure

/// Core HTTP client and request dispatcher.
pub mod client;

/// Cancellation and deadline propagation.
pub mod context;

/// Generic CRUD operations over any endpoint.
pub mod generic;

/// JSON Patch operations for edits.
pub mod patch;

/// Typed Spot resources and their client methods.
pub mod resources;

/// Error taxonomy and shared envelope types.
pub mod common;

pub use client::{ApiVersion, ClientConfig, RequestSpec, SpotClient};
pub use common::{ApiError, ErrorKind};
pub use context::{CancelHandle, Context};
pub use generic::DeleteResult;
pub use patch::PatchOperation;
