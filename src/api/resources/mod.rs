//
//  spotctl
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed Spot resources and their client methods.
//!
//! Each submodule defines the resource envelope and an `impl SpotClient`
//! block of thin wrappers over the generic CRUD layer. Wrappers validate
//! their identifiers before any network I/O.

pub mod cloudspaces;
pub mod nodepools;
pub mod organizations;
pub mod regions;
pub mod serverclasses;

pub use cloudspaces::*;
pub use nodepools::*;
pub use organizations::*;
pub use regions::*;
pub use serverclasses::*;

use super::common::ApiError;
use super::patch::PatchOperation;

pub(crate) fn require_namespace(namespace: &str) -> Result<(), ApiError> {
    require(namespace, "namespace is required")
}

pub(crate) fn require_name(name: &str, resource: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::validation(format!("{resource} name is required")));
    }
    Ok(())
}

pub(crate) fn require_operations(operations: &[PatchOperation]) -> Result<(), ApiError> {
    if operations.is_empty() {
        return Err(ApiError::validation("patch operations are required"));
    }
    Ok(())
}

fn require(value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(message));
    }
    Ok(())
}

pub(crate) fn namespaced(namespace: &str, collection: &str) -> String {
    format!("/namespaces/{namespace}/{collection}")
}

pub(crate) fn namespaced_item(namespace: &str, collection: &str, name: &str) -> String {
    format!("/namespaces/{namespace}/{collection}/{name}")
}
