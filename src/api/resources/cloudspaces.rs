//
//  spotctl
//  api/resources/cloudspaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Cloudspaces
//!
//! A cloudspace is a managed Kubernetes control plane living in an
//! organization's namespace. Node pools attach to it by name.
//!
//! ## Endpoints
//!
//! | Method | Path |
//! |--------|------|
//! | list   | `GET /namespaces/{ns}/cloudspaces` |
//! | get    | `GET /namespaces/{ns}/cloudspaces/{name}` |
//! | create | `POST /namespaces/{ns}/cloudspaces` |
//! | edit   | `PATCH /namespaces/{ns}/cloudspaces/{name}` |
//! | delete | `DELETE /namespaces/{ns}/cloudspaces/{name}` |

use serde::{Deserialize, Serialize};

use super::{
    namespaced, namespaced_item, require_name, require_namespace, require_operations,
};
use crate::api::client::{ApiVersion, SpotClient};
use crate::api::common::{ApiError, DeleteResponse, ObjectMeta, ResourceList};
use crate::api::context::Context;
use crate::api::patch::PatchOperation;

const COLLECTION: &str = "cloudspaces";

/// Kind written into new cloudspace envelopes.
pub const CLOUDSPACE_KIND: &str = "CloudSpace";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSpace {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: CloudSpaceSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CloudSpaceStatus>,
}

impl CloudSpace {
    /// A new cloudspace envelope ready to be created.
    pub fn new(name: &str, namespace: &str, spec: CloudSpaceSpec) -> Self {
        Self {
            api_version: ApiVersion::Default.to_string(),
            kind: CLOUDSPACE_KIND.to_string(),
            metadata: ObjectMeta::named(name, namespace),
            spec,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSpaceSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cloud: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kubernetes_version: String,

    #[serde(default, rename = "HAControlPlane")]
    pub ha_control_plane: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cni: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub deployment_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub webhook: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSpaceStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phase: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub health: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_kubernetes_version: String,

    #[serde(default, rename = "APIServerEndpoint", skip_serializing_if = "String::is_empty")]
    pub api_server_endpoint: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

pub type CloudSpaceList = ResourceList<CloudSpace>;

impl SpotClient {
    pub async fn list_cloudspaces(&self, ctx: &Context, namespace: &str) -> Result<CloudSpaceList, ApiError> {
        require_namespace(namespace)?;
        self.list(ctx, &namespaced(namespace, COLLECTION), ApiVersion::Default)
            .await
    }

    pub async fn get_cloudspace(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
    ) -> Result<CloudSpace, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "cloudspace")?;
        self.get(ctx, &namespaced_item(namespace, COLLECTION, name), ApiVersion::Default)
            .await
    }

    pub async fn create_cloudspace(
        &self,
        ctx: &Context,
        namespace: &str,
        cloudspace: &CloudSpace,
    ) -> Result<CloudSpace, ApiError> {
        require_namespace(namespace)?;
        require_name(&cloudspace.metadata.name, "cloudspace")?;
        self.create(ctx, &namespaced(namespace, COLLECTION), cloudspace, ApiVersion::Default)
            .await
    }

    pub async fn edit_cloudspace(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
        operations: &[PatchOperation],
    ) -> Result<CloudSpace, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "cloudspace")?;
        require_operations(operations)?;
        self.edit(
            ctx,
            &namespaced_item(namespace, COLLECTION, name),
            operations,
            ApiVersion::Default,
        )
        .await
    }

    pub async fn delete_cloudspace(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
    ) -> Result<DeleteResponse, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "cloudspace")?;
        self.delete(
            ctx,
            &namespaced_item(namespace, COLLECTION, name),
            ApiVersion::Default,
            CLOUDSPACE_KIND,
        )
        .await
    }
}
