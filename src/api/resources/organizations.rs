//
//  spotctl
//  api/resources/organizations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organizations, served by the auth API group.
//!
//! Unlike the other resources this endpoint returns a flat, offset-paged
//! envelope instead of a Kubernetes list. Each organization's
//! `metadata.namespace` is the namespace its cloudspaces and node pools live
//! in.

use serde::{Deserialize, Serialize};

use crate::api::client::{ApiVersion, SpotClient};
use crate::api::common::ApiError;
use crate::api::context::Context;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub metadata: OrganizationMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationMetadata {
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationList {
    #[serde(default)]
    pub start: i64,

    #[serde(default)]
    pub limit: i64,

    #[serde(default)]
    pub length: i64,

    #[serde(default)]
    pub total: i64,

    #[serde(default)]
    pub organizations: Vec<Organization>,
}

impl SpotClient {
    pub async fn list_organizations(&self, ctx: &Context) -> Result<OrganizationList, ApiError> {
        self.list(ctx, "/organizations", ApiVersion::Auth).await
    }
}
