//
//  spotctl
//  api/resources/regions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Regions (cluster-scoped, read-only).

use serde::{Deserialize, Serialize};

use super::require_name;
use crate::api::client::{ApiVersion, SpotClient};
use crate::api::common::{ApiError, ObjectMeta, ResourceList};
use crate::api::context::Context;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: RegionSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSpec {
    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub provider: RegionProvider,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionProvider {
    #[serde(default)]
    pub provider_region_name: String,

    #[serde(default)]
    pub provider_type: String,
}

pub type RegionList = ResourceList<Region>;

impl SpotClient {
    pub async fn list_regions(&self, ctx: &Context) -> Result<RegionList, ApiError> {
        self.list(ctx, "/regions", ApiVersion::Default).await
    }

    pub async fn get_region(&self, ctx: &Context, name: &str) -> Result<Region, ApiError> {
        require_name(name, "region")?;
        self.get(ctx, &format!("/regions/{name}"), ApiVersion::Default)
            .await
    }
}
