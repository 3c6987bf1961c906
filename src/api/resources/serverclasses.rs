//
//  spotctl
//  api/resources/serverclasses.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server classes: the machine shapes that can be bid on or reserved.

use serde::{Deserialize, Serialize};

use super::require_name;
use crate::api::client::{ApiVersion, SpotClient};
use crate::api::common::{quantity, ApiError, ObjectMeta, ResourceList};
use crate::api::context::Context;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerClass {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: ServerClassSpec,

    #[serde(default)]
    pub status: ServerClassStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerClassSpec {
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub availability: String,

    #[serde(default)]
    pub flavor_type: String,

    #[serde(default)]
    pub provider: ServerClassProvider,

    #[serde(default)]
    pub resources: ServerResources,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_demand_pricing: Option<Pricing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerClassProvider {
    #[serde(default)]
    pub provider_type: String,

    #[serde(default, rename = "flavorID", skip_serializing_if = "String::is_empty")]
    pub flavor_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerResources {
    #[serde(default, deserialize_with = "quantity")]
    pub cpu: String,

    #[serde(default, deserialize_with = "quantity")]
    pub memory: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default, deserialize_with = "quantity")]
    pub cost: String,

    #[serde(default)]
    pub interval: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerClassStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_pricing: Option<SpotPricing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPricing {
    #[serde(default, deserialize_with = "quantity")]
    pub market_price_per_hour: String,

    #[serde(default, deserialize_with = "quantity")]
    pub hammer_price_per_hour: String,
}

pub type ServerClassList = ResourceList<ServerClass>;

impl SpotClient {
    pub async fn list_server_classes(&self, ctx: &Context) -> Result<ServerClassList, ApiError> {
        self.list(ctx, "/serverclasses", ApiVersion::Default).await
    }

    pub async fn get_server_class(&self, ctx: &Context, name: &str) -> Result<ServerClass, ApiError> {
        require_name(name, "server class")?;
        self.get(ctx, &format!("/serverclasses/{name}"), ApiVersion::Default)
            .await
    }
}
