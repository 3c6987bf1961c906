//
//  spotctl
//  api/resources/nodepools.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Node Pools
//!
//! Worker capacity attached to a cloudspace comes in two flavours:
//!
//! - [`SpotNodePool`]: servers won at auction against a bid price, optionally
//!   autoscaled.
//! - [`OnDemandNodePool`]: reserved servers at a fixed price.
//!
//! Both live in the organization namespace and reference their cloudspace
//! and server class by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    namespaced, namespaced_item, require_name, require_namespace, require_operations,
};
use crate::api::client::{ApiVersion, SpotClient};
use crate::api::common::{quantity, ApiError, DeleteResponse, ObjectMeta, ResourceList};
use crate::api::context::Context;
use crate::api::patch::PatchOperation;

const SPOT_COLLECTION: &str = "spotnodepools";
const ON_DEMAND_COLLECTION: &str = "ondemandnodepools";

pub const SPOT_NODE_POOL_KIND: &str = "SpotNodePool";
pub const ON_DEMAND_NODE_POOL_KIND: &str = "OnDemandNodePool";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Autoscaling {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_nodes: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taint {
    pub key: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,

    pub effect: String,
}

// Spot node pools

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotNodePool {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: SpotNodePoolSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SpotNodePoolStatus>,
}

impl SpotNodePool {
    pub fn new(name: &str, namespace: &str, spec: SpotNodePoolSpec) -> Self {
        Self {
            api_version: ApiVersion::Default.to_string(),
            kind: SPOT_NODE_POOL_KIND.to_string(),
            metadata: ObjectMeta::named(name, namespace),
            spec,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotNodePoolSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server_class: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cloud_space: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<i64>,

    #[serde(default, deserialize_with = "quantity", skip_serializing_if = "String::is_empty")]
    pub bid_price: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaling: Option<Autoscaling>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_annotations: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_taints: Vec<Taint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotNodePoolStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bid_status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub won_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_metadata_status: Option<CustomMetadataStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomMetadataStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub annotations: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub labels: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub taints: String,
}

pub type SpotNodePoolList = ResourceList<SpotNodePool>;

// On-demand node pools

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandNodePool {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: OnDemandNodePoolSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OnDemandNodePoolStatus>,
}

impl OnDemandNodePool {
    pub fn new(name: &str, namespace: &str, spec: OnDemandNodePoolSpec) -> Self {
        Self {
            api_version: ApiVersion::Default.to_string(),
            kind: ON_DEMAND_NODE_POOL_KIND.to_string(),
            metadata: ObjectMeta::named(name, namespace),
            spec,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandNodePoolSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server_class: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cloud_space: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<i64>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_annotations: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_taints: Vec<Taint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandNodePoolStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_count: Option<i64>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reserved_status: String,
}

pub type OnDemandNodePoolList = ResourceList<OnDemandNodePool>;

impl SpotClient {
    pub async fn list_spot_node_pools(
        &self,
        ctx: &Context,
        namespace: &str,
    ) -> Result<SpotNodePoolList, ApiError> {
        require_namespace(namespace)?;
        self.list(ctx, &namespaced(namespace, SPOT_COLLECTION), ApiVersion::Default)
            .await
    }

    pub async fn get_spot_node_pool(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
    ) -> Result<SpotNodePool, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "spot node pool")?;
        self.get(ctx, &namespaced_item(namespace, SPOT_COLLECTION, name), ApiVersion::Default)
            .await
    }

    pub async fn create_spot_node_pool(
        &self,
        ctx: &Context,
        namespace: &str,
        pool: &SpotNodePool,
    ) -> Result<SpotNodePool, ApiError> {
        require_namespace(namespace)?;
        require_name(&pool.metadata.name, "spot node pool")?;
        self.create(ctx, &namespaced(namespace, SPOT_COLLECTION), pool, ApiVersion::Default)
            .await
    }

    pub async fn edit_spot_node_pool(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
        operations: &[PatchOperation],
    ) -> Result<SpotNodePool, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "spot node pool")?;
        require_operations(operations)?;
        self.edit(
            ctx,
            &namespaced_item(namespace, SPOT_COLLECTION, name),
            operations,
            ApiVersion::Default,
        )
        .await
    }

    pub async fn delete_spot_node_pool(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
    ) -> Result<DeleteResponse, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "spot node pool")?;
        self.delete(
            ctx,
            &namespaced_item(namespace, SPOT_COLLECTION, name),
            ApiVersion::Default,
            SPOT_NODE_POOL_KIND,
        )
        .await
    }

    /// Deletes every spot node pool in `namespace` with one collection DELETE.
    pub async fn delete_all_spot_node_pools(
        &self,
        ctx: &Context,
        namespace: &str,
    ) -> Result<DeleteResponse, ApiError> {
        require_namespace(namespace)?;
        self.delete(
            ctx,
            &namespaced(namespace, SPOT_COLLECTION),
            ApiVersion::Default,
            "SpotNodePools",
        )
        .await
    }

    pub async fn list_on_demand_node_pools(
        &self,
        ctx: &Context,
        namespace: &str,
    ) -> Result<OnDemandNodePoolList, ApiError> {
        require_namespace(namespace)?;
        self.list(ctx, &namespaced(namespace, ON_DEMAND_COLLECTION), ApiVersion::Default)
            .await
    }

    pub async fn get_on_demand_node_pool(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
    ) -> Result<OnDemandNodePool, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "on-demand node pool")?;
        self.get(
            ctx,
            &namespaced_item(namespace, ON_DEMAND_COLLECTION, name),
            ApiVersion::Default,
        )
        .await
    }

    pub async fn create_on_demand_node_pool(
        &self,
        ctx: &Context,
        namespace: &str,
        pool: &OnDemandNodePool,
    ) -> Result<OnDemandNodePool, ApiError> {
        require_namespace(namespace)?;
        require_name(&pool.metadata.name, "on-demand node pool")?;
        self.create(ctx, &namespaced(namespace, ON_DEMAND_COLLECTION), pool, ApiVersion::Default)
            .await
    }

    pub async fn edit_on_demand_node_pool(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
        operations: &[PatchOperation],
    ) -> Result<OnDemandNodePool, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "on-demand node pool")?;
        require_operations(operations)?;
        self.edit(
            ctx,
            &namespaced_item(namespace, ON_DEMAND_COLLECTION, name),
            operations,
            ApiVersion::Default,
        )
        .await
    }

    pub async fn delete_on_demand_node_pool(
        &self,
        ctx: &Context,
        namespace: &str,
        name: &str,
    ) -> Result<DeleteResponse, ApiError> {
        require_namespace(namespace)?;
        require_name(name, "on-demand node pool")?;
        self.delete(
            ctx,
            &namespaced_item(namespace, ON_DEMAND_COLLECTION, name),
            ApiVersion::Default,
            ON_DEMAND_NODE_POOL_KIND,
        )
        .await
    }
}
