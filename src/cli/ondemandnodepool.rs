//
//  spotctl
//  cli/ondemandnodepool.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! On-demand node pool commands

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::api::resources::OnDemandNodePool;
use crate::api::Context;
use crate::output::{format_status, opt_or_placeholder, or_placeholder, TableOutput, NONE};

use super::{GlobalOptions, Session};

/// Inspect on-demand node pools
#[derive(Args, Debug)]
pub struct OnDemandNodePoolCommand {
    #[command(subcommand)]
    pub command: OnDemandNodePoolSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OnDemandNodePoolSubcommand {
    /// List on-demand node pools in a namespace
    #[command(visible_alias = "ls")]
    List,

    /// Show a single on-demand node pool
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// On-demand node pool name
    pub name: String,
}

impl TableOutput for OnDemandNodePool {
    fn headers(wide: bool) -> Vec<&'static str> {
        let mut headers = vec!["NAME", "NAMESPACE", "SERVER CLASS", "DESIRED", "RESERVED", "STATUS"];
        if wide {
            headers.push("CLOUD SPACE");
        }
        headers
    }

    fn row(&self, wide: bool, color: bool) -> Vec<String> {
        let status = self.status.as_ref();
        let mut row = vec![
            self.metadata.name.clone(),
            self.metadata.namespace.clone(),
            or_placeholder(&self.spec.server_class, NONE),
            opt_or_placeholder(self.spec.desired, NONE),
            opt_or_placeholder(status.and_then(|s| s.reserved_count), NONE),
            format_status(
                &opt_or_placeholder(
                    status.map(|s| s.reserved_status.as_str()).filter(|s| !s.is_empty()),
                    NONE,
                ),
                color,
            ),
        ];
        if wide {
            row.push(or_placeholder(&self.spec.cloud_space, NONE));
        }
        row
    }
}

impl OnDemandNodePoolCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &Context) -> Result<()> {
        let session = global.session()?;
        let namespace = session.namespace()?;

        match &self.command {
            OnDemandNodePoolSubcommand::List => {
                let pools = session
                    .client
                    .list_on_demand_node_pools(ctx, &namespace)
                    .await
                    .context("failed to list on-demand node pools")?;
                session.writer.write_list(
                    &pools.items,
                    &Session::empty_message("on-demand node pools", &namespace),
                )
            }
            OnDemandNodePoolSubcommand::Get(args) => {
                let pool = session
                    .client
                    .get_on_demand_node_pool(ctx, &namespace, &args.name)
                    .await
                    .with_context(|| format!("failed to get on-demand node pool '{}'", args.name))?;
                session.writer.write(&pool)
            }
        }
    }
}
