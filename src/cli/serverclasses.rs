//
//  spotctl
//  cli/serverclasses.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server class commands

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::api::resources::ServerClass;
use crate::api::Context;
use crate::output::{format_status, opt_or_placeholder, or_placeholder, TableOutput, NOT_AVAILABLE};

use super::GlobalOptions;

/// List and inspect server classes
#[derive(Args, Debug)]
pub struct ServerClassesCommand {
    #[command(subcommand)]
    pub command: ServerClassesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ServerClassesSubcommand {
    /// List all server classes
    #[command(visible_alias = "ls")]
    List,

    /// Show a single server class
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Server class name, e.g. gp.vs1.large-lon
    pub name: String,
}

impl TableOutput for ServerClass {
    fn headers(wide: bool) -> Vec<&'static str> {
        let mut headers = vec!["NAME", "DISPLAY NAME", "REGION", "CPU", "MEMORY", "AVAILABILITY"];
        if wide {
            headers.extend([
                "CATEGORY",
                "FLAVOR TYPE",
                "PROVIDER TYPE",
                "ON-DEMAND COST",
                "SPOT PRICE",
                "HAMMER PRICE",
            ]);
        }
        headers
    }

    fn row(&self, wide: bool, color: bool) -> Vec<String> {
        let spec = &self.spec;
        let mut row = vec![
            or_placeholder(&self.metadata.name, NOT_AVAILABLE),
            or_placeholder(&spec.display_name, NOT_AVAILABLE),
            or_placeholder(&spec.region, NOT_AVAILABLE),
            or_placeholder(&spec.resources.cpu, NOT_AVAILABLE),
            or_placeholder(&spec.resources.memory, NOT_AVAILABLE),
            format_status(&or_placeholder(&spec.availability, NOT_AVAILABLE), color),
        ];
        if wide {
            let spot = self.status.spot_pricing.as_ref();
            row.extend([
                or_placeholder(&spec.category, NOT_AVAILABLE),
                or_placeholder(&spec.flavor_type, NOT_AVAILABLE),
                or_placeholder(&spec.provider.provider_type, NOT_AVAILABLE),
                opt_or_placeholder(
                    spec.on_demand_pricing
                        .as_ref()
                        .map(|p| p.cost.as_str())
                        .filter(|c| !c.is_empty()),
                    NOT_AVAILABLE,
                ),
                opt_or_placeholder(
                    spot.map(|s| s.market_price_per_hour.as_str())
                        .filter(|p| !p.is_empty()),
                    NOT_AVAILABLE,
                ),
                opt_or_placeholder(
                    spot.map(|s| s.hammer_price_per_hour.as_str())
                        .filter(|p| !p.is_empty()),
                    NOT_AVAILABLE,
                ),
            ]);
        }
        row
    }
}

impl ServerClassesCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &Context) -> Result<()> {
        let session = global.session()?;

        match &self.command {
            ServerClassesSubcommand::List => {
                let classes = session
                    .client
                    .list_server_classes(ctx)
                    .await
                    .context("failed to list server classes")?;
                session
                    .writer
                    .write_list(&classes.items, "No server classes found")
            }
            ServerClassesSubcommand::Get(args) => {
                let class = session
                    .client
                    .get_server_class(ctx, &args.name)
                    .await
                    .with_context(|| format!("failed to get server class '{}'", args.name))?;
                session.writer.write(&class)
            }
        }
    }
}
