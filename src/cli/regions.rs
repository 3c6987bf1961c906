//
//  spotctl
//  cli/regions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Region commands
//!
//! Regions are the locations Spot can place a cloudspace in. They are global
//! and need no namespace.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::api::resources::Region;
use crate::api::Context;
use crate::output::{or_placeholder, truncate, TableOutput, NOT_AVAILABLE};

use super::GlobalOptions;

/// List and inspect regions
#[derive(Args, Debug)]
pub struct RegionsCommand {
    #[command(subcommand)]
    pub command: RegionsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RegionsSubcommand {
    /// List all regions
    #[command(visible_alias = "ls")]
    List,

    /// Show a single region
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Region name, e.g. uk-lon-1
    pub name: String,
}

impl TableOutput for Region {
    fn headers(wide: bool) -> Vec<&'static str> {
        let mut headers = vec!["NAME", "COUNTRY", "PROVIDER"];
        if wide {
            headers.extend(["PROVIDER REGION", "DESCRIPTION"]);
        }
        headers
    }

    fn row(&self, wide: bool, _color: bool) -> Vec<String> {
        let mut row = vec![
            or_placeholder(&self.metadata.name, NOT_AVAILABLE),
            or_placeholder(&self.spec.country, NOT_AVAILABLE),
            or_placeholder(&self.spec.provider.provider_type, NOT_AVAILABLE),
        ];
        if wide {
            row.push(or_placeholder(
                &self.spec.provider.provider_region_name,
                NOT_AVAILABLE,
            ));
            row.push(truncate(
                &or_placeholder(&self.spec.description, NOT_AVAILABLE),
                50,
            ));
        }
        row
    }
}

impl RegionsCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &Context) -> Result<()> {
        let session = global.session()?;

        match &self.command {
            RegionsSubcommand::List => {
                let regions = session
                    .client
                    .list_regions(ctx)
                    .await
                    .context("failed to list regions")?;
                session.writer.write_list(&regions.items, "No regions found")
            }
            RegionsSubcommand::Get(args) => {
                let region = session
                    .client
                    .get_region(ctx, &args.name)
                    .await
                    .with_context(|| format!("failed to get region '{}'", args.name))?;
                session.writer.write(&region)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_row_placeholders() {
        let region: Region = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "us-central-dfw-1" },
            "spec": { "country": "USA" }
        }))
        .unwrap();

        assert_eq!(region.row(false, false), vec!["us-central-dfw-1", "USA", "N/A"]);
        let wide = region.row(true, false);
        assert_eq!(wide.len(), Region::headers(true).len());
        assert_eq!(wide[4], "N/A");
    }
}
