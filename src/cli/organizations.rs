//
//  spotctl
//  cli/organizations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization commands
//!
//! An organization's namespace is what every cloudspace and node pool
//! command takes as `--namespace`.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::api::resources::Organization;
use crate::api::Context;
use crate::output::{or_placeholder, TableOutput, NONE};

use super::GlobalOptions;

/// List organizations
#[derive(Args, Debug)]
pub struct OrganizationsCommand {
    #[command(subcommand)]
    pub command: OrganizationsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OrganizationsSubcommand {
    /// List the organizations the refresh token can access
    #[command(visible_alias = "ls")]
    List,
}

impl TableOutput for Organization {
    fn headers(_wide: bool) -> Vec<&'static str> {
        vec!["ID", "NAME", "DISPLAY NAME", "NAMESPACE"]
    }

    fn row(&self, _wide: bool, _color: bool) -> Vec<String> {
        vec![
            or_placeholder(&self.id, NONE),
            or_placeholder(&self.name, NONE),
            or_placeholder(&self.display_name, NONE),
            or_placeholder(&self.metadata.namespace, NONE),
        ]
    }
}

impl OrganizationsCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &Context) -> Result<()> {
        let session = global.session()?;

        match &self.command {
            OrganizationsSubcommand::List => {
                let orgs = session
                    .client
                    .list_organizations(ctx)
                    .await
                    .context("failed to list organizations")?;
                session
                    .writer
                    .write_list(&orgs.organizations, "No organizations found")
            }
        }
    }
}
