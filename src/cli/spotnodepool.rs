//
//  spotctl
//  cli/spotnodepool.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Spot node pool commands
//!
//! A spot node pool bids for servers of one server class and joins them to
//! a cloudspace.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::api::resources::{Autoscaling, SpotNodePool, SpotNodePoolSpec};
use crate::api::{ApiError, Context};
use crate::output::{format_bool, format_status, opt_or_placeholder, or_placeholder, TableOutput, NONE};

use super::{confirm, prepare_patch, report_delete, GlobalOptions, Session};

/// Manage spot node pools
#[derive(Args, Debug)]
pub struct SpotNodePoolCommand {
    #[command(subcommand)]
    pub command: SpotNodePoolSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SpotNodePoolSubcommand {
    /// List spot node pools in a namespace
    #[command(visible_alias = "ls")]
    List,

    /// Show a single spot node pool
    Get(NameArgs),

    /// Create a spot node pool from flags or a JSON spec file
    #[command(after_help = "Examples:\n  \
        spotctl spotnodepool create my-pool -n org-abc123 --server-class gp.vs1.large-lon --cloudspace prod --desired 3\n  \
        spotctl spotnodepool create my-pool -n org-abc123 --server-class gp.vs1.large-lon --cloudspace prod \
        --autoscaling --autoscaling-min-nodes 1 --autoscaling-max-nodes 10")]
    Create(CreateArgs),

    /// Edit a spot node pool with JSON Patch operations
    Edit(EditArgs),

    /// Delete a spot node pool
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Delete every spot node pool in a namespace
    DeleteAll(DeleteAllArgs),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Spot node pool name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Spot node pool name
    pub name: String,

    /// Path to a JSON file containing the spot node pool spec
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Server class for the pool (required unless using --file)
    #[arg(long)]
    pub server_class: Option<String>,

    /// Cloudspace the pool joins (required unless using --file)
    #[arg(long)]
    pub cloudspace: Option<String>,

    /// Desired number of nodes (required unless using --file or --autoscaling)
    #[arg(long)]
    pub desired: Option<u32>,

    /// Enable autoscaling
    #[arg(long)]
    pub autoscaling: bool,

    /// Minimum number of nodes when autoscaling
    #[arg(long, requires = "autoscaling")]
    pub autoscaling_min_nodes: Option<u32>,

    /// Maximum number of nodes when autoscaling
    #[arg(long, requires = "autoscaling")]
    pub autoscaling_max_nodes: Option<u32>,

    /// Maximum hourly bid price, e.g. 0.50
    #[arg(long)]
    pub bid_price: Option<String>,
}

#[derive(Args, Debug)]
#[command(after_help = "The patch file holds a JSON array of RFC 6902 operations:\n\n  \
    [{\"op\": \"replace\", \"path\": \"/spec/desired\", \"value\": 5},\n   \
    {\"op\": \"add\", \"path\": \"/spec/autoscaling/maxNodes\", \"value\": 10}]\n\n\
    Supported operations are: add, remove, replace, move, copy, test.")]
pub struct EditArgs {
    /// Spot node pool name
    pub name: String,

    /// Path to the JSON file containing patch operations
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', visible_alias = "confirm")]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Spot node pool name
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', visible_alias = "confirm")]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct DeleteAllArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y', visible_alias = "confirm")]
    pub yes: bool,
}

impl TableOutput for SpotNodePool {
    fn headers(wide: bool) -> Vec<&'static str> {
        let mut headers = vec!["NAME", "NAMESPACE", "SERVER CLASS", "DESIRED", "BID STATUS", "WON COUNT"];
        if wide {
            headers.extend(["CLOUD SPACE", "BID PRICE", "AUTOSCALING", "MIN NODES", "MAX NODES"]);
        }
        headers
    }

    fn row(&self, wide: bool, color: bool) -> Vec<String> {
        let spec = &self.spec;
        let status = self.status.as_ref();
        let mut row = vec![
            self.metadata.name.clone(),
            self.metadata.namespace.clone(),
            or_placeholder(&spec.server_class, NONE),
            opt_or_placeholder(spec.desired, NONE),
            format_status(
                &opt_or_placeholder(status.map(|s| s.bid_status.as_str()).filter(|s| !s.is_empty()), NONE),
                color,
            ),
            opt_or_placeholder(status.and_then(|s| s.won_count), NONE),
        ];
        if wide {
            let autoscaling = spec.autoscaling.as_ref();
            row.extend([
                or_placeholder(&spec.cloud_space, NONE),
                or_placeholder(&spec.bid_price, NONE),
                autoscaling
                    .map(|a| format_bool(a.enabled, color))
                    .unwrap_or_else(|| NONE.to_string()),
                opt_or_placeholder(autoscaling.and_then(|a| a.min_nodes), NONE),
                opt_or_placeholder(autoscaling.and_then(|a| a.max_nodes), NONE),
            ]);
        }
        row
    }
}

impl CreateArgs {
    /// The pool to send, from the spec file or from flags.
    fn build(&self, namespace: &str) -> Result<SpotNodePool> {
        let spec = match &self.file {
            Some(path) => load_spec(path)?,
            None => {
                let server_class = self.server_class.clone().ok_or_else(|| {
                    ApiError::validation("server-class is required (use --server-class flag or --file)")
                })?;
                let cloud_space = self.cloudspace.clone().ok_or_else(|| {
                    ApiError::validation("cloudspace is required (use --cloudspace flag or --file)")
                })?;
                let desired = self.desired.filter(|d| *d > 0);
                if desired.is_none() && !self.autoscaling {
                    return Err(ApiError::validation(
                        "desired is required and must be greater than 0 (use --desired flag or --file)",
                    )
                    .into());
                }
                if let (Some(min), Some(max)) = (self.autoscaling_min_nodes, self.autoscaling_max_nodes) {
                    if min > max {
                        return Err(ApiError::validation(format!(
                            "autoscaling-min-nodes ({min}) cannot exceed autoscaling-max-nodes ({max})"
                        ))
                        .into());
                    }
                }

                SpotNodePoolSpec {
                    server_class,
                    cloud_space,
                    desired: desired.map(i64::from),
                    bid_price: self.bid_price.clone().unwrap_or_default(),
                    autoscaling: self.autoscaling.then(|| Autoscaling {
                        enabled: true,
                        min_nodes: self.autoscaling_min_nodes.filter(|n| *n > 0).map(i64::from),
                        max_nodes: self.autoscaling_max_nodes.filter(|n| *n > 0).map(i64::from),
                    }),
                    ..Default::default()
                }
            }
        };
        Ok(SpotNodePool::new(&self.name, namespace, spec))
    }
}

fn load_spec(path: &Path) -> Result<SpotNodePoolSpec> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    let spec = serde_json::from_str(&content).map_err(|e| {
        ApiError::validation(format!("invalid spot node pool spec in {}: {}", path.display(), e))
    })?;
    Ok(spec)
}

impl SpotNodePoolCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &Context) -> Result<()> {
        let session = global.session()?;
        let namespace = session.namespace()?;

        match &self.command {
            SpotNodePoolSubcommand::List => {
                let pools = session
                    .client
                    .list_spot_node_pools(ctx, &namespace)
                    .await
                    .context("failed to list spot node pools")?;
                session.writer.write_list(
                    &pools.items,
                    &Session::empty_message("spot node pools", &namespace),
                )
            }
            SpotNodePoolSubcommand::Get(args) => {
                let pool = session
                    .client
                    .get_spot_node_pool(ctx, &namespace, &args.name)
                    .await
                    .with_context(|| format!("failed to get spot node pool '{}'", args.name))?;
                session.writer.write(&pool)
            }
            SpotNodePoolSubcommand::Create(args) => {
                let pool = args.build(&namespace)?;
                let created = session
                    .client
                    .create_spot_node_pool(ctx, &namespace, &pool)
                    .await
                    .context("failed to create spot node pool")?;
                session.writer.write(&created)
            }
            SpotNodePoolSubcommand::Edit(args) => {
                let target = format!("spot node pool '{}'", args.name);
                let Some(operations) = prepare_patch(&args.file, &target, args.yes, &session.writer)? else {
                    return Ok(());
                };
                let updated = session
                    .client
                    .edit_spot_node_pool(ctx, &namespace, &args.name, &operations)
                    .await
                    .context("failed to edit spot node pool")?;
                session.writer.write(&updated)
            }
            SpotNodePoolSubcommand::Delete(args) => {
                let prompt = format!(
                    "Are you sure you want to delete spot node pool '{}' in namespace '{}'?",
                    args.name, namespace
                );
                if !confirm(&prompt, args.yes)? {
                    println!("Delete cancelled");
                    return Ok(());
                }
                let response = session
                    .client
                    .delete_spot_node_pool(ctx, &namespace, &args.name)
                    .await
                    .context("failed to delete spot node pool")?;
                report_delete(
                    &session.writer,
                    &response,
                    &format!(
                        "Spot node pool '{}' deleted successfully from namespace '{}'",
                        args.name, namespace
                    ),
                );
                Ok(())
            }
            SpotNodePoolSubcommand::DeleteAll(args) => {
                self.delete_all(&session, ctx, &namespace, args).await
            }
        }
    }

    /// Lists what will go, asks once, then deletes the whole collection.
    async fn delete_all(
        &self,
        session: &Session,
        ctx: &Context,
        namespace: &str,
        args: &DeleteAllArgs,
    ) -> Result<()> {
        let pools = session
            .client
            .list_spot_node_pools(ctx, namespace)
            .await
            .context("failed to list spot node pools")?;
        if pools.is_empty() {
            session.writer.write_info(&Session::empty_message("spot node pools", namespace));
            return Ok(());
        }

        session.writer.write_list(&pools.items, "")?;
        let count = pools.len();
        eprintln!("\nFound {} spot node pool(s) to delete.", count);

        let prompt = format!(
            "Are you sure you want to delete ALL {} spot node pool(s) in namespace '{}'?",
            count, namespace
        );
        if !confirm(&prompt, args.yes)? {
            println!("Delete cancelled");
            return Ok(());
        }

        let response = session
            .client
            .delete_all_spot_node_pools(ctx, namespace)
            .await
            .context("failed to delete all spot node pools")?;
        report_delete(
            &session.writer,
            &response,
            &format!(
                "Successfully deleted all {} spot node pool(s) from namespace '{}'",
                count, namespace
            ),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_args() -> CreateArgs {
        CreateArgs {
            name: "pool-a".into(),
            file: None,
            server_class: Some("gp.vs1.large-lon".into()),
            cloudspace: Some("prod".into()),
            desired: Some(3),
            autoscaling: false,
            autoscaling_min_nodes: None,
            autoscaling_max_nodes: None,
            bid_price: Some("0.50".into()),
        }
    }

    #[test]
    fn test_build_from_flags() {
        let pool = create_args().build("org-abc").unwrap();
        assert_eq!(pool.kind, "SpotNodePool");
        assert_eq!(pool.spec.desired, Some(3));
        assert_eq!(pool.spec.bid_price, "0.50");
        assert!(pool.spec.autoscaling.is_none());
    }

    #[test]
    fn test_build_requires_desired_without_autoscaling() {
        let mut args = create_args();
        args.desired = Some(0);
        let err = args.build("org-abc").unwrap_err();
        assert!(err.to_string().contains("desired is required"));
    }

    #[test]
    fn test_build_with_autoscaling() {
        let mut args = create_args();
        args.desired = None;
        args.autoscaling = true;
        args.autoscaling_min_nodes = Some(1);
        args.autoscaling_max_nodes = Some(10);

        let pool = args.build("org-abc").unwrap();
        let autoscaling = pool.spec.autoscaling.unwrap();
        assert!(autoscaling.enabled);
        assert_eq!(autoscaling.min_nodes, Some(1));
        assert_eq!(autoscaling.max_nodes, Some(10));
        assert_eq!(pool.spec.desired, None);
    }

    #[test]
    fn test_build_rejects_inverted_bounds() {
        let mut args = create_args();
        args.autoscaling = true;
        args.autoscaling_min_nodes = Some(5);
        args.autoscaling_max_nodes = Some(2);
        assert!(args.build("org-abc").is_err());
    }

    #[test]
    fn test_row_matches_headers() {
        let pool = create_args().build("org-abc").unwrap();
        assert_eq!(pool.row(true, false).len(), SpotNodePool::headers(true).len());
        let row = pool.row(false, false);
        assert_eq!(row[3], "3");
        assert_eq!(row[4], "<none>");
    }
}
