//
//  spotctl
//  cli/cloudspaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloudspace commands
//!
//! A cloudspace is a managed Kubernetes control plane. Node pools attach to
//! it by name.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::api::resources::{CloudSpace, CloudSpaceSpec};
use crate::api::{ApiError, Context};
use crate::output::{format_bool, format_status, or_placeholder, TableOutput, NONE};

use super::{confirm, prepare_patch, report_delete, GlobalOptions, Session};

/// Manage cloudspaces
#[derive(Args, Debug)]
pub struct CloudSpacesCommand {
    #[command(subcommand)]
    pub command: CloudSpacesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CloudSpacesSubcommand {
    /// List cloudspaces in a namespace
    #[command(visible_alias = "ls")]
    List,

    /// Show a single cloudspace
    Get(NameArgs),

    /// Create a cloudspace from flags or a JSON spec file
    #[command(after_help = "Examples:\n  \
        spotctl cloudspaces create my-cloudspace -n org-abc123 --region uk-lon-1 --kubernetes-version 1.31.1\n  \
        spotctl cloudspaces create my-cloudspace -n org-abc123 --file spec.json --cloud custom")]
    Create(CreateArgs),

    /// Edit a cloudspace with JSON Patch operations
    Edit(EditArgs),

    /// Delete a cloudspace
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Cloudspace name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Cloudspace name
    pub name: String,

    /// Path to a JSON file containing the cloudspace spec
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Region to deploy the cloudspace in (required unless using --file)
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Kubernetes version (required unless using --file)
    #[arg(long)]
    pub kubernetes_version: Option<String>,

    /// Webhook URL for notifications
    #[arg(long)]
    pub webhook: Option<String>,

    /// Enable a highly available control plane
    #[arg(long)]
    pub ha_control_plane: bool,

    /// Container Network Interface to use
    #[arg(long, default_value = "cilium")]
    pub cni: String,

    /// Cloud provider; also overrides the value from --file
    #[arg(long, default_value = "default")]
    pub cloud: String,
}

#[derive(Args, Debug)]
#[command(after_help = "The patch file holds a JSON array of RFC 6902 operations:\n\n  \
    [{\"op\": \"replace\", \"path\": \"/spec/kubernetesVersion\", \"value\": \"1.31.1\"}]\n\n\
    Supported operations are: add, remove, replace, move, copy, test.")]
pub struct EditArgs {
    /// Cloudspace name
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
    /// Cloudspace name
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', visible_alias = "confirm")]
    pub yes: bool,
}

impl TableOutput for CloudSpace {
    fn headers(wide: bool) -> Vec<&'static str> {
        let mut headers = vec!["NAME", "NAMESPACE", "REGION", "PHASE", "HEALTH"];
        if wide {
            headers.extend(["K8S VERSION", "CNI", "DEPLOYMENT TYPE", "HA CONTROL PLANE"]);
        }
        headers
    }

    fn row(&self, wide: bool, color: bool) -> Vec<String> {
        let status = self.status.clone().unwrap_or_default();
        let mut row = vec![
            self.metadata.name.clone(),
            self.metadata.namespace.clone(),
            or_placeholder(&self.spec.region, NONE),
            format_status(&or_placeholder(&status.phase, NONE), color),
            format_status(&or_placeholder(&status.health, NONE), color),
        ];
        if wide {
            row.extend([
                or_placeholder(&status.current_kubernetes_version, NONE),
                or_placeholder(&self.spec.cni, NONE),
                or_placeholder(&self.spec.deployment_type, NONE),
                format_bool(self.spec.ha_control_plane, color),
            ]);
        }
        row
    }
}

impl CreateArgs {
    /// The cloudspace to send, from the spec file or from flags.
    fn build(&self, namespace: &str) -> Result<CloudSpace> {
        let spec = match &self.file {
            Some(path) => {
                let mut spec = load_spec(path)?;
                spec.cloud = self.cloud.clone();
                spec
            }
            None => {
                let region = self.region.clone().ok_or_else(|| {
                    ApiError::validation("region is required (use --region flag or --file)")
                })?;
                let kubernetes_version = self.kubernetes_version.clone().ok_or_else(|| {
                    ApiError::validation(
                        "kubernetes version is required (use --kubernetes-version flag or --file)",
                    )
                })?;
                CloudSpaceSpec {
                    region,
                    kubernetes_version,
                    webhook: self.webhook.clone().unwrap_or_default(),
                    ha_control_plane: self.ha_control_plane,
                    cloud: self.cloud.clone(),
                    cni: self.cni.clone(),
                    ..Default::default()
                }
            }
        };
        Ok(CloudSpace::new(&self.name, namespace, spec))
    }
}

fn load_spec(path: &Path) -> Result<CloudSpaceSpec> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    let spec = serde_json::from_str(&content).map_err(|e| {
        ApiError::validation(format!("invalid cloudspace spec in {}: {}", path.display(), e))
    })?;
    Ok(spec)
}

impl CloudSpacesCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &Context) -> Result<()> {
        let session = global.session()?;
        let namespace = session.namespace()?;

        match &self.command {
            CloudSpacesSubcommand::List => self.list(&session, ctx, &namespace).await,
            CloudSpacesSubcommand::Get(args) => {
                let cloudspace = session
                    .client
                    .get_cloudspace(ctx, &namespace, &args.name)
                    .await
                    .with_context(|| format!("failed to get cloudspace '{}'", args.name))?;
                session.writer.write(&cloudspace)
            }
            CloudSpacesSubcommand::Create(args) => {
                let cloudspace = args.build(&namespace)?;
                let created = session
                    .client
                    .create_cloudspace(ctx, &namespace, &cloudspace)
                    .await
                    .context("failed to create cloudspace")?;
                session.writer.write(&created)
            }
            CloudSpacesSubcommand::Edit(args) => self.edit(&session, ctx, &namespace, args).await,
            CloudSpacesSubcommand::Delete(args) => {
                let prompt = format!(
                    "Are you sure you want to delete cloudspace '{}' in namespace '{}'?",
                    args.name, namespace
                );
                if !confirm(&prompt, args.yes)? {
                    println!("Delete cancelled");
                    return Ok(());
                }
                let response = session
                    .client
                    .delete_cloudspace(ctx, &namespace, &args.name)
                    .await
                    .context("failed to delete cloudspace")?;
                report_delete(
                    &session.writer,
                    &response,
                    &format!(
                        "Cloudspace '{}' deleted successfully from namespace '{}'",
                        args.name, namespace
                    ),
                );
                Ok(())
            }
        }
    }

    async fn list(&self, session: &Session, ctx: &Context, namespace: &str) -> Result<()> {
        let cloudspaces = session
            .client
            .list_cloudspaces(ctx, namespace)
            .await
            .context("failed to list cloudspaces")?;
        session.writer.write_list(
            &cloudspaces.items,
            &Session::empty_message("cloudspaces", namespace),
        )
    }

    async fn edit(
        &self,
        session: &Session,
        ctx: &Context,
        namespace: &str,
        args: &EditArgs,
    ) -> Result<()> {
        let target = format!("cloudspace '{}'", args.name);
        let Some(operations) = prepare_patch(&args.file, &target, args.yes, &session.writer)? else {
            return Ok(());
        };
        let updated = session
            .client
            .edit_cloudspace(ctx, namespace, &args.name, &operations)
            .await
            .context("failed to edit cloudspace")?;
        session.writer.write(&updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_args(file: Option<PathBuf>) -> CreateArgs {
        CreateArgs {
            name: "prod".into(),
            file,
            region: Some("uk-lon-1".into()),
            kubernetes_version: Some("1.31.1".into()),
            webhook: None,
            ha_control_plane: true,
            cni: "cilium".into(),
            cloud: "default".into(),
        }
    }

    #[test]
    fn test_build_from_flags() {
        let cloudspace = create_args(None).build("org-abc").unwrap();
        assert_eq!(cloudspace.kind, "CloudSpace");
        assert_eq!(cloudspace.metadata.namespace, "org-abc");
        assert_eq!(cloudspace.spec.region, "uk-lon-1");
        assert!(cloudspace.spec.ha_control_plane);
        assert_eq!(cloudspace.spec.cni, "cilium");
    }

    #[test]
    fn test_build_requires_region_without_file() {
        let mut args = create_args(None);
        args.region = None;
        let err = args.build("org-abc").unwrap_err();
        assert!(err.to_string().contains("region is required"));
    }

    #[test]
    fn test_build_from_file_overrides_cloud() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"region": "us-east-iad-1", "kubernetesVersion": "1.30.2", "cloud": "other"}}"#
        )
        .unwrap();

        let mut args = create_args(Some(file.path().to_path_buf()));
        args.cloud = "custom".into();
        let cloudspace = args.build("org-abc").unwrap();
        assert_eq!(cloudspace.spec.region, "us-east-iad-1");
        assert_eq!(cloudspace.spec.kubernetes_version, "1.30.2");
        assert_eq!(cloudspace.spec.cloud, "custom");
    }

    #[test]
    fn test_cloudspace_row_without_status() {
        let cloudspace = create_args(None).build("org-abc").unwrap();
        let row = cloudspace.row(false, false);
        assert_eq!(row, vec!["prod", "org-abc", "uk-lon-1", "<none>", "<none>"]);
    }
}
