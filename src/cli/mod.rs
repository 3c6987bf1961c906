//
//  spotctl
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod cloudspaces;
mod completion;
mod config;
mod ondemandnodepool;
mod organizations;
mod regions;
mod serverclasses;
mod spotnodepool;

pub use cloudspaces::CloudSpacesCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use ondemandnodepool::OnDemandNodePoolCommand;
pub use organizations::OrganizationsCommand;
pub use regions::RegionsCommand;
pub use serverclasses::ServerClassesCommand;
pub use spotnodepool::SpotNodePoolCommand;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::common::DeleteResponse;
use crate::api::patch::{
    display_patch_operations, format_patch_operations, load_patch_operations, PatchOperation,
};
use crate::api::{ApiError, SpotClient};
use crate::config::{Config, Settings, SettingsOverrides};
use crate::interactive;
use crate::output::{OutputFormat, OutputWriter};

/// spotctl - Manage Rackspace Spot from the command line
#[derive(Parser, Debug)]
#[command(
    name = "spotctl",
    version,
    about = "Manage Rackspace Spot from the command line",
    long_about = "spotctl is a CLI for the Rackspace Spot API.\n\n\
                  It manages cloudspaces and node pools and browses regions, \
                  server classes and organizations.",
    propagate_version = true,
    after_help = "Use 'spotctl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Refresh token used to obtain access tokens
    #[arg(long, global = true, env = "SPOTCTL_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Base URL of the Spot API
    #[arg(long, global = true, env = "SPOTCTL_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, env = "SPOTCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Namespace (organization) to operate in
    #[arg(long, short = 'n', global = true, env = "SPOTCTL_NAMESPACE")]
    pub namespace: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SPOTCTL_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SPOTCTL_DEBUG")]
    pub debug: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List and inspect regions
    Regions(RegionsCommand),

    /// List and inspect server classes
    #[command(visible_alias = "sc")]
    Serverclasses(ServerClassesCommand),

    /// List organizations
    #[command(visible_alias = "orgs")]
    Organizations(OrganizationsCommand),

    /// Manage cloudspaces
    #[command(visible_alias = "cs")]
    Cloudspaces(CloudSpacesCommand),

    /// Manage spot node pools
    #[command(visible_alias = "snp")]
    Spotnodepool(SpotNodePoolCommand),

    /// Inspect on-demand node pools
    #[command(visible_alias = "odnp")]
    Ondemandnodepool(OnDemandNodePoolCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

impl GlobalOptions {
    pub fn config_path(&self) -> Result<PathBuf> {
        Config::resolve_path(self.config.as_deref())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            refresh_token: self.refresh_token.clone(),
            base_url: self.base_url.clone(),
            namespace: self.namespace.clone(),
            timeout: self.timeout,
            debug: self.debug,
            output: self.output.map(|o| o.to_string()),
        }
    }

    /// Effective settings: defaults, then config file, then env and flags.
    pub fn settings(&self) -> Result<Settings> {
        let config = self.load_config()?;
        Ok(Settings::resolve(&config, &self.overrides()))
    }

    /// Builds everything an API command needs; fails before any network use.
    pub fn session(&self) -> Result<Session> {
        let settings = self.settings()?;
        settings.validate()?;

        let format = output_format(&settings)?;
        let client = SpotClient::new(&settings.client_config())?;
        debug!(base_url = %settings.base_url, output = %format, "session ready");

        Ok(Session {
            settings,
            client,
            writer: OutputWriter::new(format),
        })
    }
}

fn output_format(settings: &Settings) -> Result<OutputFormat> {
    match settings.output.as_deref() {
        Some(value) => value
            .parse()
            .with_context(|| "invalid output format in configuration"),
        None => Ok(OutputFormat::default()),
    }
}

/// A configured client plus where its results go.
pub struct Session {
    pub settings: Settings,
    pub client: SpotClient,
    pub writer: OutputWriter,
}

impl Session {
    pub fn namespace(&self) -> Result<String, ApiError> {
        self.settings.namespace(None)
    }

    /// Message for an empty list in `namespace`.
    pub fn empty_message(kind: &str, namespace: &str) -> String {
        format!("No {} found in namespace {}", kind, namespace)
    }
}

/// Returns true when the user agreed, or immediately when `yes` is set.
///
/// Without a terminal there is nobody to ask, so the command fails instead
/// of silently proceeding.
pub(crate) fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !interactive::can_prompt() {
        return Err(ApiError::validation(
            "confirmation required: re-run with --yes to skip the prompt",
        )
        .into());
    }
    interactive::prompt_confirm(prompt)
}

/// Loads and shows a patch file, then asks before it is applied.
///
/// `None` means there is nothing to send: the file was empty or the user
/// declined.
pub(crate) fn prepare_patch(
    file: &Path,
    target: &str,
    yes: bool,
    writer: &OutputWriter,
) -> Result<Option<Vec<PatchOperation>>> {
    let operations = load_patch_operations(file)?;
    if operations.is_empty() {
        writer.write_info("No patch operations to apply.");
        return Ok(None);
    }

    // keep stdout parseable for json/yaml
    if writer.format().is_tabular() {
        display_patch_operations(&operations);
    } else {
        eprint!("{}", format_patch_operations(&operations));
    }

    if !confirm(&format!("Do you want to apply these patches to {}?", target), yes)? {
        println!("Patch operation cancelled.");
        return Ok(None);
    }
    Ok(Some(operations))
}

/// Prints the outcome of a delete the way the API reported it.
///
/// A body without a status (the deleted object itself) counts as success.
pub(crate) fn report_delete(writer: &OutputWriter, response: &DeleteResponse, success: &str) {
    if response.is_success() || response.status.is_empty() {
        writer.write_success(success);
    } else {
        writer.write_warning(&format!(
            "Delete operation completed with status: {}",
            response.status
        ));
        if !response.message.is_empty() {
            writer.write_warning(&format!("Message: {}", response.message));
        }
    }
}
