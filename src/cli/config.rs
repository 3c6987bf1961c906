//
//  spotctl
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for managing the configuration file:
//! showing, getting, setting and unsetting keys, printing its path and
//! creating it interactively.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use crate::api::{Context, SpotClient};
use crate::config::{Config, Settings, VALID_KEYS, VALID_OUTPUT_FORMATS};
use crate::interactive::{
    self, prompt_confirm_with_default, prompt_input_optional, prompt_password, select_with_default,
};
use crate::output::{write_json, write_yaml, OutputFormat};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show all configuration values (the refresh token is masked)
    #[command(visible_alias = "list")]
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset a configuration value
    Unset(UnsetArgs),

    /// Show configuration file path
    Path,

    /// Create the configuration file interactively
    Init,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    #[arg(value_parser = clap::builder::PossibleValuesParser::new(VALID_KEYS))]
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    #[arg(value_parser = clap::builder::PossibleValuesParser::new(VALID_KEYS))]
    pub key: String,

    /// Configuration value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key
    #[arg(value_parser = clap::builder::PossibleValuesParser::new(VALID_KEYS))]
    pub key: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &Context) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Show => self.show(global),
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::Path => self.path(global),
            ConfigSubcommand::Init => self.init(global, ctx).await,
        }
    }

    /// Show all configuration values
    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let config = Config::load_from(&path)?;
        let entries = config.display_entries();

        if let Some(format) = structured(global) {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.into()))
                .collect();
            return write_structured(format, &map);
        }

        println!();
        println!("{}", style(format!("Configuration ({})", path.display())).bold());
        println!("{}", "-".repeat(50));
        for (key, value) in entries {
            println!("  {}: {}", style(key).cyan(), value.as_deref().unwrap_or("-"));
        }
        println!();
        Ok(())
    }

    /// Get a configuration value
    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let value = config.get(&args.key);

        if let Some(format) = structured(global) {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            return write_structured(format, &result);
        }

        if let Some(v) = value {
            println!("{}", v);
        }
        Ok(())
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        config.set(&args.key, &args.value)?;
        config.save_to(&path)?;
        debug!(key = %args.key, path = %path.display(), "config key set");

        let shown = config
            .display_entries()
            .into_iter()
            .find(|(key, _)| *key == args.key)
            .and_then(|(_, value)| value)
            .unwrap_or_default();

        if let Some(format) = structured(global) {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": shown,
            });
            return write_structured(format, &result);
        }

        println!(
            "{} Set {} = {}",
            style("✓").green(),
            style(&args.key).cyan(),
            shown
        );
        Ok(())
    }

    /// Unset a configuration value
    fn unset(&self, args: &UnsetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        let was_set = config.unset(&args.key)?;
        if was_set {
            config.save_to(&path)?;
        }

        if let Some(format) = structured(global) {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "was_set": was_set,
            });
            return write_structured(format, &result);
        }

        if was_set {
            println!("{} Unset {}", style("✓").green(), style(&args.key).cyan());
        } else {
            println!("{} was not set", style(&args.key).cyan());
        }
        Ok(())
    }

    /// Show configuration file path
    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;

        if let Some(format) = structured(global) {
            let result = serde_json::json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
            });
            return write_structured(format, &result);
        }

        println!("{}", path.display());
        Ok(())
    }

    /// Walk the user through creating the configuration file.
    ///
    /// Once a refresh token is entered, organizations and regions are fetched
    /// so they can be picked from a list. If that fails the values are typed.
    async fn init(&self, global: &GlobalOptions, ctx: &Context) -> Result<()> {
        if !interactive::can_prompt() {
            bail!("config init needs an interactive terminal; use 'spotctl config set' instead");
        }

        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        if config.refresh_token.is_some()
            && !prompt_confirm_with_default(
                &format!("{} already has a refresh token. Replace it?", path.display()),
                false,
            )?
        {
            println!("Keeping existing configuration.");
            return Ok(());
        }

        let token = prompt_password("Refresh token (from the Spot console API Access page)")?;
        config.set("refresh-token", &token)?;

        let settings = Settings::resolve(&config, &Default::default());
        let client = SpotClient::new(&settings.client_config())?;

        match choose_namespace(&client, ctx).await {
            Some(namespace) => config.set("namespace", &namespace)?,
            None => {
                if let Some(namespace) = prompt_input_optional("Default namespace (optional)")? {
                    config.set("namespace", &namespace)?;
                }
            }
        }

        match choose_region(&client, ctx).await {
            Some(region) => config.set("region", &region)?,
            None => {
                if let Some(region) = prompt_input_optional("Default region (optional)")? {
                    config.set("region", &region)?;
                }
            }
        }

        let output = select_with_default("Default output format", VALID_OUTPUT_FORMATS, 0)?;
        config.set("output", VALID_OUTPUT_FORMATS[output])?;

        config.save_to(&path)?;
        println!(
            "{} Configuration written to {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
        Ok(())
    }
}

/// Picks a namespace from the organizations the token can see.
async fn choose_namespace(client: &SpotClient, ctx: &Context) -> Option<String> {
    let orgs = match client.list_organizations(ctx).await {
        Ok(list) => list.organizations,
        Err(e) => {
            eprintln!("{} could not list organizations: {}", style("warning:").yellow(), e);
            return None;
        }
    };
    let choices: Vec<String> = orgs
        .iter()
        .filter(|o| !o.metadata.namespace.is_empty())
        .map(|o| format!("{} ({})", o.metadata.namespace, o.display_name))
        .collect();
    if choices.is_empty() {
        return None;
    }
    let index = select_with_default("Default namespace", &choices, 0).ok()?;
    orgs.iter()
        .filter(|o| !o.metadata.namespace.is_empty())
        .nth(index)
        .map(|o| o.metadata.namespace.clone())
}

async fn choose_region(client: &SpotClient, ctx: &Context) -> Option<String> {
    let regions = match client.list_regions(ctx).await {
        Ok(list) => list.items,
        Err(e) => {
            eprintln!("{} could not list regions: {}", style("warning:").yellow(), e);
            return None;
        }
    };
    let names: Vec<&str> = regions.iter().map(|r| r.metadata.name.as_str()).collect();
    if names.is_empty() {
        return None;
    }
    let index = select_with_default("Default region", &names, 0).ok()?;
    names.get(index).map(|name| name.to_string())
}

fn structured(global: &GlobalOptions) -> Option<OutputFormat> {
    global.output.filter(|format| !format.is_tabular())
}

fn write_structured<T: serde::Serialize>(format: OutputFormat, value: &T) -> Result<()> {
    match format {
        OutputFormat::Yaml => write_yaml(value),
        _ => write_json(value),
    }
}
