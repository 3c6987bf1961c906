//
//  spotctl
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module loads and saves the `spotctl` configuration file and resolves
//! the effective [`Settings`] for a run.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/spotctl/config.toml`
//! - **macOS**: `~/Library/Application Support/spotctl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\spotctl\config.toml`
//!
//! `--config` or `SPOTCTL_CONFIG` points at a different file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! refresh-token = "v1.MzQ5..."
//! namespace = "org-abc123"
//! region = "uk-lon-1"
//! timeout = 30
//! output = "table"
//! ```
//!
//! ## Resolution Order
//!
//! Built-in defaults, then the config file, then `SPOTCTL_*` environment
//! variables, then command-line flags. The last two arrive together as
//! [`SettingsOverrides`] because clap reads both.

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::api::common::ApiError;
use crate::auth::{mask_token, OAUTH_URL};

/// Keys accepted by `config get/set/unset`.
pub const VALID_KEYS: &[&str] = &[
    "refresh-token",
    "base-url",
    "oauth-url",
    "namespace",
    "region",
    "timeout",
    "debug",
    "output",
];

/// Output formats accepted in the `output` key.
pub const VALID_OUTPUT_FORMATS: &[&str] = &["table", "wide", "json", "yaml"];

/// Contents of the configuration file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Config {
    /// Loads the default configuration file; missing file means defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// `explicit` when given, otherwise [`Config::config_path`].
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_path(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "refresh-token" => self.refresh_token.clone(),
            "base-url" => self.base_url.clone(),
            "oauth-url" => self.oauth_url.clone(),
            "namespace" => self.namespace.clone(),
            "region" => self.region.clone(),
            "timeout" => self.timeout.map(|t| t.to_string()),
            "debug" => self.debug.map(|d| d.to_string()),
            "output" => self.output.clone(),
            _ => None,
        }
    }

    /// Sets `key` after validating `value`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "refresh-token" => self.refresh_token = Some(non_empty(key, value)?),
            "base-url" => self.base_url = Some(http_url(key, value)?),
            "oauth-url" => self.oauth_url = Some(http_url(key, value)?),
            "namespace" => self.namespace = Some(non_empty(key, value)?),
            "region" => self.region = Some(non_empty(key, value)?),
            "timeout" => {
                let seconds: u64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("timeout must be a whole number of seconds, got '{}'", value))?;
                if seconds == 0 {
                    bail!("timeout must be greater than zero");
                }
                self.timeout = Some(seconds);
            }
            "debug" => {
                let enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "1" | "yes" | "on" => true,
                    "false" | "0" | "no" | "off" => false,
                    _ => bail!("debug must be true or false, got '{}'", value),
                };
                self.debug = Some(enabled);
            }
            "output" => {
                let format = value.to_ascii_lowercase();
                if !VALID_OUTPUT_FORMATS.contains(&format.as_str()) {
                    bail!(
                        "output must be one of: {}, got '{}'",
                        VALID_OUTPUT_FORMATS.join(", "),
                        value
                    );
                }
                self.output = Some(format);
            }
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Removes `key`; returns whether it was set.
    pub fn unset(&mut self, key: &str) -> Result<bool> {
        let was_set = self.get(key).is_some();
        match key {
            "refresh-token" => self.refresh_token = None,
            "base-url" => self.base_url = None,
            "oauth-url" => self.oauth_url = None,
            "namespace" => self.namespace = None,
            "region" => self.region = None,
            "timeout" => self.timeout = None,
            "debug" => self.debug = None,
            "output" => self.output = None,
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(was_set)
    }

    /// All keys with display values; the refresh token is masked.
    pub fn display_entries(&self) -> Vec<(&'static str, Option<String>)> {
        VALID_KEYS
            .iter()
            .map(|key| {
                let value = match *key {
                    "refresh-token" => self.refresh_token.as_deref().map(mask_token),
                    other => self.get(other),
                };
                (*key, value)
            })
            .collect()
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        bail!("{} cannot be empty", key);
    }
    Ok(value.to_string())
}

fn http_url(key: &str, value: &str) -> Result<String> {
    let parsed = url::Url::parse(value).map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", key, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("{} must be an http(s) URL", key);
    }
    Ok(value.trim_end_matches('/').to_string())
}

/// Values from the environment and command line that override the file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub refresh_token: Option<String>,
    pub base_url: Option<String>,
    pub namespace: Option<String>,
    pub timeout: Option<u64>,
    pub debug: bool,
    pub output: Option<String>,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub refresh_token: String,
    pub base_url: String,
    pub oauth_url: String,
    pub namespace: Option<String>,
    pub region: Option<String>,
    pub timeout: Duration,
    pub debug: bool,
    pub output: Option<String>,
}

impl Settings {
    pub fn resolve(config: &Config, overrides: &SettingsOverrides) -> Self {
        fn pick(over: &Option<String>, file: &Option<String>) -> Option<String> {
            over.clone()
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file.clone().filter(|v| !v.trim().is_empty()))
        }

        Self {
            refresh_token: pick(&overrides.refresh_token, &config.refresh_token).unwrap_or_default(),
            base_url: pick(&overrides.base_url, &config.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            oauth_url: config
                .oauth_url
                .clone()
                .unwrap_or_else(|| OAUTH_URL.to_string()),
            namespace: pick(&overrides.namespace, &config.namespace),
            region: config.region.clone(),
            timeout: Duration::from_secs(
                overrides
                    .timeout
                    .or(config.timeout)
                    .filter(|t| *t > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            debug: overrides.debug || config.debug.unwrap_or(false),
            output: pick(&overrides.output, &config.output),
        }
    }

    /// Checks the settings needed to talk to the API.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.refresh_token.trim().is_empty() {
            return Err(ApiError::validation(
                "refresh token is required: set it via --refresh-token, the config file, \
                 or the SPOTCTL_REFRESH_TOKEN environment variable",
            ));
        }
        for (name, value) in [("base URL", &self.base_url), ("OAuth URL", &self.oauth_url)] {
            url::Url::parse(value)
                .map_err(|e| ApiError::validation(format!("invalid {name} '{value}': {e}")))?;
        }
        Ok(())
    }

    /// Namespace from `explicit`, falling back to the resolved setting.
    pub fn namespace(&self, explicit: Option<&str>) -> Result<String, ApiError> {
        explicit
            .filter(|ns| !ns.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.namespace.clone())
            .ok_or_else(|| {
                ApiError::validation(
                    "namespace is required: set it via --namespace flag, config file, \
                     or SPOTCTL_NAMESPACE environment variable",
                )
            })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            refresh_token: self.refresh_token.clone(),
            base_url: self.base_url.clone(),
            oauth_url: self.oauth_url.clone(),
            timeout: self.timeout,
            debug: self.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("namespace", "org-abc").unwrap();
        config.set("timeout", "45").unwrap();
        config.set("debug", "yes").unwrap();
        config.set("output", "JSON").unwrap();

        assert_eq!(config.get("namespace").as_deref(), Some("org-abc"));
        assert_eq!(config.get("timeout").as_deref(), Some("45"));
        assert_eq!(config.get("debug").as_deref(), Some("true"));
        assert_eq!(config.get("output").as_deref(), Some("json"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("timeout", "soon").is_err());
        assert!(config.set("timeout", "0").is_err());
        assert!(config.set("debug", "maybe").is_err());
        assert!(config.set("output", "xml").is_err());
        assert!(config.set("base-url", "not a url").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unset() {
        let mut config = Config::default();
        config.set("region", "uk-lon-1").unwrap();
        assert!(config.unset("region").unwrap());
        assert!(!config.unset("region").unwrap());
        assert!(config.unset("nope").is_err());
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("refresh-token", "abcdefghijkl").unwrap();
        config.set("base-url", "https://example.test/apis/").unwrap();
        config.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("refresh-token = \"abcdefghijkl\""));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url.as_deref(), Some("https://example.test/apis"));
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_display_masks_token() {
        let mut config = Config::default();
        config.set("refresh-token", "abcdefghijkl").unwrap();
        let entries = config.display_entries();
        assert_eq!(entries[0], ("refresh-token", Some("abcdefgh***".to_string())));
        assert_eq!(entries.len(), VALID_KEYS.len());
    }

    #[test]
    fn test_resolution_order() {
        let config = Config {
            refresh_token: Some("from-file".into()),
            namespace: Some("file-ns".into()),
            timeout: Some(10),
            ..Default::default()
        };
        let overrides = SettingsOverrides {
            namespace: Some("flag-ns".into()),
            ..Default::default()
        };

        let settings = Settings::resolve(&config, &overrides);
        assert_eq!(settings.refresh_token, "from-file");
        assert_eq!(settings.namespace.as_deref(), Some("flag-ns"));
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert!(!settings.debug);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_token() {
        let settings = Settings::resolve(&Config::default(), &SettingsOverrides::default());
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().starts_with("refresh token is required"));
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_namespace_resolution() {
        let settings = Settings::resolve(&Config::default(), &SettingsOverrides::default());
        assert!(settings.namespace(None).is_err());
        assert_eq!(settings.namespace(Some("org-x")).unwrap(), "org-x");

        let settings = Settings::resolve(
            &Config {
                namespace: Some("org-y".into()),
                ..Default::default()
            },
            &SettingsOverrides::default(),
        );
        assert_eq!(settings.namespace(None).unwrap(), "org-y");
        assert_eq!(settings.namespace(Some("")).unwrap(), "org-y");
    }
}
