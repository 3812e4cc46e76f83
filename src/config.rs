//! Configuration Management
//!
//! Settings come from three layers: command-line flags, `CLOUDFLARE_*`
//! environment variables, and `~/.cf-terraforming.yaml`. Earlier layers win;
//! empty values count as unset. Zone and account form one scope: the first
//! layer that sets either of them supplies both.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the config file in the home directory
pub const CONFIG_FILE_NAME: &str = ".cf-terraforming.yaml";

pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_API_KEY: &str = "CLOUDFLARE_API_KEY";
pub const ENV_EMAIL: &str = "CLOUDFLARE_EMAIL";
pub const ENV_ZONE_ID: &str = "CLOUDFLARE_ZONE_ID";
pub const ENV_ACCOUNT_ID: &str = "CLOUDFLARE_ACCOUNT_ID";
pub const ENV_API_HOSTNAME: &str = "CLOUDFLARE_API_HOSTNAME";

/// One layer of settings
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub token: Option<String>,
    pub email: Option<String>,
    pub key: Option<String>,
    pub zone: Option<String>,
    pub account: Option<String>,
    pub hostname: Option<String>,
}

impl Config {
    /// Default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Load the config file.
    ///
    /// A missing file yields defaults. A malformed file is reported and
    /// ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Self::default();
        }

        match Self::read(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config file: {:#}", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse YAML config content; an empty document is an empty config
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Settings from `CLOUDFLARE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            token: lookup(ENV_API_TOKEN),
            email: lookup(ENV_EMAIL),
            key: lookup(ENV_API_KEY),
            zone: lookup(ENV_ZONE_ID),
            account: lookup(ENV_ACCOUNT_ID),
            hostname: lookup(ENV_API_HOSTNAME),
        }
    }

    /// Fill unset fields from a lower-precedence layer
    pub fn or(self, fallback: Config) -> Config {
        let (zone, account) = if self.has_scope() {
            (non_empty(self.zone), non_empty(self.account))
        } else {
            (non_empty(fallback.zone), non_empty(fallback.account))
        };

        Config {
            token: pick(self.token, fallback.token),
            email: pick(self.email, fallback.email),
            key: pick(self.key, fallback.key),
            zone,
            account,
            hostname: pick(self.hostname, fallback.hostname),
        }
    }

    fn has_scope(&self) -> bool {
        [&self.zone, &self.account]
            .iter()
            .any(|id| id.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn pick(value: Option<String>, fallback: Option<String>) -> Option<String> {
    non_empty(value).or_else(|| non_empty(fallback))
}
