//! Monitor configuration, loaded from a TOML file.
//!
//! ```toml
//! interval = "10s"
//! timeout = "5s"
//! protocol_version = 765
//!
//! [[targets]]
//! name = "Survival"
//! host = "mc.example.com"
//! port = 25565
//! group = "lobby"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use mcsearch_protocol::Version;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::probe::{DEFAULT_PORT, DEFAULT_TIMEOUT, ProbeOptions};

const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// Delay between two refreshes of every target.
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Per-probe bound, connect through response.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_protocol_version")]
    pub protocol_version: i32,

    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TargetConfig {
    /// Display name, shown in front of the rendered status.
    pub name: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Results of targets sharing a group are cached and served together.
    pub group: String,
}

fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_protocol_version() -> i32 {
    Version::DEFAULT.protocol_number()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            protocol_version: default_protocol_version(),
            targets: Vec::new(),
        }
    }
}

impl MonitorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading monitor configuration");

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::Invalid("interval must be greater than zero".into()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be greater than zero".into()));
        }

        for (index, target) in self.targets.iter().enumerate() {
            if target.host.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "target #{} ({}) has an empty host",
                    index + 1,
                    target.name
                )));
            }
        }

        Ok(())
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions::default()
            .with_protocol_version(self.protocol_version)
            .with_timeout(self.timeout)
    }

    /// Group names in order of first appearance.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for target in &self.targets {
            if !groups.contains(&target.group.as_str()) {
                groups.push(&target.group);
            }
        }
        groups
    }
}
