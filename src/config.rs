//! Configuration management
//!
//! An optional TOML file names the network and the default log filter.
//! Command-line switches override the file.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::chainparams::{chain_name_from_flags, Network};
use crate::error::NetworkError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            log_filter: default_log_filter(),
        }
    }
}

impl NodeConfig {
    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = toml::from_str(text)?;
        config.network()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_toml(&text)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn network(&self) -> Result<Network, NetworkError> {
        self.network.parse()
    }

    /// Resolve the network after command-line overrides.
    ///
    /// An explicit `--network` replaces the file's value; `--testnet` and
    /// `--regtest` must agree with whichever name is in effect, unless the
    /// file only carries the default.
    pub fn resolve_network(
        &self,
        cli_network: Option<&str>,
        testnet: bool,
        regtest: bool,
    ) -> Result<Network, ConfigError> {
        let name = match cli_network {
            Some(name) => Some(name),
            None if self.network != default_network() => Some(self.network.as_str()),
            None => None,
        };
        Ok(chain_name_from_flags(name, testnet, regtest)?)
    }
}

fn default_network() -> String {
    Network::Main.name().to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}
