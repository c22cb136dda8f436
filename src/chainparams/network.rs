//! Network identifiers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;

/// The networks a node can run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network
    Main,
    /// Public test network
    Test,
    /// Local regression-test network
    Regtest,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Main, Network::Test, Network::Regtest];

    /// Canonical name, as accepted by [`Network::from_str`]
    pub const fn name(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = NetworkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            other => Err(NetworkError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Pick a network from the usual command-line switches.
///
/// `--testnet` and `--regtest` are shorthands; combining them, or combining
/// one with a different explicit name, is rejected. With nothing given the
/// production network is used.
pub fn chain_name_from_flags(
    name: Option<&str>,
    testnet: bool,
    regtest: bool,
) -> Result<Network, NetworkError> {
    let flagged = match (testnet, regtest) {
        (true, true) => return Err(NetworkError::ConflictingFlags),
        (true, false) => Some(Network::Test),
        (false, true) => Some(Network::Regtest),
        (false, false) => None,
    };

    let named = name.map(Network::from_str).transpose()?;

    match (named, flagged) {
        (Some(named), Some(flagged)) if named != flagged => Err(NetworkError::ConflictingFlags),
        (Some(network), _) | (None, Some(network)) => Ok(network),
        (None, None) => Ok(Network::Main),
    }
}
