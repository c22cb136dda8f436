//! Chain parameters - per-network consensus profiles and the process-wide
//! network selection
//!
//! Call [`select_params`] once during startup, then read the active rules
//! anywhere through [`params`].

mod checkpoints;
mod network;
mod networks;
mod profile;
mod registry;

pub use checkpoints::*;
pub use network::*;
pub use networks::*;
pub use profile::*;
pub use registry::*;

use once_cell::sync::Lazy;
use tracing::error;

use crate::crypto::Hash;
use crate::error::{InvariantViolation, NetworkError};

static REGISTRY: Lazy<NetworkRegistry> = Lazy::new(|| match NetworkRegistry::build() {
    Ok(registry) => registry,
    Err(violation) => {
        error!(%violation, "built-in chain parameters are inconsistent");
        panic!("invalid chain parameters: {violation}");
    }
});

/// The process-wide registry.
///
/// # Panics
///
/// On first use, if any built-in profile violates a consensus invariant.
pub fn registry() -> &'static NetworkRegistry {
    &REGISTRY
}

/// Select the network this process runs on; see [`NetworkRegistry::select`]
pub fn select_params(name: &str) -> Result<&'static ConsensusProfile, NetworkError> {
    registry().select(name)
}

/// The active profile.
///
/// # Panics
///
/// If [`select_params`] has not succeeded yet.
pub fn params() -> &'static ConsensusProfile {
    registry().active()
}

/// Profile of a named network, regardless of the active selection
pub fn params_for(name: &str) -> Result<&'static ConsensusProfile, NetworkError> {
    registry().resolve(name)
}

/// Parse a display-order hash constant
pub(crate) fn parse_hash(hex: &str) -> Result<Hash, InvariantViolation> {
    Hash::from_hex(hex).map_err(|_| InvariantViolation::MalformedHash(hex.to_string()))
}
