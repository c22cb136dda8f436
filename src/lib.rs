//! BCKING chain parameter core
//!
//! Single source of truth for the rules a node runs under on each network:
//! genesis identity, proof-of-work limits, soft-fork deployments, address
//! prefixes, wire magic and checkpoints.

pub mod chainparams;
pub mod config;
pub mod consensus;
pub mod crypto;
pub mod error;
pub mod node;
pub mod p2p;
pub mod wallet;

pub use chainparams::{params, params_for, select_params, ConsensusProfile, Network};
pub use error::{InvariantViolation, NetworkError};

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// Amount in base units (8 decimal places)
    pub type Amount = i64;

    /// Base units per coin
    pub const COIN: Amount = 100_000_000;

    /// Deployment timeout meaning "never expires"
    pub const NO_TIMEOUT: i64 = 999_999_999_999;
}
