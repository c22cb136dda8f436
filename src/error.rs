//! Error types for chain-parameter construction and network selection
//!
//! Two tiers: [`NetworkError`] is returned to callers that picked a bad
//! network name or selected twice; [`InvariantViolation`] describes a
//! defective parameter table and is never recoverable at runtime.

use thiserror::Error;

use crate::chainparams::Network;
use crate::consensus::DeploymentId;
use crate::crypto::Hash;
use crate::wallet::AddressClass;

/// Caller-recoverable selection errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("unknown network: {0:?} (expected main, test or regtest)")]
    UnknownNetwork(String),
    #[error("network already selected: {active}, refusing to switch to {requested}")]
    AlreadySelected { active: Network, requested: Network },
    #[error("conflicting network flags: --testnet and --regtest are mutually exclusive")]
    ConflictingFlags,
}

/// A broken consensus invariant in a parameter table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{network}: genesis hash mismatch: expected {expected}, computed {computed}")]
    GenesisHashMismatch {
        network: Network,
        expected: Hash,
        computed: Hash,
    },
    #[error("{network}: genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleRootMismatch {
        network: Network,
        expected: Hash,
        computed: Hash,
    },
    #[error("{network}: genesis bits {bits:#010x} exceed the proof-of-work limit")]
    GenesisAboveLimit { network: Network, bits: u32 },
    #[error("deployments {first} and {second} share version bit {bit}")]
    DuplicateDeploymentBit {
        bit: u8,
        first: DeploymentId,
        second: DeploymentId,
    },
    #[error("deployment {deployment} uses version bit {bit}, outside 0..32")]
    DeploymentBitOutOfRange { deployment: DeploymentId, bit: u8 },
    #[error("deployment {0} listed twice")]
    DuplicateDeployment(DeploymentId),
    #[error("deployment {0} missing from table")]
    MissingDeployment(DeploymentId),
    #[error("malformed hash constant {0:?}")]
    MalformedHash(String),
    #[error("checkpoint list is empty")]
    EmptyCheckpoints,
    #[error("checkpoint heights not strictly increasing: {next} follows {prev}")]
    CheckpointOrder { prev: u32, next: u32 },
    #[error("{network}: checkpoint at height 0 is {checkpoint}, genesis is {genesis}")]
    GenesisCheckpointMismatch {
        network: Network,
        checkpoint: Hash,
        genesis: Hash,
    },
    #[error("{network}: premine address {address} is invalid: {reason}")]
    PremineAddress {
        network: Network,
        address: String,
        reason: String,
    },
    #[error("networks {first} and {second} share message start bytes {magic}")]
    MagicCollision {
        first: Network,
        second: Network,
        magic: String,
    },
    #[error("networks {first} and {second} share {class} prefix {prefix}")]
    PrefixCollision {
        first: Network,
        second: Network,
        class: AddressClass,
        prefix: String,
    },
}
