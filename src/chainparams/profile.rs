//! Consensus profiles
//!
//! A [`ConsensusProfile`] is the complete, frozen rule set of one network.
//! It is assembled from raw constants by [`ConsensusProfile::assemble`],
//! which rebuilds the genesis block and refuses to produce a profile whose
//! constants disagree with each other.

use serde::Serialize;
use tracing::debug;

use super::{CheckpointStore, Network};
use crate::constants::{Amount, COIN};
use crate::consensus::{pow, DeploymentId, DeploymentSpec, DeploymentTable};
use crate::crypto::Hash;
use crate::error::InvariantViolation;
use crate::node::{default_genesis, GenesisBlock};
use crate::p2p::{NetworkMagic, SeedList};
use crate::wallet::AddressPrefixes;

/// Subsidy paid by the first block of every halving schedule
const INITIAL_SUBSIDY: Amount = 50 * COIN;

/// Height and block hash at which BIP34 (height in coinbase) activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bip34Activation {
    pub height: u32,
    pub hash: Hash,
}

/// Scalar consensus rules of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusParameters {
    pub subsidy_halving_interval: u32,
    /// Legacy version-majority voting: blocks needed to enforce an upgrade
    pub majority_enforce_block_upgrade: u32,
    /// Legacy version-majority voting: blocks needed to reject old versions
    pub majority_reject_block_outdated: u32,
    pub majority_window: u32,
    /// `None` where BIP34 has no fixed activation point
    pub bip34: Option<Bip34Activation>,
    /// Height at which the post-fork proof-of-work limit takes over
    pub fork_height: u32,
    /// Difficulty decrement applied around the fork
    pub fork_difficulty_decrement: u32,
    /// Proof-of-work ceiling from `fork_height` on
    pub pow_limit: Hash,
    /// Proof-of-work ceiling below `fork_height`
    pub pow_limit_before_fork: Hash,
    pub premine_address: Option<&'static str>,
    pub pow_target_timespan: i64,
    pub pow_target_spacing: i64,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    /// Signalling blocks per window needed to lock in a deployment
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: DeploymentTable,
    pub hash_genesis_block: Hash,
    pub genesis_merkle_root: Hash,
}

impl ConsensusParameters {
    /// Blocks between difficulty retargets
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// Proof-of-work ceiling in force at `height`
    pub fn pow_limit_at(&self, height: u32) -> &Hash {
        if height >= self.fork_height {
            &self.pow_limit
        } else {
            &self.pow_limit_before_fork
        }
    }

    pub fn is_bip34_active(&self, height: u32) -> bool {
        self.bip34.map_or(false, |bip34| height >= bip34.height)
    }

    pub fn deployment(&self, id: DeploymentId) -> &DeploymentSpec {
        self.deployments.get(id)
    }

    pub fn halvings_at(&self, height: u32) -> u32 {
        height / self.subsidy_halving_interval
    }

    /// Block subsidy at `height`; zero once the shift would exceed 63 bits
    pub fn block_subsidy(&self, height: u32) -> Amount {
        let halvings = self.halvings_at(height);
        if halvings >= 64 {
            return 0;
        }
        INITIAL_SUBSIDY >> halvings
    }
}

/// Inputs to the genesis block of one network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenesisSeed {
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: Amount,
}

/// Node behaviour that differs per network but is not consensus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyFlags {
    pub mining_requires_peers: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,
}

/// Everything needed to assemble a profile
#[derive(Debug, Clone)]
pub struct ProfileParts {
    pub network: Network,
    pub consensus: ConsensusParameters,
    pub genesis: GenesisSeed,
    pub checkpoints: CheckpointStore,
    pub magic: NetworkMagic,
    pub prefixes: AddressPrefixes,
    pub seeds: SeedList,
    pub policy: PolicyFlags,
}

/// The frozen rule set of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusProfile {
    network: Network,
    consensus: ConsensusParameters,
    genesis: GenesisBlock,
    checkpoints: CheckpointStore,
    magic: NetworkMagic,
    prefixes: AddressPrefixes,
    seeds: SeedList,
    policy: PolicyFlags,
}

impl ConsensusProfile {
    /// Build the genesis block and check every cross-field invariant
    pub fn assemble(parts: ProfileParts) -> Result<Self, InvariantViolation> {
        let ProfileParts {
            network,
            consensus,
            genesis: seed,
            checkpoints,
            magic,
            prefixes,
            seeds,
            policy,
        } = parts;

        let genesis = default_genesis(seed.time, seed.nonce, seed.bits, seed.version, seed.reward);

        if genesis.hash() != consensus.hash_genesis_block {
            return Err(InvariantViolation::GenesisHashMismatch {
                network,
                expected: consensus.hash_genesis_block,
                computed: genesis.hash(),
            });
        }
        if genesis.merkle_root() != consensus.genesis_merkle_root {
            return Err(InvariantViolation::MerkleRootMismatch {
                network,
                expected: consensus.genesis_merkle_root,
                computed: genesis.merkle_root(),
            });
        }

        if !pow::compact_within_limit(genesis.bits(), consensus.pow_limit_at(0)) {
            return Err(InvariantViolation::GenesisAboveLimit {
                network,
                bits: genesis.bits(),
            });
        }

        if let Some(anchor) = checkpoints.lookup(0) {
            if anchor != genesis.hash() {
                return Err(InvariantViolation::GenesisCheckpointMismatch {
                    network,
                    checkpoint: anchor,
                    genesis: genesis.hash(),
                });
            }
        }

        if let Some(address) = consensus.premine_address {
            prefixes
                .decode_pubkey_address(address)
                .map_err(|e| InvariantViolation::PremineAddress {
                    network,
                    address: address.to_string(),
                    reason: e.to_string(),
                })?;
        }

        debug!(
            %network,
            genesis = %genesis.hash(),
            checkpoints = checkpoints.len(),
            "assembled consensus profile"
        );

        Ok(Self {
            network,
            consensus,
            genesis,
            checkpoints,
            magic,
            prefixes,
            seeds,
            policy,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn network_id(&self) -> &'static str {
        self.network.name()
    }

    pub fn consensus(&self) -> &ConsensusParameters {
        &self.consensus
    }

    pub fn genesis(&self) -> &GenesisBlock {
        &self.genesis
    }

    pub fn deployments(&self) -> &DeploymentTable {
        &self.consensus.deployments
    }

    pub fn checkpoints(&self) -> &CheckpointStore {
        &self.checkpoints
    }

    pub fn magic(&self) -> &NetworkMagic {
        &self.magic
    }

    pub fn default_port(&self) -> u16 {
        self.magic.default_port
    }

    pub fn prefixes(&self) -> &AddressPrefixes {
        &self.prefixes
    }

    pub fn seeds(&self) -> &SeedList {
        &self.seeds
    }

    pub fn policy(&self) -> &PolicyFlags {
        &self.policy
    }

    /// Take the profile apart again so tests can reassemble a variant
    #[cfg(test)]
    pub(crate) fn into_parts(self) -> ProfileParts {
        let genesis = GenesisSeed {
            time: self.genesis.time(),
            nonce: self.genesis.nonce(),
            bits: self.genesis.bits(),
            version: self.genesis.version(),
            reward: self.genesis.coinbase().total_output_value(),
        };
        ProfileParts {
            network: self.network,
            consensus: self.consensus,
            genesis,
            checkpoints: self.checkpoints,
            magic: self.magic,
            prefixes: self.prefixes,
            seeds: self.seeds,
            policy: self.policy,
        }
    }
}
