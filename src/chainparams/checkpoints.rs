//! Checkpoint trust anchors
//!
//! Known-good (height, hash) pairs that let a syncing node skip historical
//! signature checks, plus the transaction statistics used to estimate sync
//! progress past the last anchor.

use serde::Serialize;

use crate::crypto::Hash;
use crate::error::InvariantViolation;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub height: u32,
    pub hash: Hash,
}

/// Transaction statistics at the last checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CheckpointStats {
    /// Unix timestamp of the last checkpoint block
    pub last_checkpoint_time: i64,
    /// Total transactions between genesis and the last checkpoint
    pub tx_count: u64,
    /// Estimated transactions per day after the last checkpoint
    pub tx_per_day: u64,
}

/// Ordered, immutable set of checkpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckpointStore {
    checkpoints: Vec<Checkpoint>,
    stats: CheckpointStats,
}

impl CheckpointStore {
    /// Build from checkpoints given in ascending height order
    pub fn new(
        checkpoints: Vec<Checkpoint>,
        stats: CheckpointStats,
    ) -> Result<Self, InvariantViolation> {
        if checkpoints.is_empty() {
            return Err(InvariantViolation::EmptyCheckpoints);
        }

        for pair in checkpoints.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(InvariantViolation::CheckpointOrder {
                    prev: pair[0].height,
                    next: pair[1].height,
                });
            }
        }

        Ok(Self { checkpoints, stats })
    }

    /// Build from display-order hex hashes
    pub fn from_hex(
        entries: &[(u32, &str)],
        stats: CheckpointStats,
    ) -> Result<Self, InvariantViolation> {
        let checkpoints = entries
            .iter()
            .map(|(height, hex)| {
                Ok(Checkpoint {
                    height: *height,
                    hash: super::parse_hash(hex)?,
                })
            })
            .collect::<Result<Vec<_>, InvariantViolation>>()?;
        Self::new(checkpoints, stats)
    }

    /// Hash anchored at `height`, if that height is checkpointed
    pub fn lookup(&self, height: u32) -> Option<Hash> {
        self.checkpoints
            .binary_search_by_key(&height, |c| c.height)
            .ok()
            .map(|index| self.checkpoints[index].hash)
    }

    /// Highest checkpoint
    pub fn last(&self) -> (u32, Hash) {
        // Non-empty by construction
        let last = &self.checkpoints[self.checkpoints.len() - 1];
        (last.height, last.hash)
    }

    pub fn stats(&self) -> &CheckpointStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    /// Extrapolated total transaction count at unix time `now`.
    ///
    /// Before the last checkpoint's timestamp this is just the recorded
    /// count.
    pub fn estimated_tx_count(&self, now: i64) -> u64 {
        let elapsed = now.saturating_sub(self.stats.last_checkpoint_time).max(0) as u64;
        let extra = (elapsed as u128 * self.stats.tx_per_day as u128) / SECONDS_PER_DAY as u128;
        self.stats
            .tx_count
            .saturating_add(u64::try_from(extra).unwrap_or(u64::MAX))
    }
}
