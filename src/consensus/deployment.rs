//! Versionbits soft-fork deployments
//!
//! Every network carries one slot per known deployment. Miners signal
//! readiness by setting the deployment's bit in the block version while the
//! current median time lies inside the start/timeout window.

use serde::Serialize;
use std::fmt;

use crate::constants::NO_TIMEOUT;
use crate::error::InvariantViolation;

/// Number of version bits available for signalling
pub const VERSIONBITS_NUM_BITS: u8 = 32;

/// Known soft-fork deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentId {
    /// Reserved for testing the activation machinery
    TestDummy,
    /// Relative lock-time (BIP68, BIP112, BIP113)
    Csv,
    /// Segregated witness (BIP141, BIP143)
    Segwit,
}

impl DeploymentId {
    pub const ALL: [DeploymentId; 3] = [
        DeploymentId::TestDummy,
        DeploymentId::Csv,
        DeploymentId::Segwit,
    ];

    /// Slot in the deployment table
    pub const fn index(self) -> usize {
        match self {
            DeploymentId::TestDummy => 0,
            DeploymentId::Csv => 1,
            DeploymentId::Segwit => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DeploymentId::TestDummy => "testdummy",
            DeploymentId::Csv => "csv",
            DeploymentId::Segwit => "segwit",
        }
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Activation window for one deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeploymentSpec {
    pub id: DeploymentId,
    /// Version bit miners set to signal
    pub bit: u8,
    /// Median time at which signalling may begin
    pub start_time: i64,
    /// Median time after which the deployment fails; 0 disables it
    pub timeout: i64,
}

impl DeploymentSpec {
    pub const fn new(id: DeploymentId, bit: u8, start_time: i64, timeout: i64) -> Self {
        Self {
            id,
            bit,
            start_time,
            timeout,
        }
    }

    /// Version mask for this deployment's bit
    pub fn mask(&self) -> u32 {
        1u32 << self.bit
    }

    /// A zero timeout disables the deployment on this network
    pub fn never_activates(&self) -> bool {
        self.timeout == 0
    }

    pub fn never_expires(&self) -> bool {
        self.timeout == NO_TIMEOUT
    }

    /// Whether signalling counts at the given median time past
    pub fn is_signalling_window(&self, median_time: i64) -> bool {
        !self.never_activates() && median_time >= self.start_time && median_time < self.timeout
    }
}

/// Fixed table of deployments, indexed by [`DeploymentId`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentTable {
    specs: [DeploymentSpec; 3],
}

impl DeploymentTable {
    /// Build the table, rejecting out-of-range or shared bits.
    ///
    /// Each spec lands in the slot of its own id; the input order does not
    /// matter, but every id must appear exactly once.
    pub fn new(specs: [DeploymentSpec; 3]) -> Result<Self, InvariantViolation> {
        let mut slots: [Option<DeploymentSpec>; 3] = [None; 3];

        for spec in specs {
            if spec.bit >= VERSIONBITS_NUM_BITS {
                return Err(InvariantViolation::DeploymentBitOutOfRange {
                    deployment: spec.id,
                    bit: spec.bit,
                });
            }
            if let Some(other) = slots.iter().flatten().find(|s| s.bit == spec.bit) {
                return Err(InvariantViolation::DuplicateDeploymentBit {
                    bit: spec.bit,
                    first: other.id,
                    second: spec.id,
                });
            }
            if slots[spec.id.index()].is_some() {
                return Err(InvariantViolation::DuplicateDeployment(spec.id));
            }
            slots[spec.id.index()] = Some(spec);
        }

        let mut table = specs;
        for id in DeploymentId::ALL {
            table[id.index()] = slots[id.index()].ok_or(InvariantViolation::MissingDeployment(id))?;
        }

        Ok(Self { specs: table })
    }

    pub fn get(&self, id: DeploymentId) -> &DeploymentSpec {
        &self.specs[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeploymentSpec> {
        self.specs.iter()
    }

    /// Deployment signalling on a given bit, if any
    pub fn by_bit(&self, bit: u8) -> Option<&DeploymentSpec> {
        self.specs.iter().find(|spec| spec.bit == bit)
    }
}
