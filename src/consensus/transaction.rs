//! Transaction structure and wire serialization
//!
//! Legacy (non-witness) encoding only; transaction ids are the sha256d of
//! these bytes.

use serde::Serialize;

use super::Script;
use crate::constants::Amount;
use crate::crypto::{sha256d, Hash};

/// Output index marking a coinbase input's missing previous output
pub const NULL_INDEX: u32 = 0xFFFF_FFFF;

/// Sequence number for inputs with no relative lock
pub const SEQUENCE_FINAL: u32 = 0xFFFF_FFFF;

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutPoint {
    pub txid: Hash,
    pub index: u32,
}

impl OutPoint {
    /// The outpoint carried by coinbase inputs
    pub const fn null() -> Self {
        Self {
            txid: Hash::zero(),
            index: NULL_INDEX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.index == NULL_INDEX
    }
}

/// A transaction input referencing a previous output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxInput {
    pub prevout: OutPoint,
    /// Unlock data; for a coinbase, arbitrary bytes
    pub script_sig: Script,
    pub sequence: u32,
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOutput {
    /// Amount in base units
    pub value: Amount,
    /// Script that must be satisfied to spend this output
    pub script_pubkey: Script,
}

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Create a coinbase transaction paying `reward` to `script_pubkey`
    pub fn coinbase(script_sig: Script, reward: Amount, script_pubkey: Script) -> Self {
        Self {
            version: 1,
            inputs: vec![TxInput {
                prevout: OutPoint::null(),
                script_sig,
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![TxOutput {
                value: reward,
                script_pubkey,
            }],
            lock_time: 0,
        }
    }

    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// Transaction id
    pub fn hash(&self) -> Hash {
        sha256d(&self.to_bytes())
    }

    /// Serialize in the legacy wire format
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut bytes, self.inputs.len() as u64);
        for input in &self.inputs {
            bytes.extend_from_slice(input.prevout.txid.as_bytes());
            bytes.extend_from_slice(&input.prevout.index.to_le_bytes());
            write_script(&mut bytes, &input.script_sig);
            bytes.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut bytes, self.outputs.len() as u64);
        for output in &self.outputs {
            bytes.extend_from_slice(&output.value.to_le_bytes());
            write_script(&mut bytes, &output.script_pubkey);
        }

        bytes.extend_from_slice(&self.lock_time.to_le_bytes());

        bytes
    }

    /// Calculate total output value
    pub fn total_output_value(&self) -> Amount {
        self.outputs.iter().map(|o| o.value).sum()
    }
}

fn write_script(out: &mut Vec<u8>, script: &Script) {
    write_compact_size(out, script.len() as u64);
    out.extend_from_slice(script.as_bytes());
}

/// Variable-length integer prefix used for counts and script lengths
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}
