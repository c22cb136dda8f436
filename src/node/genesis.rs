//! Genesis block generation
//!
//! The first block of every BCKING network is assembled from fixed inputs.
//! The output of its coinbase can never be spent: it was never entered into
//! the coin database.

use serde::Serialize;

use crate::constants::Amount;
use crate::consensus::{Block, BlockHeader, Script, Transaction, OP_CHECKSIG};
use crate::crypto::Hash;

/// Headline embedded in every BCKING genesis coinbase
pub const GENESIS_MESSAGE: &str =
    "The Times 03/Jan/2009 Chancellor on brink of second bailout for banks";

/// Public key the genesis output pays to (uncompressed, 65 bytes)
pub const GENESIS_OUTPUT_PUBKEY: [u8; 65] = [
    0x04, 0x67, 0x8a, 0xfd, 0xb0, 0xfe, 0x55, 0x48,
    0x27, 0x19, 0x67, 0xf1, 0xa6, 0x71, 0x30, 0xb7,
    0x10, 0x5c, 0xd6, 0xa8, 0x28, 0xe0, 0x39, 0x09,
    0xa6, 0x79, 0x62, 0xe0, 0xea, 0x1f, 0x61, 0xde,
    0xb6, 0x49, 0xf6, 0xbc, 0x3f, 0x4c, 0xef, 0x38,
    0xc4, 0xf3, 0x55, 0x04, 0xe5, 0x1e, 0xc1, 0x12,
    0xde, 0x5c, 0x38, 0x4d, 0xf7, 0xba, 0x0b, 0x8d,
    0x57, 0x8a, 0x4c, 0x70, 0x2b, 0x6b, 0xf1, 0x1d,
    0x5f,
];

/// Leading script number in the genesis coinbase; equal to the mainnet
/// genesis bits
const COINBASE_BITS_PUSH: i64 = 486604799;

/// Second script number in the genesis coinbase
const COINBASE_EXTRA_NONCE: i64 = 4;

/// The first block of a chain together with its computed identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenesisBlock {
    block: Block,
    hash: Hash,
}

impl GenesisBlock {
    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn header(&self) -> &BlockHeader {
        &self.block.header
    }

    /// The single coinbase transaction
    pub fn coinbase(&self) -> &Transaction {
        &self.block.transactions[0]
    }

    /// Hash computed from the header fields
    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn merkle_root(&self) -> Hash {
        self.block.header.merkle_root
    }

    pub fn prev_hash(&self) -> Hash {
        self.block.header.prev_hash
    }

    pub fn version(&self) -> i32 {
        self.block.header.version
    }

    pub fn time(&self) -> u32 {
        self.block.header.time
    }

    pub fn bits(&self) -> u32 {
        self.block.header.bits
    }

    pub fn nonce(&self) -> u32 {
        self.block.header.nonce
    }
}

/// Build a genesis block from explicit inputs.
///
/// Pure and deterministic; the result is not checked against any expected
/// hash.
pub fn build_genesis(
    message: &[u8],
    output_script: Script,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: Amount,
) -> GenesisBlock {
    let script_sig = Script::new()
        .push_int(COINBASE_BITS_PUSH)
        .push_script_num(COINBASE_EXTRA_NONCE)
        .push_slice(message);

    let coinbase = Transaction::coinbase(script_sig, reward, output_script);
    let merkle_root = coinbase.hash();

    let header = BlockHeader::new(version, Hash::zero(), merkle_root, time, bits, nonce);
    let block = Block::new(header, vec![coinbase]);
    let hash = block.hash();

    GenesisBlock { block, hash }
}

/// Script paying the genesis reward to [`GENESIS_OUTPUT_PUBKEY`]
pub fn genesis_output_script() -> Script {
    Script::new()
        .push_slice(&GENESIS_OUTPUT_PUBKEY)
        .push_opcode(OP_CHECKSIG)
}

/// Genesis block with the chain's fixed message and payout script
pub fn default_genesis(time: u32, nonce: u32, bits: u32, version: i32, reward: Amount) -> GenesisBlock {
    build_genesis(
        GENESIS_MESSAGE.as_bytes(),
        genesis_output_script(),
        time,
        nonce,
        bits,
        version,
        reward,
    )
}
