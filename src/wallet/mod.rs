//! Wallet-facing encoding constants - address prefixes and base58check

mod address;

pub use address::*;
