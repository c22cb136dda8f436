//! Double SHA-256 hashing
//!
//! Block and transaction identifiers are sha256d digests. The bytes are kept
//! in wire order; hex text is the byte-reversed form used everywhere in
//! logs, checkpoints and explorers.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// 32-byte hash output, stored in wire (little-endian) order
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Create a zero hash (used for genesis previous hash)
    pub const fn zero() -> Self {
        Hash([0u8; 32])
    }

    /// Create hash from wire-order bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Parse display-order hex, with or without a `0x` prefix.
    ///
    /// Short input is left-padded with zeros, so `"0x0f"` parses to the
    /// number fifteen.
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let digits = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        if digits.len() > 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let padded = format!("{:0>64}", digits);
        let mut arr = [0u8; 32];
        hex::decode_to_slice(&padded, &mut arr)?;
        arr.reverse();
        Ok(Hash(arr))
    }

    /// Convert to display-order hex
    pub fn to_hex(&self) -> String {
        let mut display = self.0;
        display.reverse();
        hex::encode(display)
    }

    /// Get as wire-order bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Big-endian view, suitable for numeric comparison of targets
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut be = self.0;
        be.reverse();
        be
    }

    /// Build from a big-endian numeric representation
    pub fn from_be_bytes(mut be: [u8; 32]) -> Self {
        be.reverse();
        Hash(be)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::zero()
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Single SHA-256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Double SHA-256, the hash behind every block and transaction id
pub fn sha256d(data: &[u8]) -> Hash {
    Hash(sha256(&sha256(data)))
}

/// Hash two hashes together (for Merkle tree)
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut data = Vec::with_capacity(64);
    data.extend_from_slice(&left.0);
    data.extend_from_slice(&right.0);
    sha256d(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256d_known_vector() {
        // sha256d("hello"), wire order
        let hash = sha256d(b"hello");
        assert_eq!(
            hex::encode(hash.0),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn test_zero_hash() {
        let zero = Hash::zero();
        assert_eq!(zero.0, [0u8; 32]);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_hex_is_byte_reversed() {
        let hash = Hash::from_hex(
            "0x000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f",
        )
        .unwrap();
        assert_eq!(hash.0[0], 0x6f);
        assert_eq!(hash.0[31], 0x00);
        assert_eq!(
            hash.to_hex(),
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
        );
    }

    #[test]
    fn test_short_hex_is_left_padded() {
        let hash = Hash::from_hex("0f").unwrap();
        assert_eq!(hash.0[0], 0x0f);
        assert!(hash.0[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(Hash::from_hex("zz").is_err());
        assert!(Hash::from_hex(&"0".repeat(66)).is_err());
    }

    #[test]
    fn test_big_endian_view() {
        let hash = Hash::from_hex("7fff").unwrap();
        let be = hash.to_be_bytes();
        assert_eq!(&be[30..], &[0x7f, 0xff]);
        assert_eq!(Hash::from_be_bytes(be), hash);
    }

    #[test]
    fn test_hash_pair_order_matters() {
        let left = sha256d(b"left");
        let right = sha256d(b"right");
        assert_eq!(hash_pair(&left, &right), hash_pair(&left, &right));
        assert_ne!(hash_pair(&left, &right), hash_pair(&right, &left));
    }

    #[test]
    fn test_serializes_as_display_hex() {
        let hash = Hash::from_hex("01").unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.to_hex()));
    }
}
