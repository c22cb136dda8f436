//! Base58 address prefixes
//!
//! Each network prepends its own version bytes before base58check-encoding
//! keys and script hashes, so an address from one network is never
//! accepted on another.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::crypto::sha256d;

/// Length of a decoded pubkey-hash or script-hash address payload
const ADDRESS_PAYLOAD_LEN: usize = 21;

const CHECKSUM_LEN: usize = 4;

/// Address decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid base58 encoding")]
    InvalidBase58,
    #[error("invalid checksum")]
    InvalidChecksum,
    #[error("invalid payload length {0}")]
    InvalidLength(usize),
    #[error("version byte {found} does not match expected {expected}")]
    WrongVersion { expected: u8, found: u8 },
}

/// The kinds of base58 payload a prefix can mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressClass {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl AddressClass {
    pub const ALL: [AddressClass; 5] = [
        AddressClass::PubkeyAddress,
        AddressClass::ScriptAddress,
        AddressClass::SecretKey,
        AddressClass::ExtPublicKey,
        AddressClass::ExtSecretKey,
    ];
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressClass::PubkeyAddress => "pubkey-address",
            AddressClass::ScriptAddress => "script-address",
            AddressClass::SecretKey => "secret-key",
            AddressClass::ExtPublicKey => "ext-public-key",
            AddressClass::ExtSecretKey => "ext-secret-key",
        };
        f.write_str(name)
    }
}

/// Version bytes for every address class on one network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressPrefixes {
    pub pubkey_address: [u8; 1],
    pub script_address: [u8; 1],
    pub secret_key: [u8; 1],
    pub ext_public_key: [u8; 4],
    pub ext_secret_key: [u8; 4],
}

impl AddressPrefixes {
    pub fn get(&self, class: AddressClass) -> &[u8] {
        match class {
            AddressClass::PubkeyAddress => &self.pubkey_address,
            AddressClass::ScriptAddress => &self.script_address,
            AddressClass::SecretKey => &self.secret_key,
            AddressClass::ExtPublicKey => &self.ext_public_key,
            AddressClass::ExtSecretKey => &self.ext_secret_key,
        }
    }

    /// Classify a base58check address as pubkey-hash or script-hash
    pub fn classify(&self, address: &str) -> Result<AddressClass, AddressError> {
        let payload = decode_address_payload(address)?;
        match payload[0] {
            v if v == self.pubkey_address[0] => Ok(AddressClass::PubkeyAddress),
            v if v == self.script_address[0] => Ok(AddressClass::ScriptAddress),
            found => Err(AddressError::WrongVersion {
                expected: self.pubkey_address[0],
                found,
            }),
        }
    }

    /// Decode a pubkey-hash address and return its 20-byte key hash
    pub fn decode_pubkey_address(&self, address: &str) -> Result<[u8; 20], AddressError> {
        let payload = decode_address_payload(address)?;
        if payload[0] != self.pubkey_address[0] {
            return Err(AddressError::WrongVersion {
                expected: self.pubkey_address[0],
                found: payload[0],
            });
        }
        let mut key_hash = [0u8; 20];
        key_hash.copy_from_slice(&payload[1..]);
        Ok(key_hash)
    }
}

/// Decode base58check, returning the payload without its checksum
pub fn decode_base58check(encoded: &str) -> Result<Vec<u8>, AddressError> {
    let mut decoded = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| AddressError::InvalidBase58)?;

    if decoded.len() < CHECKSUM_LEN {
        return Err(AddressError::InvalidLength(decoded.len()));
    }

    let split = decoded.len() - CHECKSUM_LEN;
    let expected = sha256d(&decoded[..split]);
    if decoded[split..] != expected.0[..CHECKSUM_LEN] {
        return Err(AddressError::InvalidChecksum);
    }

    decoded.truncate(split);
    Ok(decoded)
}

/// Encode a payload with its base58check checksum
pub fn encode_base58check(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum.0[..CHECKSUM_LEN]);
    bs58::encode(data).into_string()
}

fn decode_address_payload(address: &str) -> Result<Vec<u8>, AddressError> {
    let payload = decode_base58check(address)?;
    if payload.len() != ADDRESS_PAYLOAD_LEN {
        return Err(AddressError::InvalidLength(payload.len()));
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: AddressPrefixes = AddressPrefixes {
        pubkey_address: [0],
        script_address: [5],
        secret_key: [128],
        ext_public_key: [0x04, 0x88, 0xB2, 0x1E],
        ext_secret_key: [0x04, 0x88, 0xAD, 0xE4],
    };

    #[test]
    fn test_decode_known_mainnet_address() {
        let key_hash = MAIN
            .decode_pubkey_address("1HtfQehopfz43KWmiFgd2jC9jPEovMpFBX")
            .unwrap();
        let mut payload = vec![0u8];
        payload.extend_from_slice(&key_hash);
        assert_eq!(encode_base58check(&payload), "1HtfQehopfz43KWmiFgd2jC9jPEovMpFBX");
    }

    #[test]
    fn test_wrong_network_rejected() {
        let err = MAIN
            .decode_pubkey_address("mkf1kNYgNjkQqARudKairecZxyUBpzFCFd")
            .unwrap_err();
        assert_eq!(
            err,
            AddressError::WrongVersion {
                expected: 0,
                found: 111
            }
        );
    }

    #[test]
    fn test_classify() {
        let script_address = encode_base58check(&[&[5u8][..], &[7u8; 20][..]].concat());
        assert_eq!(MAIN.classify(&script_address), Ok(AddressClass::ScriptAddress));
        assert_eq!(
            MAIN.classify("1HtfQehopfz43KWmiFgd2jC9jPEovMpFBX"),
            Ok(AddressClass::PubkeyAddress)
        );
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        // Last character changed
        assert_eq!(
            decode_base58check("1HtfQehopfz43KWmiFgd2jC9jPEovMpFBY"),
            Err(AddressError::InvalidChecksum)
        );
        assert_eq!(decode_base58check("0OIl"), Err(AddressError::InvalidBase58));
    }

    #[test]
    fn test_prefix_lookup_by_class() {
        assert_eq!(MAIN.get(AddressClass::SecretKey), &[128]);
        assert_eq!(MAIN.get(AddressClass::ExtPublicKey), &[0x04, 0x88, 0xB2, 0x1E]);
    }
}
