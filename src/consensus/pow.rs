//! Compact difficulty encoding
//!
//! Conversions between the 32-bit "bits" field and full 256-bit targets.
//! Targets are carried as [`Hash`] values so they compare against
//! proof-of-work limits directly.

use crate::crypto::Hash;

/// Expand a compact target.
///
/// Returns `None` for encodings Bitcoin treats as invalid: a set sign bit
/// with a non-zero mantissa, or a value that overflows 256 bits.
pub fn target_from_compact(bits: u32) -> Option<Hash> {
    let size = (bits >> 24) as usize;
    let mut word = bits & 0x007f_ffff;

    if word != 0 && bits & 0x0080_0000 != 0 {
        return None;
    }

    let mut target = [0u8; 32];

    if size <= 3 {
        word >>= 8 * (3 - size);
        target[28..32].copy_from_slice(&word.to_be_bytes());
        return Some(Hash::from_be_bytes(target));
    }

    let overflow = word != 0
        && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
    if overflow {
        return None;
    }

    // Mantissa byte k (0 = least significant) sits at byte position
    // size - 3 + k counted from the least significant end.
    for k in 0..3 {
        let position = size - 3 + k;
        if position < 32 {
            target[31 - position] = ((word >> (8 * k)) & 0xff) as u8;
        }
    }

    Some(Hash::from_be_bytes(target))
}

/// Compress a target into its compact form
pub fn target_to_compact(target: &Hash) -> u32 {
    let be = target.to_be_bytes();

    let first_nonzero = match be.iter().position(|b| *b != 0) {
        Some(index) => index,
        None => return 0,
    };

    let mut size = (32 - first_nonzero) as u32;
    let mut compact = if size <= 3 {
        let mut low = [0u8; 4];
        low.copy_from_slice(&be[28..32]);
        u32::from_be_bytes(low) << (8 * (3 - size))
    } else {
        (be[first_nonzero] as u32) << 16
            | (be[first_nonzero + 1] as u32) << 8
            | be[first_nonzero + 2] as u32
    };

    // The 0x00800000 bit is the sign; move it out of the mantissa
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }

    compact | (size << 24)
}

/// Numeric comparison: is `target` no larger than `limit`?
pub fn target_within(target: &Hash, limit: &Hash) -> bool {
    target.to_be_bytes() <= limit.to_be_bytes()
}

/// Whether a compact target is well-formed and no easier than `limit`
pub fn compact_within_limit(bits: u32, limit: &Hash) -> bool {
    match target_from_compact(bits) {
        Some(target) => !target.is_zero() && target_within(&target, limit),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_mainnet_genesis_bits() {
        let target = target_from_compact(0x1d00ffff).unwrap();
        assert_eq!(
            target.to_hex(),
            "00000000ffff0000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_expand_regtest_bits() {
        let target = target_from_compact(0x207fffff).unwrap();
        assert_eq!(
            target.to_hex(),
            "7fffff0000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_small_exponent() {
        let target = target_from_compact(0x01123456).unwrap();
        assert_eq!(target, Hash::from_hex("12").unwrap());
        let target = target_from_compact(0x03123456).unwrap();
        assert_eq!(target, Hash::from_hex("123456").unwrap());
    }

    #[test]
    fn test_negative_and_overflow_rejected() {
        assert!(target_from_compact(0x04923456).is_none());
        assert!(target_from_compact(0xff123456).is_none());
        // A zero mantissa is never negative
        assert!(target_from_compact(0x01800000).is_some());
    }

    #[test]
    fn test_compact_roundtrip_for_chain_bits() {
        for bits in [0x1d00ffffu32, 0x207fffff, 0x1b0404cb, 0x1c00ffff] {
            let target = target_from_compact(bits).unwrap();
            assert_eq!(target_to_compact(&target), bits);
        }
    }

    #[test]
    fn test_compact_sign_bit_moves_to_exponent() {
        let target = Hash::from_hex("80").unwrap();
        assert_eq!(target_to_compact(&target), 0x02008000);
    }

    #[test]
    fn test_within_limit() {
        let limit = Hash::from_hex("00000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff")
            .unwrap();
        assert!(compact_within_limit(0x1d00ffff, &limit));
        assert!(!compact_within_limit(0x207fffff, &limit));
        assert!(!compact_within_limit(0, &limit));
    }
}
