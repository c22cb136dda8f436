//! Merkle tree implementation
//!
//! Used for computing transaction merkle roots in blocks.

use super::{hash_pair, Hash};

/// Compute the merkle root of a list of transaction hashes
///
/// If the list is empty, returns zero hash.
/// If a level has an odd number of elements, its last element is paired
/// with itself.
pub fn compute_merkle_root(hashes: &[Hash]) -> Hash {
    let mut current_level: Vec<Hash> = hashes.to_vec();

    if current_level.is_empty() {
        return Hash::zero();
    }

    while current_level.len() > 1 {
        if current_level.len() % 2 == 1 {
            let last = current_level[current_level.len() - 1];
            current_level.push(last);
        }

        current_level = current_level
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }

    current_level[0]
}
