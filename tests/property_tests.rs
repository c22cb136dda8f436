//! Property-based tests for BCKING chain parameters
//!
//! These tests check that the parameter tables and the primitives they are
//! built from hold their invariants under random inputs.

use proptest::prelude::*;
use std::collections::HashSet;

use bcking_core::chainparams::{build_profile, Network, NetworkRegistry};
use bcking_core::consensus::pow::{compact_within_limit, target_from_compact, target_to_compact};
use bcking_core::consensus::{BlockHeader, DeploymentId};
use bcking_core::crypto::{sha256d, Hash};
use bcking_core::node::default_genesis;
use bcking_core::wallet::AddressClass;

fn any_network() -> impl Strategy<Value = Network> {
    prop_oneof![
        Just(Network::Main),
        Just(Network::Test),
        Just(Network::Regtest),
    ]
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

proptest! {
    /// Header hashing is deterministic and covers the nonce
    #[test]
    fn prop_header_hash_deterministic(
        version in any::<i32>(),
        time in any::<u32>(),
        bits in any::<u32>(),
        nonce_a in any::<u32>(),
        nonce_b in any::<u32>(),
        seed in any::<u64>()
    ) {
        let prev = sha256d(&seed.to_le_bytes());
        let merkle = sha256d(&seed.to_be_bytes());
        let a = BlockHeader::new(version, prev, merkle, time, bits, nonce_a);
        let b = BlockHeader::new(version, prev, merkle, time, bits, nonce_b);

        prop_assert_eq!(a.hash(), a.clone().hash());
        if nonce_a != nonce_b {
            prop_assert_ne!(a.hash(), b.hash());
        }
    }

    /// Expanding, compressing and expanding again is stable
    #[test]
    fn prop_compact_roundtrip(size in 1u32..=32, mantissa in 1u32..=0x7f_ffff) {
        let bits = (size << 24) | mantissa;
        let target = target_from_compact(bits).unwrap();
        prop_assert_eq!(target_from_compact(target_to_compact(&target)), Some(target));
    }

    /// The sign bit with a non-zero mantissa never yields a target
    #[test]
    fn prop_negative_compact_rejected(size in 0u32..=255, mantissa in 1u32..=0x7f_ffff) {
        let bits = (size << 24) | 0x0080_0000 | mantissa;
        prop_assert!(target_from_compact(bits).is_none());
        prop_assert!(!compact_within_limit(bits, &Hash::from_be_bytes([0xff; 32])));
    }

    /// Hex display order survives a parse
    #[test]
    fn prop_hash_hex_roundtrip(bytes in any::<[u8; 32]>()) {
        let hash = Hash::from_bytes(bytes);
        prop_assert_eq!(Hash::from_hex(&hash.to_hex()).unwrap(), hash);
    }

    /// Checkpoint lookup answers exactly for the anchored heights
    #[test]
    fn prop_checkpoint_lookup_exact(network in any_network(), height in 0u32..1_000_000) {
        let profile = build_profile(network).unwrap();
        let store = profile.checkpoints();
        let anchored = store.iter().find(|c| c.height == height).map(|c| c.hash);
        prop_assert_eq!(store.lookup(height), anchored);
    }

    /// Each halving exactly halves the subsidy
    #[test]
    fn prop_subsidy_halves(network in any_network(), height in 0u32..100_000_000) {
        let profile = build_profile(network).unwrap();
        let consensus = profile.consensus();
        let now = consensus.block_subsidy(height);
        let next = consensus.block_subsidy(height + consensus.subsidy_halving_interval);
        prop_assert!(now >= 0);
        prop_assert_eq!(next, now / 2);
    }

    /// The proof-of-work limit only switches at the fork height
    #[test]
    fn prop_pow_limit_switches_at_fork(network in any_network(), height in any::<u32>()) {
        let profile = build_profile(network).unwrap();
        let consensus = profile.consensus();
        let expected = if height < consensus.fork_height {
            &consensus.pow_limit_before_fork
        } else {
            &consensus.pow_limit
        };
        prop_assert_eq!(consensus.pow_limit_at(height), expected);
    }

    /// A deployment never signals outside its window
    #[test]
    fn prop_signalling_window(network in any_network(), median_time in any::<i64>()) {
        let profile = build_profile(network).unwrap();
        for spec in profile.deployments().iter() {
            if spec.is_signalling_window(median_time) {
                prop_assert!(median_time >= spec.start_time);
                prop_assert!(median_time < spec.timeout);
                prop_assert!(!spec.never_activates());
            }
        }
    }
}

// ============================================================================
// TABLE INVARIANTS
// ============================================================================

#[test]
fn test_every_profile_reproduces_its_genesis() {
    for network in Network::ALL {
        let profile = build_profile(network).unwrap();
        let genesis = profile.genesis();
        let rebuilt = default_genesis(
            genesis.time(),
            genesis.nonce(),
            genesis.bits(),
            genesis.version(),
            genesis.coinbase().total_output_value(),
        );
        assert_eq!(rebuilt.hash(), profile.consensus().hash_genesis_block);
        assert_eq!(rebuilt.merkle_root(), profile.consensus().genesis_merkle_root);
        assert!(genesis.prev_hash().is_zero());
    }
}

#[test]
fn test_deployment_bits_distinct_per_profile() {
    for network in Network::ALL {
        let profile = build_profile(network).unwrap();
        let bits: HashSet<u8> = profile.deployments().iter().map(|d| d.bit).collect();
        assert_eq!(bits.len(), DeploymentId::ALL.len(), "{network}");
        for id in DeploymentId::ALL {
            assert_eq!(profile.deployments().get(id).id, id);
        }
    }
}

#[test]
fn test_magic_and_prefixes_distinct_across_profiles() {
    let registry = NetworkRegistry::build().unwrap();
    let profiles = registry.profiles();

    let magics: HashSet<_> = profiles.iter().map(|p| p.magic().message_start).collect();
    assert_eq!(magics.len(), 3);

    let ports: HashSet<_> = profiles.iter().map(|p| p.default_port()).collect();
    assert_eq!(ports.len(), 3);

    for class in AddressClass::ALL {
        let prefixes: HashSet<&[u8]> = profiles.iter().map(|p| p.prefixes().get(class)).collect();
        assert_eq!(prefixes.len(), 3, "{class}");
    }
}

#[test]
fn test_genesis_within_pre_fork_limit() {
    for network in Network::ALL {
        let profile = build_profile(network).unwrap();
        assert!(compact_within_limit(
            profile.genesis().bits(),
            profile.consensus().pow_limit_at(0)
        ));
    }
}
