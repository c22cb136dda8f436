//! Parameter tables for the three BCKING networks
//!
//! What makes a good checkpoint block: it is surrounded by blocks with
//! reasonable timestamps (none before it stamped later, none after it
//! stamped earlier) and contains no strange transactions.

use super::{
    parse_hash, Bip34Activation, CheckpointStats, CheckpointStore, ConsensusParameters,
    ConsensusProfile, GenesisSeed, Network, PolicyFlags, ProfileParts,
};
use crate::constants::{COIN, NO_TIMEOUT};
use crate::consensus::{DeploymentId, DeploymentSpec, DeploymentTable};
use crate::error::InvariantViolation;
use crate::p2p::{MessageStart, NetworkMagic, SeedList};
use crate::wallet::AddressPrefixes;

/// Two weeks
const POW_TARGET_TIMESPAN: i64 = 14 * 24 * 60 * 60;

/// Ten minutes
const POW_TARGET_SPACING: i64 = 10 * 60;

/// Merkle root shared by every network's genesis block
const GENESIS_MERKLE_ROOT: &str =
    "0x4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

/// Jan 1 2008 .. Dec 31 2008
const TESTDUMMY_START: i64 = 1199145601;
const TESTDUMMY_TIMEOUT: i64 = 1230767999;

const MAIN_CHECKPOINTS: &[(u32, &str)] = &[
    (0, "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"),
    (10000, "07d4b1019c4d88e5404c5da3ae8d6850a4a53cb34d095cd0813481504378348b"),
    (20000, "0be1c3dbcc40fb8f2169f5c25ffa3e23aa8c731fca55447b942a691f5bda8fea"),
    (30000, "07d8f2d440c985fa069eff4ff7df0371e509613d69a8e31738d530e00e34e0f9"),
    (40000, "0e358a120f469b2d132ae53c0e59b88252a41b39140bd34d598c09a1f833a41b"),
    (50000, "0f5dd991bcddbb15ac08be02a567f08487c1119a13755001c418984eff7fde1b"),
    (60000, "05bc15b39585d991e7b271e74eba2fa1d3692c9fd4df6b3ea72efe5beaab6428"),
    (70000, "0fad853074bbf75b9adf6ec2c63f1d08666daafc1bed613ee2cbb9a03218e633"),
    (80000, "0ab2fac7c0cce6df25d7ab0f4d2d96efd6d8f5ec7d504e5dc5fae93a78b593a4"),
    (90000, "0aa81fb8e09d2885ecd8af4a7b82402ac96b4a7e95471cbf7e183415a896a2c2"),
    (100000, "07de29fea3d9abb2ad108e0caab5b467e1b1ba7771bd731b0486041427e9affa"),
    (110000, "02ba8b755d0836e6f4e789c12a671a76d6133affa6e60df9a9787553bf1b8780"),
    (120000, "00fb3cc4c26e5901a08156ebf290a41d8d68e0d47d774ce83385427ec929ddbc"),
    (130000, "0637549bafcd969630dd90f3fb8627b49df1a6f79e763c5a85bc4b1ecd74eb5c"),
    (140000, "02897de380a379e828e1ef12eee8fb4fb63a7f486c7b4dbca9690745c0bf0446"),
    (150000, "00e91f045ea4c5be3a6c879ad025b873ce8a2d10c2072dd5ccf100857240caca"),
    (160000, "0cf698f730e5d45c75f5b9f8a4d98adba5e03f7b0f74415ff976002409606b61"),
    (170000, "03cbb6eae20cead1b9df5a4c38cb1be12526660d197b528f8c1420b1fec91b4e"),
    (180000, "05c92ddea8ef9d46b64c11545599c74556fd7a1033280e056c6029e5e2443213"),
    (190000, "096285e35639cd24fd373f629ac94e6b6822e2a0e97d24b7ee5a9ec613073870"),
    (200000, "0d95ea0f0dded82b3d606fabb5fdfcf8cfde811e080a3aaad61f8701664acc73"),
    (210000, "0361fd44a03b3e4c61b439bac7d816c305c1acf0330f100886e2d43b75d8d282"),
    (220000, "08388b56fd7358a1081a84e11c219c2cf8de4fdd42e6598a0d42b87f601e2d19"),
    (230000, "09b43838294043ad3df831470ae01317feed2b2d8d1e3cdb918e42ba5b9f1822"),
    (240000, "084f704b2accf7fb0018843bb19fbeb08e3f5b46cdae5807d7ca5bf07dd31a45"),
    (250000, "01aec042b4ed8b6541a5f686f9a177e54ca00627575547de0181165b13aff05f"),
    (260000, "09d25283e98855ca60d64106c529730ce8e5f23d0c449c76c7a1cf975eefbe8b"),
    (270000, "08a758de4a88af8a404d5b4189183352714db90bb7c24d2d3455e0ce40e65df6"),
    (280000, "056d8a1313b2cabb0621a8dd5959d58a50b11c336888547c2501d8ed24869dc7"),
    (290000, "0866f3488a491d99e2e31c14a8f5fa4e57bdd8c0255b323acf5e4cb315686f17"),
    (300000, "0f514c278d0137ec50de44f07174710946051fbaf4c2cf1f4eea8659f4152e5c"),
    (310000, "040384214f83cc9286d3abcc220cf35ad664c8e4f4ebea5e46cf3528a91e9088"),
    (320000, "069a8fa82e133cb96efeb2b03e0576e620e08c5d86b88ffe8f1d9a7932a10be3"),
    (330000, "08e63f1e82dcaaa5275a627a08d9c1fe68a7728869b69a5d05a6d5e8ceba833f"),
    (340000, "0d602078276cd9248dd869ad1e200321c98a1eedaf957b97d66aa78c405a3c51"),
    (350000, "088f1836735c85cf666b6eac95f40da2817aa0fabf5e875fa930a779e884ee09"),
    (360000, "05b0de671776d0b005c7f43b9320fb4fab5ca624f3502fb01a3ca2a22ddc65b0"),
    (370000, "048f05305d3b40b7c672af476331a7dd446eaa457a4e673bb1d03130f67a37d1"),
    (380000, "0c097b43fd2d8b76cda9e2cb2fdf3b8555a427f19f1f4c0c5bdf853395bdc293"),
    (390000, "01ab59f90473db47b74fd56492536369fe035066a7d6d876bd8db94e8bf9af70"),
    (400000, "0ac0d23d9319c56375ead881375ff92d767069469c127d960bfef5577cfff3c4"),
    (410000, "021d8f8987605c1fb6c3bcd7f9fd9a438d7acfe284295d8b20c682dfc41e5b8f"),
    (420000, "007eac74b390991ff5882ecb685f1c79c8b19b8f128d637badfea20aa7bed4d8"),
    (430000, "09f35059f62bc08105d3f75e1396f666f704f246ce26e275ab8bd1a374f9533c"),
    (440000, "09a9dff6ff23af7aaf4ff7b4b3086837b1111ff21086b4002ac8b969fc64d87a"),
    (450000, "0d4b15c1a148bed9167b38b26ba8b3f7500063f61680e60d8fe901f964b12592"),
    (460000, "0eab07ca36ab5fd7d54db940605832a82168e572b26c7147a19ebe1137344700"),
    (470000, "0a84df73e418581beedff3f411249079e596b3b22f5eb2394d8e17e66ff06335"),
    (480000, "0f8a71487b67ee464e62aca52ecb96ce007da949316e8a5c3003dc40629c8991"),
    (490000, "0f527fbbe25f1cd5d01b5c1d7fab8718b59b199ae8e29df2c9f8953c684b3746"),
    (500000, "000000000000007848d3c75b228e873f62aa35d65dfb730b4ba1b57b279d6ea7"),
];

/// Build the profile for `network`
pub fn build_profile(network: Network) -> Result<ConsensusProfile, InvariantViolation> {
    match network {
        Network::Main => main_profile(),
        Network::Test => test_profile(),
        Network::Regtest => regtest_profile(),
    }
}

/// Production network
pub fn main_profile() -> Result<ConsensusProfile, InvariantViolation> {
    let deployments = DeploymentTable::new([
        DeploymentSpec::new(DeploymentId::TestDummy, 28, TESTDUMMY_START, TESTDUMMY_TIMEOUT),
        // May 1st 2016 .. May 1st 2017
        DeploymentSpec::new(DeploymentId::Csv, 0, 1462060800, 1493596800),
        // Never / undefined
        DeploymentSpec::new(DeploymentId::Segwit, 1, 0, 0),
    ])?;

    let consensus = ConsensusParameters {
        subsidy_halving_interval: 210000,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        bip34: Some(Bip34Activation {
            height: 227931,
            hash: parse_hash("0x000000000000024b89b42a942fe0d9fea3bb44ab7bd1b19115dd6a759c0808b8")?,
        }),
        fork_height: 500000,
        fork_difficulty_decrement: 26000,
        pow_limit: parse_hash("00000000000008ec8e9c4afba2433a085062dc9bdb6eaba190bee41a8733ee9a")?,
        pow_limit_before_fork: parse_hash(
            "0fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        )?,
        premine_address: Some("1HtfQehopfz43KWmiFgd2jC9jPEovMpFBX"),
        pow_target_timespan: POW_TARGET_TIMESPAN,
        pow_target_spacing: POW_TARGET_SPACING,
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        // 95% of 2016
        rule_change_activation_threshold: 1916,
        miner_confirmation_window: 2016,
        deployments,
        hash_genesis_block: parse_hash(
            "0x000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f",
        )?,
        genesis_merkle_root: parse_hash(GENESIS_MERKLE_ROOT)?,
    };

    let checkpoints = CheckpointStore::from_hex(
        MAIN_CHECKPOINTS,
        CheckpointStats {
            last_checkpoint_time: 1515235845,
            tx_count: 491710,
            tx_per_day: 3,
        },
    )?;

    ConsensusProfile::assemble(ProfileParts {
        network: Network::Main,
        consensus,
        genesis: GenesisSeed {
            time: 1231006505,
            nonce: 2083236893,
            bits: 0x1d00ffff,
            version: 1,
            reward: 50 * COIN,
        },
        checkpoints,
        // Rarely used upper ASCII, not valid UTF-8, a large integer at any
        // alignment
        magic: NetworkMagic {
            message_start: MessageStart([0xaf, 0x32, 0x16, 0x16]),
            default_port: 16333,
            prune_after_height: 100000,
        },
        prefixes: AddressPrefixes {
            pubkey_address: [0],
            script_address: [5],
            secret_key: [128],
            ext_public_key: [0x04, 0x88, 0xB2, 0x1E],
            ext_secret_key: [0x04, 0x88, 0xAD, 0xE4],
        },
        // Empty: no fixed seed table ships with the crate, DNS seeds come
        // from the networking layer's SeedSource
        seeds: SeedList::new(),
        policy: PolicyFlags {
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            testnet_to_be_deprecated_field_rpc: false,
        },
    })
}

/// Public test network
pub fn test_profile() -> Result<ConsensusProfile, InvariantViolation> {
    let deployments = DeploymentTable::new([
        DeploymentSpec::new(DeploymentId::TestDummy, 28, TESTDUMMY_START, TESTDUMMY_TIMEOUT),
        // March 1st 2016 .. May 1st 2017
        DeploymentSpec::new(DeploymentId::Csv, 0, 1456790400, 1493596800),
        // May 1st 2016 .. May 1st 2017
        DeploymentSpec::new(DeploymentId::Segwit, 1, 1462060800, 1493596800),
    ])?;

    let consensus = ConsensusParameters {
        subsidy_halving_interval: 210000,
        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 100,
        bip34: Some(Bip34Activation {
            height: 21111,
            hash: parse_hash("0x0000000023b3a96d3484e5abb3755c413e7d41500f8e2a5c3f0dd01299cd8ef8")?,
        }),
        fork_height: 1255842,
        fork_difficulty_decrement: 10,
        pow_limit: parse_hash("00000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff")?,
        pow_limit_before_fork: parse_hash(
            "0fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        )?,
        premine_address: Some("mkf1kNYgNjkQqARudKairecZxyUBpzFCFd"),
        pow_target_timespan: POW_TARGET_TIMESPAN,
        pow_target_spacing: POW_TARGET_SPACING,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: false,
        // 75% for testchains
        rule_change_activation_threshold: 1512,
        miner_confirmation_window: 2016,
        deployments,
        hash_genesis_block: parse_hash(
            "0x000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943",
        )?,
        genesis_merkle_root: parse_hash(GENESIS_MERKLE_ROOT)?,
    };

    let checkpoints = CheckpointStore::from_hex(
        &[(546, "000000002a936ca763904c3c35fce2f3556c559c0214345d31b1bcebf76acb70")],
        CheckpointStats {
            last_checkpoint_time: 1337966069,
            tx_count: 1488,
            tx_per_day: 300,
        },
    )?;

    ConsensusProfile::assemble(ProfileParts {
        network: Network::Test,
        consensus,
        genesis: GenesisSeed {
            time: 1296688602,
            nonce: 414098458,
            bits: 0x1d00ffff,
            version: 1,
            reward: 50 * COIN,
        },
        checkpoints,
        magic: NetworkMagic {
            message_start: MessageStart([0xaa, 0xa7, 0x4d, 0x22]),
            default_port: 18333,
            prune_after_height: 1000,
        },
        prefixes: AddressPrefixes {
            pubkey_address: [111],
            script_address: [196],
            secret_key: [239],
            ext_public_key: [0x04, 0x35, 0x87, 0xCF],
            ext_secret_key: [0x04, 0x35, 0x83, 0x94],
        },
        // Empty, as on main
        seeds: SeedList::new(),
        policy: PolicyFlags {
            mining_requires_peers: true,
            default_consistency_checks: false,
            require_standard: false,
            mine_blocks_on_demand: false,
            testnet_to_be_deprecated_field_rpc: true,
        },
    })
}

/// Local regression-test network
pub fn regtest_profile() -> Result<ConsensusProfile, InvariantViolation> {
    let deployments = DeploymentTable::new([
        DeploymentSpec::new(DeploymentId::TestDummy, 28, 0, NO_TIMEOUT),
        DeploymentSpec::new(DeploymentId::Csv, 0, 0, NO_TIMEOUT),
        DeploymentSpec::new(DeploymentId::Segwit, 1, 0, NO_TIMEOUT),
    ])?;

    let pow_limit =
        parse_hash("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")?;

    let consensus = ConsensusParameters {
        subsidy_halving_interval: 150,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        // BIP34 has not necessarily activated on regtest
        bip34: None,
        fork_height: 200,
        fork_difficulty_decrement: 100,
        pow_limit,
        pow_limit_before_fork: pow_limit,
        premine_address: None,
        pow_target_timespan: POW_TARGET_TIMESPAN,
        pow_target_spacing: POW_TARGET_SPACING,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: true,
        // 75% for testchains
        rule_change_activation_threshold: 108,
        // Faster than normal for regtest (144 instead of 2016)
        miner_confirmation_window: 144,
        deployments,
        hash_genesis_block: parse_hash(
            "0x0f9188f13cb7b2c71f2a335e3a4fc328bf5beb436012afca590b1a11466e2206",
        )?,
        genesis_merkle_root: parse_hash(GENESIS_MERKLE_ROOT)?,
    };

    let checkpoints = CheckpointStore::from_hex(
        &[(0, "0f9188f13cb7b2c71f2a335e3a4fc328bf5beb436012afca590b1a11466e2206")],
        CheckpointStats::default(),
    )?;

    ConsensusProfile::assemble(ProfileParts {
        network: Network::Regtest,
        consensus,
        genesis: GenesisSeed {
            time: 1296688602,
            nonce: 2,
            bits: 0x207fffff,
            version: 1,
            reward: 50 * COIN,
        },
        checkpoints,
        magic: NetworkMagic {
            message_start: MessageStart([0x5a, 0xf6, 0x3b, 0xe5]),
            default_port: 18444,
            prune_after_height: 1000,
        },
        // Distinct from the test network so regtest keys never parse there
        prefixes: AddressPrefixes {
            pubkey_address: [122],
            script_address: [188],
            secret_key: [250],
            ext_public_key: [0x04, 0x4a, 0x52, 0x62],
            ext_secret_key: [0x04, 0x4a, 0x4e, 0x28],
        },
        // No fixed or DNS seeds on a local network
        seeds: SeedList::new(),
        policy: PolicyFlags {
            mining_requires_peers: false,
            default_consistency_checks: true,
            require_standard: false,
            mine_blocks_on_demand: true,
            testnet_to_be_deprecated_field_rpc: false,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::p2p::{fixed_seed_addresses, SeedSource};

    #[test]
    fn test_every_network_assembles() {
        for network in Network::ALL {
            let profile = build_profile(network).unwrap();
            assert_eq!(profile.network(), network);
        }
    }

    #[test]
    fn test_genesis_hashes() {
        let expected = [
            (Network::Main, "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"),
            (Network::Test, "000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943"),
            (Network::Regtest, "0f9188f13cb7b2c71f2a335e3a4fc328bf5beb436012afca590b1a11466e2206"),
        ];
        for (network, hash) in expected {
            let profile = build_profile(network).unwrap();
            assert_eq!(profile.genesis().hash().to_hex(), hash);
            assert_eq!(
                profile.genesis().merkle_root().to_hex(),
                "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"
            );
        }
    }

    #[test]
    fn test_main_checkpoints() {
        let profile = main_profile().unwrap();
        let checkpoints = profile.checkpoints();
        assert_eq!(checkpoints.len(), 51);
        assert_eq!(checkpoints.lookup(0), Some(profile.genesis().hash()));
        assert_eq!(
            checkpoints.lookup(250000).map(|h| h.to_hex()).as_deref(),
            Some("01aec042b4ed8b6541a5f686f9a177e54ca00627575547de0181165b13aff05f")
        );
        assert_eq!(checkpoints.lookup(250001), None);
        assert_eq!(checkpoints.last().0, 500000);
        assert_eq!(checkpoints.stats().tx_count, 491710);
    }

    #[test]
    fn test_difficulty_interval() {
        let profile = main_profile().unwrap();
        assert_eq!(profile.consensus().difficulty_adjustment_interval(), 2016);
        assert_eq!(
            profile.consensus().difficulty_adjustment_interval(),
            profile.consensus().miner_confirmation_window as i64
        );
    }

    #[test]
    fn test_pow_limit_switches_at_fork() {
        let profile = main_profile().unwrap();
        let consensus = profile.consensus();
        assert_eq!(consensus.pow_limit_at(499999), &consensus.pow_limit_before_fork);
        assert_eq!(consensus.pow_limit_at(500000), &consensus.pow_limit);
    }

    #[test]
    fn test_subsidy_schedule() {
        let profile = regtest_profile().unwrap();
        let consensus = profile.consensus();
        assert_eq!(consensus.block_subsidy(0), 50 * COIN);
        assert_eq!(consensus.block_subsidy(149), 50 * COIN);
        assert_eq!(consensus.block_subsidy(150), 25 * COIN);
        assert_eq!(consensus.block_subsidy(150 * 64), 0);
    }

    #[test]
    fn test_bip34() {
        let main = main_profile().unwrap();
        assert!(!main.consensus().is_bip34_active(227930));
        assert!(main.consensus().is_bip34_active(227931));
        let regtest = regtest_profile().unwrap();
        assert!(!regtest.consensus().is_bip34_active(u32::MAX));
    }

    #[test]
    fn test_regtest_deployments_never_expire() {
        let profile = regtest_profile().unwrap();
        assert!(profile.deployments().iter().all(|d| d.never_expires()));
        let main = main_profile().unwrap();
        assert!(main.deployments().get(DeploymentId::Segwit).never_activates());
    }

    #[test]
    fn test_builtin_seed_tables_are_empty() {
        for network in Network::ALL {
            let profile = build_profile(network).unwrap();
            let seeds = profile.seeds();
            assert!(seeds.dns_seeds().is_empty(), "{network}");
            assert!(fixed_seed_addresses(seeds, profile.default_port()).is_empty());
        }
    }
}
