//! Network registry and active-network selection
//!
//! The registry owns one [`ConsensusProfile`] per [`Network`] and a
//! write-once slot for the network this process runs on.

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use tracing::info;

use super::{build_profile, ConsensusProfile, Network};
use crate::error::{InvariantViolation, NetworkError};
use crate::wallet::AddressClass;

/// The three profiles plus the process's active selection.
///
/// States: uninitialized until the first successful [`select`], then
/// active for good.
///
/// [`select`]: NetworkRegistry::select
#[derive(Debug)]
pub struct NetworkRegistry {
    main: ConsensusProfile,
    test: ConsensusProfile,
    regtest: ConsensusProfile,
    active: OnceCell<Network>,
}

impl NetworkRegistry {
    /// Build every profile and check the invariants that span networks
    pub fn build() -> Result<Self, InvariantViolation> {
        let registry = Self {
            main: build_profile(Network::Main)?,
            test: build_profile(Network::Test)?,
            regtest: build_profile(Network::Regtest)?,
            active: OnceCell::new(),
        };
        check_distinct(registry.profiles())?;
        Ok(registry)
    }

    /// Profile of a known network
    pub fn profile(&self, network: Network) -> &ConsensusProfile {
        match network {
            Network::Main => &self.main,
            Network::Test => &self.test,
            Network::Regtest => &self.regtest,
        }
    }

    pub fn profiles(&self) -> [&ConsensusProfile; 3] {
        [&self.main, &self.test, &self.regtest]
    }

    /// Look a profile up by name without touching the active selection
    pub fn resolve(&self, name: &str) -> Result<&ConsensusProfile, NetworkError> {
        let network: Network = name.parse()?;
        Ok(self.profile(network))
    }

    /// Make `name` the active network.
    ///
    /// Selecting the already active network again is a no-op; switching to
    /// another one is refused.
    pub fn select(&self, name: &str) -> Result<&ConsensusProfile, NetworkError> {
        let requested: Network = name.parse()?;
        let active = *self.active.get_or_init(|| {
            info!(network = %requested, "selected chain parameters");
            requested
        });

        if active != requested {
            return Err(NetworkError::AlreadySelected { active, requested });
        }
        Ok(self.profile(active))
    }

    /// The active profile.
    ///
    /// # Panics
    ///
    /// If no network has been selected yet. Reading parameters before
    /// selection is a startup-ordering bug.
    pub fn active(&self) -> &ConsensusProfile {
        match self.try_active() {
            Some(profile) => profile,
            None => panic!("chain parameters read before a network was selected"),
        }
    }

    pub fn try_active(&self) -> Option<&ConsensusProfile> {
        self.active.get().map(|network| self.profile(*network))
    }

    pub fn active_network(&self) -> Option<Network> {
        self.active.get().copied()
    }
}

/// No two profiles may share message start bytes or any address prefix
pub fn check_distinct(profiles: [&ConsensusProfile; 3]) -> Result<(), InvariantViolation> {
    let mut magics = HashMap::new();
    for profile in profiles {
        let magic = profile.magic().message_start;
        if let Some(first) = magics.insert(magic, profile.network()) {
            return Err(InvariantViolation::MagicCollision {
                first,
                second: profile.network(),
                magic: magic.to_string(),
            });
        }
    }

    for class in AddressClass::ALL {
        let mut seen: HashMap<&[u8], Network> = HashMap::new();
        for profile in profiles {
            let prefix = profile.prefixes().get(class);
            if let Some(first) = seen.insert(prefix, profile.network()) {
                return Err(InvariantViolation::PrefixCollision {
                    first,
                    second: profile.network(),
                    class,
                    prefix: hex::encode(prefix),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::{main_profile, regtest_profile, test_profile};

    fn registry() -> NetworkRegistry {
        NetworkRegistry::build().unwrap()
    }

    #[test]
    fn test_resolve_known_names() {
        let registry = registry();
        for network in Network::ALL {
            let profile = registry.resolve(network.name()).unwrap();
            assert_eq!(profile.network(), network);
            // Same instance every time
            assert!(std::ptr::eq(profile, registry.resolve(network.name()).unwrap()));
        }
    }

    #[test]
    fn test_resolve_unknown_leaves_state_untouched() {
        let registry = registry();
        assert_eq!(
            registry.resolve("mainnet").unwrap_err(),
            NetworkError::UnknownNetwork("mainnet".to_string())
        );
        assert!(registry.try_active().is_none());
    }

    #[test]
    fn test_select_then_active() {
        let registry = registry();
        let selected = registry.select("test").unwrap();
        assert_eq!(selected.network(), Network::Test);
        assert!(std::ptr::eq(selected, registry.active()));
        assert_eq!(registry.active(), registry.active());
        assert_eq!(registry.active_network(), Some(Network::Test));
    }

    #[test]
    fn test_select_unknown_does_not_activate() {
        let registry = registry();
        assert!(matches!(
            registry.select("bogus"),
            Err(NetworkError::UnknownNetwork(_))
        ));
        assert!(registry.try_active().is_none());
        assert!(registry.select("regtest").is_ok());
    }

    #[test]
    fn test_select_is_write_once() {
        let registry = registry();
        registry.select("regtest").unwrap();
        assert!(registry.select("regtest").is_ok());
        assert_eq!(
            registry.select("main").unwrap_err(),
            NetworkError::AlreadySelected {
                active: Network::Regtest,
                requested: Network::Main,
            }
        );
        assert_eq!(registry.active().network(), Network::Regtest);
    }

    #[test]
    #[should_panic(expected = "before a network was selected")]
    fn test_active_before_select_panics() {
        registry().active();
    }

    #[test]
    fn test_shared_magic_detected() {
        let test = test_profile().unwrap();
        let regtest = regtest_profile().unwrap();
        let err = check_distinct([&test, &regtest, &test]).unwrap_err();
        assert!(matches!(
            err,
            InvariantViolation::MagicCollision {
                first: Network::Test,
                second: Network::Test,
                ..
            }
        ));
    }

    #[test]
    fn test_shared_prefix_detected() {
        let main = main_profile().unwrap();
        let test = test_profile().unwrap();

        let mut parts = regtest_profile().unwrap().into_parts();
        parts.prefixes.ext_secret_key = main.prefixes().ext_secret_key;
        let regtest = ConsensusProfile::assemble(parts).unwrap();

        assert_eq!(
            check_distinct([&main, &test, &regtest]).unwrap_err(),
            InvariantViolation::PrefixCollision {
                first: Network::Main,
                second: Network::Regtest,
                class: AddressClass::ExtSecretKey,
                prefix: "0488ade4".to_string(),
            }
        );
    }

    #[test]
    fn test_built_profiles_are_distinct() {
        let registry = registry();
        assert_eq!(check_distinct(registry.profiles()), Ok(()));
    }
}
