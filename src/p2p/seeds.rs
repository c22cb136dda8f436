//! Seed Node Configuration
//!
//! Bootstrap peers for initial discovery. The built-in tables only carry
//! fixed addresses; DNS seeding is supplied by whatever [`SeedSource`] the
//! networking layer plugs in.

use serde::Serialize;
use std::net::{IpAddr, SocketAddr};

/// A DNS seed host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub host: String,
    /// Whether the seed answers service-bit filtered queries (x1, x9, ...)
    pub supports_service_bits: bool,
}

/// Anything that can hand out bootstrap peers
pub trait SeedSource {
    fn dns_seeds(&self) -> &[DnsSeed];

    /// Fixed seeds as `ip` or `ip:port` strings
    fn fixed_seeds(&self) -> &[String];
}

/// Static seed tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedList {
    dns: Vec<DnsSeed>,
    fixed: Vec<String>,
}

impl SeedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dns_seed(mut self, host: &str, supports_service_bits: bool) -> Self {
        self.dns.push(DnsSeed {
            host: host.to_string(),
            supports_service_bits,
        });
        self
    }

    pub fn with_fixed_seed(mut self, addr: &str) -> Self {
        self.fixed.push(addr.to_string());
        self
    }
}

impl SeedSource for SeedList {
    fn dns_seeds(&self) -> &[DnsSeed] {
        &self.dns
    }

    fn fixed_seeds(&self) -> &[String] {
        &self.fixed
    }
}

/// Parse a seed address, applying `default_port` when none is given
pub fn parse_seed(seed: &str, default_port: u16) -> Option<SocketAddr> {
    if let Ok(addr) = seed.parse::<SocketAddr>() {
        return Some(addr);
    }
    seed.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, default_port))
}

/// All fixed seeds of a source as socket addresses, skipping invalid ones
pub fn fixed_seed_addresses(source: &dyn SeedSource, default_port: u16) -> Vec<SocketAddr> {
    source
        .fixed_seeds()
        .iter()
        .filter_map(|seed| parse_seed(seed, default_port))
        .collect()
}
