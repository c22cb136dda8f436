//! BCKING chain parameter inspector
//!
//! Selects a network the way a node does at startup and prints the rules
//! it would run under.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bcking_core::chainparams::{select_params, ConsensusProfile};
use bcking_core::config::NodeConfig;
use bcking_core::consensus::DeploymentSpec;
use bcking_core::crypto::Hash;

#[derive(Debug, Parser)]
#[command(name = "bcking-params", about = "Show BCKING chain parameters")]
struct Cli {
    /// TOML config file
    #[arg(long)]
    conf: Option<PathBuf>,
    /// Network name: main, test or regtest
    #[arg(long)]
    network: Option<String>,
    /// Shorthand for --network test
    #[arg(long)]
    testnet: bool,
    /// Shorthand for --network regtest
    #[arg(long)]
    regtest: bool,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    network: &'static str,
    genesis_hash: Hash,
    merkle_root: Hash,
    message_start: String,
    default_port: u16,
    pow_limit: Hash,
    pow_limit_before_fork: Hash,
    fork_height: u32,
    deployments: Vec<&'a DeploymentSpec>,
    last_checkpoint: u32,
    last_checkpoint_hash: Hash,
}

impl<'a> Summary<'a> {
    fn new(profile: &'a ConsensusProfile) -> Self {
        let consensus = profile.consensus();
        let (last_checkpoint, last_checkpoint_hash) = profile.checkpoints().last();
        Self {
            network: profile.network_id(),
            genesis_hash: profile.genesis().hash(),
            merkle_root: profile.genesis().merkle_root(),
            message_start: profile.magic().message_start.to_string(),
            default_port: profile.default_port(),
            pow_limit: consensus.pow_limit,
            pow_limit_before_fork: consensus.pow_limit_before_fork,
            fork_height: consensus.fork_height,
            deployments: profile.deployments().iter().collect(),
            last_checkpoint,
            last_checkpoint_hash,
        }
    }

    fn print_text(&self) {
        println!("Network:          {}", self.network);
        println!("  Genesis:        {}", self.genesis_hash);
        println!("  Merkle Root:    {}", self.merkle_root);
        println!("  Magic:          {}", self.message_start);
        println!("  Port:           {}", self.default_port);
        println!("  PoW Limit:      {}", self.pow_limit);
        println!("  Pre-fork Limit: {}", self.pow_limit_before_fork);
        println!("  Fork Height:    {}", self.fork_height);
        for deployment in &self.deployments {
            println!(
                "  Deployment:     {} bit {} [{}, {})",
                deployment.id, deployment.bit, deployment.start_time, deployment.timeout
            );
        }
        println!(
            "  Checkpoint:     {} {}",
            self.last_checkpoint, self.last_checkpoint_hash
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = NodeConfig::load(cli.conf.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let network = config.resolve_network(cli.network.as_deref(), cli.testnet, cli.regtest)?;
    let profile = select_params(network.name())?;
    info!(%network, genesis = %profile.genesis().hash(), "chain parameters ready");

    let summary = Summary::new(profile);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print_text();
    }

    Ok(())
}
