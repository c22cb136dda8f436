//! Consensus primitives - blocks, transactions, scripts, targets and
//! versionbits deployments

mod block;
mod deployment;
pub mod pow;
mod script;
mod transaction;

pub use block::*;
pub use deployment::*;
pub use script::*;
pub use transaction::*;
