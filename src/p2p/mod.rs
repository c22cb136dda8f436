//! P2P constants - message start bytes, ports and bootstrap seeds

mod magic;
mod seeds;

pub use magic::*;
pub use seeds::*;
