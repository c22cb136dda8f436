//! Wire identity of a network

use serde::Serialize;
use std::fmt;

/// Four bytes prefixed to every P2P message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MessageStart(#[serde(with = "hex::serde")] pub [u8; 4]);

impl fmt::Display for MessageStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Per-network transport constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkMagic {
    pub message_start: MessageStart,
    pub default_port: u16,
    /// Blocks below this height are never pruned
    pub prune_after_height: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_start_display() {
        let magic = MessageStart([0xaf, 0x32, 0x16, 0x16]);
        assert_eq!(magic.to_string(), "af321616");
    }
}
