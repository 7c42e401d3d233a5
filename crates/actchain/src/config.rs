//! Ledger configuration.

use bytes::Bytes;

use actchain_core::{Difficulty, MiningControl, GENESIS_PAYLOAD};

/// Configuration for a [`Ledger`](crate::Ledger).
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Leading zero hex characters required of every mined block.
    pub difficulty: Difficulty,
    /// Payload of the genesis block.
    pub genesis_payload: Bytes,
    /// Limits applied to every submission.
    pub mining: MiningControl,
}

impl LedgerConfig {
    pub fn new(difficulty: impl Into<Difficulty>) -> Self {
        Self {
            difficulty: difficulty.into(),
            ..Self::default()
        }
    }

    pub fn genesis_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.genesis_payload = payload.into();
        self
    }

    pub fn mining(mut self, mining: MiningControl) -> Self {
        self.mining = mining;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            genesis_payload: Bytes::from_static(GENESIS_PAYLOAD),
            mining: MiningControl::unbounded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.difficulty, Difficulty::new(4));
        assert_eq!(&config.genesis_payload[..], b"Genesis Block - Save World");
        assert!(config.mining.max_attempts.is_none());
    }

    #[test]
    fn test_builder_setters() {
        let config = LedgerConfig::new(2)
            .genesis_payload("hello")
            .mining(MiningControl::unbounded().max_attempts(10));

        assert_eq!(config.difficulty.get(), 2);
        assert_eq!(&config.genesis_payload[..], b"hello");
        assert_eq!(config.mining.max_attempts, Some(10));
    }
}
