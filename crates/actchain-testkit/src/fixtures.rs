//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use actchain::{AcceptAll, Block, Ledger, LedgerConfig};
use actchain_identity::{Address, IdentityKeyPair, SignedMessage};

/// Difficulty used by fixtures. Low enough that mining is instant.
pub const FIXTURE_DIFFICULTY: u32 = 1;

/// A signing identity for tests.
pub struct TestIdentity {
    pub keypair: IdentityKeyPair,
}

impl TestIdentity {
    /// Create with a random key pair.
    pub fn new() -> Self {
        Self {
            keypair: IdentityKeyPair::generate().expect("OS randomness available"),
        }
    }

    /// Create from a 32-byte secret. The secret must be a valid scalar.
    pub fn with_secret(secret: [u8; 32]) -> Self {
        Self {
            keypair: IdentityKeyPair::from_secret_bytes(&secret).expect("valid secret scalar"),
        }
    }

    /// Create from a small integer (`seed + 1`, so seed 0 is the scalar 1).
    pub fn with_seed(seed: u8) -> Self {
        let mut secret = [0u8; 32];
        secret[30..].copy_from_slice(&(u16::from(seed) + 1).to_be_bytes());
        Self::with_secret(secret)
    }

    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key_hex()
    }

    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    /// Sign and return the `r:s` text.
    pub fn sign(&self, message: &[u8]) -> String {
        self.keypair.sign(message).expect("signing succeeds")
    }

    /// Sign and wrap into a ledger payload.
    pub fn signed_payload(&self, message: &[u8]) -> Vec<u8> {
        SignedMessage::sign(&self.keypair, message)
            .and_then(|m| m.to_payload())
            .expect("envelope encodes")
    }
}

impl Default for TestIdentity {
    fn default() -> Self {
        Self::new()
    }
}

/// Create distinct identities for multi-party tests.
pub fn multi_party_identities(count: usize) -> Vec<TestIdentity> {
    (0..count)
        .map(|i| {
            let mut secret = [0u8; 32];
            secret[24..].copy_from_slice(&(i as u64 + 1).to_be_bytes());
            TestIdentity::with_secret(secret)
        })
        .collect()
}

/// A ledger that accepts everything, at fixture difficulty.
pub struct TestLedger {
    pub ledger: Ledger<AcceptAll>,
}

impl TestLedger {
    pub fn new() -> Self {
        Self {
            ledger: Ledger::with_config(LedgerConfig::new(FIXTURE_DIFFICULTY), AcceptAll),
        }
    }

    /// Create with `count` mined blocks after genesis.
    pub fn with_blocks(count: usize) -> Self {
        let mut fixture = Self::new();
        for i in 0..count {
            fixture.append(format!("block-{i}").as_bytes());
        }
        fixture
    }

    /// Mine and append a block, panicking if it is not accepted.
    pub fn append(&mut self, payload: &[u8]) -> &Block {
        let outcome = self
            .ledger
            .submit(payload.to_vec())
            .expect("mining at fixture difficulty succeeds");
        assert!(outcome.is_accepted(), "fixture ledger rejected a payload");
        self.ledger.latest().expect("chain has genesis")
    }

    /// Rebuild a ledger from the current blocks after applying `edit`.
    pub fn tampered<F>(&self, edit: F) -> Ledger<AcceptAll>
    where
        F: FnOnce(&mut Vec<Block>),
    {
        let mut blocks = self.ledger.blocks().to_vec();
        edit(&mut blocks);
        Ledger::from_blocks(LedgerConfig::new(FIXTURE_DIFFICULTY), AcceptAll, blocks)
            .expect("edit left at least one block")
    }

    /// Replace the payload of block `index` without re-mining.
    pub fn with_payload_replaced(&self, index: usize, payload: &[u8]) -> Ledger<AcceptAll> {
        let payload = payload.to_vec();
        self.tampered(move |blocks| blocks[index].payload = payload.into())
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}
