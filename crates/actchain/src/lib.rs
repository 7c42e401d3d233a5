//! # actchain
//!
//! A minimal append-only ledger. Each block is sealed by a SHA-256 hash that
//! links it to its predecessor and is admitted only after:
//!
//! - **Proof of work**: the hash has `difficulty` leading zero hex digits
//! - **Proof of action**: an [`AdmissionPolicy`] approves the payload
//!
//! Identities ([`IdentityKeyPair`]) are offered alongside so callers can sign
//! payloads before submitting them and check signatures on payloads they
//! read back. The ledger itself treats payloads as opaque bytes.
//!
//! ## Usage
//!
//! ```rust
//! use actchain::{IdentityKeyPair, Ledger};
//!
//! let mut ledger = Ledger::new(1);
//!
//! let outcome = ledger.submit("abc").unwrap();
//! assert!(outcome.is_accepted());
//!
//! // 15 % 10 = 5, which the default policy turns down.
//! let outcome = ledger.submit("fifteen chars!!").unwrap();
//! assert!(outcome.is_rejected());
//!
//! assert_eq!(ledger.len(), 2);
//! assert!(ledger.validate().is_ok());
//!
//! let keypair = IdentityKeyPair::generate().unwrap();
//! let signature = keypair.sign(b"abc").unwrap();
//! assert!(IdentityKeyPair::verify(b"abc", &signature, &keypair.public_key_hex()));
//! ```
//!
//! ## Re-exports
//!
//! - `actchain::core` - Blocks, hashing, proof of work, admission policies
//! - `actchain::identity` - Key pairs, addresses, signatures

pub mod config;
pub mod error;
pub mod ledger;
pub mod service;

// Re-export component crates
pub use actchain_core as core;
pub use actchain_identity as identity;

// Re-export main types for convenience
pub use config::LedgerConfig;
pub use error::{IntegrityError, LedgerError, Result};
pub use ledger::{Ledger, SubmitOutcome};
pub use service::LedgerService;

// Re-export commonly used component types
pub use actchain_core::{
    AcceptAll, AdmissionPolicy, Block, BlockHash, CancelToken, Difficulty, FnPolicy,
    LengthModulo, MiningControl, MiningError, MiningReport, RejectAll,
};
pub use actchain_identity::{Address, IdentityKeyPair, SignedMessage};
