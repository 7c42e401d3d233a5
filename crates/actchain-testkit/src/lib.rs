//! # actchain testkit
//!
//! Testing utilities for actchain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed blocks and identities with known digests, for
//!   checking the hash preimage and address derivation against other
//!   implementations
//! - **Generators**: Proptest strategies for payloads, blocks and key pairs
//! - **Fixtures**: Helpers for setting up ledgers and identities quickly
//!
//! ## Golden Vectors
//!
//! ```rust
//! use actchain_testkit::vectors::{block_vectors, block_from_vector};
//!
//! for vector in block_vectors() {
//!     let block = block_from_vector(&vector);
//!     assert_eq!(block.hash.to_hex(), vector.expected_hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use actchain_testkit::generators::{block_from_params, BlockParams};
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: BlockParams) {
//!         prop_assert_eq!(block_from_params(&params).hash, block_from_params(&params).hash);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use actchain_testkit::fixtures::TestLedger;
//!
//! let fixture = TestLedger::with_blocks(3);
//! assert_eq!(fixture.ledger.len(), 4);
//! assert!(fixture.ledger.validate().is_ok());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_identities, TestIdentity, TestLedger};
pub use generators::{block_from_params, BlockParams};
pub use vectors::{
    block_from_vector, block_vectors, identity_vectors, vectors_json, verify_all_vectors,
    GoldenBlockVector, GoldenIdentityVector,
};
