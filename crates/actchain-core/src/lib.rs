//! # actchain core
//!
//! Pure primitives for actchain: block digests, proof of work, and
//! admission policies.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Key Types
//!
//! - [`Block`] - One hash-sealed chain entry
//! - [`BlockHash`] - SHA-256 digest rendered as lowercase hex
//! - [`Difficulty`] - Leading-zero target for proof of work
//! - [`AdmissionPolicy`] - Predicate deciding which payloads are admitted

pub mod admission;
pub mod block;
pub mod error;
pub mod hash;
pub mod pow;

pub use admission::{AcceptAll, AdmissionPolicy, FnPolicy, LengthModulo, RejectAll};
pub use block::{now_secs, Block, GENESIS_PAYLOAD, GENESIS_PREV_HASH};
pub use error::{CoreError, MiningError};
pub use hash::BlockHash;
pub use pow::{CancelToken, Difficulty, MiningControl, MiningReport};
