//! Block: one hash-sealed entry in the chain.
//!
//! The block hash covers every field except the hash itself:
//!
//! ```text
//! sha256(index || timestamp || payload || prev_hash || nonce)
//! ```
//!
//! Integers are rendered as decimal text, `prev_hash` as lowercase hex (or
//! the literal `"0"` for genesis), and the fields are concatenated without
//! separators.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::hash::BlockHash;

/// Text hashed in place of a predecessor digest for the genesis block.
pub const GENESIS_PREV_HASH: &str = "0";

/// Default genesis payload.
pub const GENESIS_PAYLOAD: &[u8] = b"Genesis Block - Save World";

/// A chain entry.
///
/// Fields are public so an untrusted chain can be inspected and rebuilt;
/// anything that modifies a field without re-hashing will be caught by
/// chain validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (0 for genesis).
    pub index: u64,

    /// Creation time (Unix seconds). Captured once.
    pub timestamp: i64,

    /// Opaque caller-supplied bytes.
    pub payload: Bytes,

    /// Hash of the predecessor (None for genesis).
    pub prev_hash: Option<BlockHash>,

    /// Proof-of-work counter.
    pub nonce: u64,

    /// Digest over all of the above.
    pub hash: BlockHash,
}

impl Block {
    /// Create a block stamped with the current time.
    pub fn new(index: u64, payload: impl Into<Bytes>, prev_hash: Option<BlockHash>) -> Self {
        Self::with_timestamp(index, now_secs(), payload, prev_hash)
    }

    /// Create a block with an explicit timestamp.
    pub fn with_timestamp(
        index: u64,
        timestamp: i64,
        payload: impl Into<Bytes>,
        prev_hash: Option<BlockHash>,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            payload: payload.into(),
            prev_hash,
            nonce: 0,
            hash: BlockHash::ZERO,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Create a genesis block.
    pub fn genesis(payload: impl Into<Bytes>) -> Self {
        Self::new(0, payload, None)
    }

    /// Whether this block claims to be the first in a chain.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.prev_hash.is_none()
    }

    /// The predecessor reference as it appears in the hash preimage.
    pub fn prev_hash_text(&self) -> String {
        match &self.prev_hash {
            Some(hash) => hash.to_hex(),
            None => GENESIS_PREV_HASH.to_string(),
        }
    }

    /// The exact bytes the block hash is computed over.
    pub fn hash_preimage(&self) -> Vec<u8> {
        let prev = self.prev_hash_text();
        let mut buf = Vec::with_capacity(self.payload.len() + prev.len() + 48);
        buf.extend_from_slice(self.index.to_string().as_bytes());
        buf.extend_from_slice(self.timestamp.to_string().as_bytes());
        buf.extend_from_slice(&self.payload);
        buf.extend_from_slice(prev.as_bytes());
        buf.extend_from_slice(self.nonce.to_string().as_bytes());
        buf
    }

    /// Compute the hash from the current field values.
    pub fn compute_hash(&self) -> BlockHash {
        BlockHash::digest(&self.hash_preimage())
    }

    /// Check that the stored hash matches the fields.
    pub fn is_hash_consistent(&self) -> bool {
        self.hash == self.compute_hash()
    }
}

/// Current time in Unix seconds.
pub fn now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
