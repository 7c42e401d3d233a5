//! Error types for the ledger.

use actchain_core::{BlockHash, CoreError, Difficulty, MiningError};
use thiserror::Error;

/// Errors that can occur during ledger operations.
///
/// An admission-policy rejection is not an error; see
/// [`SubmitOutcome::Rejected`](crate::SubmitOutcome::Rejected).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The chain has no blocks, not even genesis.
    #[error("chain is empty")]
    EmptyChain,

    /// Mining stopped before finding a solution.
    #[error("mining failed: {0}")]
    Mining(#[from] MiningError),

    /// Core primitive error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A background submission could not complete.
    #[error("ledger worker failed: {0}")]
    WorkerFailed(String),
}

/// The first integrity violation found by [`Ledger::validate`](crate::Ledger::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// Stored hash does not match the block's fields.
    #[error("block {index}: stored hash {stored} does not match computed {computed}")]
    HashMismatch {
        index: usize,
        stored: BlockHash,
        computed: BlockHash,
    },

    /// Block's index field disagrees with its position.
    #[error("block {index}: index field is {found}")]
    IndexMismatch { index: usize, found: u64 },

    /// Block does not reference its predecessor (or genesis references one).
    #[error("block {index}: expected prev_hash {expected:?}, got {found:?}")]
    LinkMismatch {
        index: usize,
        expected: Option<BlockHash>,
        found: Option<BlockHash>,
    },

    /// Block hash does not satisfy the ledger difficulty.
    #[error("block {index}: hash {hash} does not meet difficulty {difficulty}")]
    InsufficientWork {
        index: usize,
        hash: BlockHash,
        difficulty: Difficulty,
    },
}

impl IntegrityError {
    /// Position of the offending block.
    pub fn index(&self) -> usize {
        match self {
            IntegrityError::HashMismatch { index, .. }
            | IntegrityError::IndexMismatch { index, .. }
            | IntegrityError::LinkMismatch { index, .. }
            | IntegrityError::InsufficientWork { index, .. } => *index,
        }
    }

    /// Whether the violation is a broken link rather than a bad block.
    pub fn is_linkage(&self) -> bool {
        matches!(self, IntegrityError::LinkMismatch { .. })
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
