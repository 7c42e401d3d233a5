//! Error types for actchain core.

use thiserror::Error;

/// Core errors that can occur when building primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid admission policy: {0}")]
    InvalidPolicy(String),
}

/// Reasons a proof-of-work search stops without finding a solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MiningError {
    #[error("nonce space exhausted after {attempts} attempts")]
    NonceExhausted { attempts: u64 },

    #[error("difficulty {difficulty} cannot be met by a 64 character digest")]
    UnreachableTarget { difficulty: u32 },

    #[error("gave up after {attempts} attempts")]
    AttemptLimitReached { attempts: u64 },

    #[error("mining cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
