//! Proof of work: nonce search against a leading-zero target.
//!
//! A block is mined by incrementing its nonce and re-hashing until the hex
//! digest starts with `difficulty` zero characters. The search always makes
//! at least one increment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::block::Block;
use crate::error::MiningError;
use crate::hash::BlockHash;

/// How often (in attempts) the cancel flag is polled.
pub const CANCEL_POLL_INTERVAL: u64 = 1024;

/// How often (in attempts) progress is traced.
pub const PROGRESS_INTERVAL: u64 = 1 << 20;

/// Number of leading zero hex characters a block hash must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(u32);

impl Difficulty {
    /// Hex characters in a SHA-256 digest; anything above cannot be met.
    pub const MAX_REACHABLE: u32 = 64;

    pub const fn new(leading_zeros: u32) -> Self {
        Self(leading_zeros)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether any digest could satisfy this difficulty.
    pub const fn is_reachable(self) -> bool {
        self.0 <= Self::MAX_REACHABLE
    }

    /// The target prefix, e.g. `"0000"` for difficulty 4.
    pub fn target(self) -> String {
        "0".repeat(self.0 as usize)
    }

    /// Check a digest against the target.
    pub fn is_met_by(self, hash: &BlockHash) -> bool {
        hash.leading_zero_nibbles() >= self.0
    }

    /// Check hex text against the target.
    ///
    /// Compares the literal leading substring of length `difficulty`,
    /// ignoring case. Text shorter than the target never matches.
    pub fn meets_hex(self, hex: &str) -> bool {
        let n = self.0 as usize;
        match hex.get(..n) {
            Some(prefix) => prefix.eq_ignore_ascii_case(&self.target()),
            None => false,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(4)
    }
}

impl From<u32> for Difficulty {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared flag for stopping an in-progress search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clear the flag so the token can be reused.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Bounds on a single search.
#[derive(Debug, Clone, Default)]
pub struct MiningControl {
    /// Give up after this many hash attempts.
    pub max_attempts: Option<u64>,
    /// Polled every [`CANCEL_POLL_INTERVAL`] attempts.
    pub cancel: CancelToken,
}

impl MiningControl {
    /// No attempt limit and a fresh cancel token.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningReport {
    pub nonce: u64,
    pub hash: BlockHash,
    pub attempts: u64,
    pub elapsed: Duration,
}

impl Block {
    /// Mine until the hash meets `difficulty`, with no bound on effort.
    pub fn mine(&mut self, difficulty: Difficulty) -> Result<MiningReport, MiningError> {
        self.mine_with(difficulty, &MiningControl::unbounded())
    }

    /// Mine under the limits in `control`.
    ///
    /// On any error the block is left with a hash consistent with its
    /// current nonce.
    pub fn mine_with(
        &mut self,
        difficulty: Difficulty,
        control: &MiningControl,
    ) -> Result<MiningReport, MiningError> {
        if !difficulty.is_reachable() {
            return Err(MiningError::UnreachableTarget {
                difficulty: difficulty.get(),
            });
        }

        tracing::debug!(index = self.index, %difficulty, "mining block");

        let started = Instant::now();
        let mut attempts: u64 = 0;

        loop {
            if control.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(MiningError::AttemptLimitReached { attempts });
            }
            if attempts % CANCEL_POLL_INTERVAL == 0 && control.cancel.is_cancelled() {
                return Err(MiningError::Cancelled { attempts });
            }

            self.nonce = self
                .nonce
                .checked_add(1)
                .ok_or(MiningError::NonceExhausted { attempts })?;
            self.hash = self.compute_hash();
            attempts += 1;

            if difficulty.is_met_by(&self.hash) {
                let elapsed = started.elapsed();
                tracing::info!(
                    index = self.index,
                    nonce = self.nonce,
                    attempts,
                    hash = %self.hash,
                    "block mined"
                );
                return Ok(MiningReport {
                    nonce: self.nonce,
                    hash: self.hash,
                    attempts,
                    elapsed,
                });
            }

            if attempts % PROGRESS_INTERVAL == 0 {
                tracing::trace!(index = self.index, attempts, "still mining");
            }
        }
    }
}
