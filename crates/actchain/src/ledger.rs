//! The ledger: an in-memory, append-only chain of mined blocks.
//!
//! Every submission is mined against the ledger's difficulty and then put
//! to the admission policy. Only approved blocks are appended; rejected ones
//! are discarded along with the work spent on them.

use bytes::Bytes;

use actchain_core::{
    AdmissionPolicy, Block, BlockHash, Difficulty, LengthModulo, MiningControl, MiningReport,
};

use crate::config::LedgerConfig;
use crate::error::{IntegrityError, LedgerError, Result};

/// Result of a submission that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The block was mined, approved, and appended.
    Accepted {
        index: u64,
        hash: BlockHash,
        report: MiningReport,
    },

    /// The block was mined but the admission policy turned it down.
    Rejected {
        index: u64,
        hash: BlockHash,
        policy: String,
    },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmitOutcome::Rejected { .. })
    }

    /// Index the candidate was built for.
    pub fn index(&self) -> u64 {
        match self {
            SubmitOutcome::Accepted { index, .. } | SubmitOutcome::Rejected { index, .. } => {
                *index
            }
        }
    }

    /// Hash of the mined candidate.
    pub fn hash(&self) -> BlockHash {
        match self {
            SubmitOutcome::Accepted { hash, .. } | SubmitOutcome::Rejected { hash, .. } => *hash,
        }
    }
}

/// An append-only chain of blocks.
///
/// Single writer: [`submit`](Self::submit) takes `&mut self`. Wrap in
/// [`LedgerService`](crate::LedgerService) to share across tasks.
#[derive(Debug)]
pub struct Ledger<P = LengthModulo> {
    chain: Vec<Block>,
    config: LedgerConfig,
    policy: P,
}

impl Ledger<LengthModulo> {
    /// Create a ledger with the default admission rule (`len % 10 < 5`).
    pub fn new(difficulty: impl Into<Difficulty>) -> Self {
        Self::with_config(LedgerConfig::new(difficulty), LengthModulo::default())
    }
}

impl<P: AdmissionPolicy> Ledger<P> {
    /// Create a ledger containing only the genesis block.
    pub fn with_config(config: LedgerConfig, policy: P) -> Self {
        let genesis = Block::genesis(config.genesis_payload.clone());
        tracing::debug!(hash = %genesis.hash, difficulty = %config.difficulty, "created ledger");
        Self {
            chain: vec![genesis],
            config,
            policy,
        }
    }

    /// Adopt an existing chain without checking it.
    ///
    /// Run [`validate`](Self::validate) before trusting the result.
    pub fn from_blocks(config: LedgerConfig, policy: P, blocks: Vec<Block>) -> Result<Self> {
        if blocks.is_empty() {
            return Err(LedgerError::EmptyChain);
        }
        Ok(Self {
            chain: blocks,
            config,
            policy,
        })
    }

    /// The most recent block.
    pub fn latest(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Mine and, if approved, append a block carrying `payload`.
    ///
    /// Uses the mining limits from the ledger config. Blocks until the
    /// search finishes.
    pub fn submit(&mut self, payload: impl Into<Bytes>) -> Result<SubmitOutcome> {
        let control = self.config.mining.clone();
        self.submit_with(payload, &control)
    }

    /// Like [`submit`](Self::submit) with per-call mining limits.
    pub fn submit_with(
        &mut self,
        payload: impl Into<Bytes>,
        control: &MiningControl,
    ) -> Result<SubmitOutcome> {
        let prev_hash = self.latest()?.hash;
        let index = self.chain.len() as u64;

        let mut candidate = Block::new(index, payload, Some(prev_hash));
        let report = candidate.mine_with(self.config.difficulty, control)?;

        if !self.policy.approve(&candidate.payload) {
            tracing::warn!(
                index,
                policy = self.policy.name(),
                "block rejected by admission policy"
            );
            return Ok(SubmitOutcome::Rejected {
                index,
                hash: candidate.hash,
                policy: self.policy.name().to_string(),
            });
        }

        let hash = candidate.hash;
        self.chain.push(candidate);
        tracing::info!(index, %hash, "block appended");

        Ok(SubmitOutcome::Accepted {
            index,
            hash,
            report,
        })
    }

    /// Check every block's hash, position, link, and proof of work.
    ///
    /// Returns the first violation in chain order. Nothing is repaired.
    pub fn validate(&self) -> std::result::Result<(), IntegrityError> {
        let difficulty = self.config.difficulty;
        let mut expected_prev: Option<BlockHash> = None;

        for (position, block) in self.chain.iter().enumerate() {
            let violation = check_block(position, block, expected_prev, difficulty);
            if let Some(err) = violation {
                tracing::warn!(index = err.index(), error = %err, "chain integrity violation");
                return Err(err);
            }
            expected_prev = Some(block.hash);
        }

        Ok(())
    }

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.chain.get(index)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false for a ledger built through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.chain
    }
}

fn check_block(
    position: usize,
    block: &Block,
    expected_prev: Option<BlockHash>,
    difficulty: Difficulty,
) -> Option<IntegrityError> {
    let computed = block.compute_hash();
    if computed != block.hash {
        return Some(IntegrityError::HashMismatch {
            index: position,
            stored: block.hash,
            computed,
        });
    }

    if block.index != position as u64 {
        return Some(IntegrityError::IndexMismatch {
            index: position,
            found: block.index,
        });
    }

    if block.prev_hash != expected_prev {
        return Some(IntegrityError::LinkMismatch {
            index: position,
            expected: expected_prev,
            found: block.prev_hash,
        });
    }

    // Genesis is not mined.
    if position > 0 && !difficulty.is_met_by(&block.hash) {
        return Some(IntegrityError::InsufficientWork {
            index: position,
            hash: block.hash,
            difficulty,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use actchain_core::{AcceptAll, CancelToken, MiningError, RejectAll, GENESIS_PAYLOAD};

    fn accept_all(difficulty: u32) -> Ledger<AcceptAll> {
        Ledger::with_config(LedgerConfig::new(difficulty), AcceptAll)
    }

    #[test]
    fn test_new_ledger_has_only_genesis() {
        let ledger = Ledger::new(1);
        assert_eq!(ledger.len(), 1);

        let genesis = ledger.latest().unwrap();
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.prev_hash, None);
        assert_eq!(genesis.prev_hash_text(), "0");
        assert_eq!(&genesis.payload[..], GENESIS_PAYLOAD);
        assert_eq!(genesis.nonce, 0);
        assert!(ledger.validate().is_ok());
    }

    #[test]
    fn test_accepted_submit_links_to_tip() {
        let mut ledger = Ledger::new(1);
        let prior_tip = ledger.latest().unwrap().hash;

        let outcome = ledger.submit("abc").unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(outcome.index(), 1);
        assert_eq!(ledger.len(), 2);

        let tail = ledger.latest().unwrap();
        assert_eq!(tail.prev_hash, Some(prior_tip));
        assert_eq!(tail.hash, outcome.hash());
        assert!(tail.hash.to_hex().starts_with('0'));
        assert!(tail.is_hash_consistent());
    }

    #[test]
    fn test_rejected_submit_leaves_chain_unchanged() {
        let mut ledger = Ledger::new(1);
        let outcome = ledger.submit("abcde").unwrap();

        match outcome {
            SubmitOutcome::Rejected { index, policy, .. } => {
                assert_eq!(index, 1);
                assert_eq!(policy, "length-modulo");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_approved_then_rejected_scenario() {
        let mut ledger = Ledger::new(1);

        assert!(ledger.submit("abc").unwrap().is_accepted());
        let fifteen = "fifteen chars!!";
        assert_eq!(fifteen.len(), 15);
        assert!(ledger.submit(fifteen).unwrap().is_rejected());

        assert_eq!(ledger.len(), 2);
        assert!(ledger.validate().is_ok());
    }

    #[test]
    fn test_reject_all_policy() {
        let mut ledger = Ledger::with_config(LedgerConfig::new(1), RejectAll);
        for _ in 0..3 {
            assert!(ledger.submit("x").unwrap().is_rejected());
        }
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_mined_blocks_meet_difficulty() {
        for d in 1..=3 {
            let mut ledger = accept_all(d);
            ledger.submit("one").unwrap();
            ledger.submit("two").unwrap();
            for block in &ledger.blocks()[1..] {
                assert!(block.hash.to_hex().starts_with(&"0".repeat(d as usize)));
            }
            assert!(ledger.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_detects_payload_tamper() {
        let mut ledger = accept_all(1);
        for p in ["a", "b", "c"] {
            ledger.submit(p).unwrap();
        }

        let mut blocks = ledger.into_blocks();
        let mut payload = blocks[1].payload.to_vec();
        payload[0] ^= 0x01;
        blocks[1].payload = payload.into();

        let tampered =
            Ledger::from_blocks(LedgerConfig::new(1), AcceptAll, blocks).unwrap();
        let err = tampered.validate().unwrap_err();
        assert_eq!(err.index(), 1);
        assert!(matches!(err, IntegrityError::HashMismatch { .. }));
    }

    #[test]
    fn test_validate_detects_rehashed_tamper_as_link_break() {
        let mut ledger = accept_all(1);
        for p in ["a", "b", "c"] {
            ledger.submit(p).unwrap();
        }

        // Re-mine block 1 with new contents; block 2 still points at the old hash.
        let mut blocks = ledger.into_blocks();
        blocks[1].payload = Bytes::from_static(b"forged");
        blocks[1].mine(Difficulty::new(1)).unwrap();

        let tampered =
            Ledger::from_blocks(LedgerConfig::new(1), AcceptAll, blocks).unwrap();
        let err = tampered.validate().unwrap_err();
        assert_eq!(err.index(), 2);
        assert!(err.is_linkage());
    }

    #[test]
    fn test_validate_detects_genesis_tamper() {
        let ledger = accept_all(1);
        let mut blocks = ledger.into_blocks();
        blocks[0].timestamp += 1;

        let tampered =
            Ledger::from_blocks(LedgerConfig::new(1), AcceptAll, blocks).unwrap();
        assert_eq!(tampered.validate().unwrap_err().index(), 0);
    }

    #[test]
    fn test_validate_detects_insufficient_work() {
        let mut blocks = accept_all(1).into_blocks();
        let genesis_hash = blocks[0].hash;

        // Find an unmined candidate whose hash does not start with '0'.
        let mut candidate = Block::with_timestamp(1, 0, "lazy", Some(genesis_hash));
        while candidate.hash.to_hex().starts_with('0') {
            candidate.nonce += 1;
            candidate.hash = candidate.compute_hash();
        }
        blocks.push(candidate);

        let ledger = Ledger::from_blocks(LedgerConfig::new(1), AcceptAll, blocks).unwrap();
        assert!(matches!(
            ledger.validate(),
            Err(IntegrityError::InsufficientWork { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_detects_index_mismatch() {
        let mut ledger = accept_all(1);
        ledger.submit("a").unwrap();

        let mut blocks = ledger.into_blocks();
        blocks[1].index = 5;
        blocks[1].mine(Difficulty::new(1)).unwrap();

        let ledger = Ledger::from_blocks(LedgerConfig::new(1), AcceptAll, blocks).unwrap();
        assert_eq!(
            ledger.validate(),
            Err(IntegrityError::IndexMismatch { index: 1, found: 5 })
        );
    }

    #[test]
    fn test_from_empty_blocks_is_error() {
        assert!(matches!(
            Ledger::from_blocks(LedgerConfig::default(), AcceptAll, vec![]),
            Err(LedgerError::EmptyChain)
        ));
    }

    #[test]
    fn test_cancelled_submit_is_error_and_chain_unchanged() {
        let mut ledger = accept_all(1);
        let token = CancelToken::new();
        token.cancel();
        let control = MiningControl::unbounded().cancel_token(token);

        let err = ledger.submit_with("a", &control).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Mining(MiningError::Cancelled { .. })
        ));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_config_attempt_limit_applies_to_submit() {
        let config = LedgerConfig::new(64).mining(MiningControl::unbounded().max_attempts(10));
        let mut ledger = Ledger::with_config(config, AcceptAll);
        assert!(matches!(
            ledger.submit("a"),
            Err(LedgerError::Mining(MiningError::AttemptLimitReached { attempts: 10 }))
        ));
    }

    #[test]
    fn test_custom_genesis_payload() {
        let config = LedgerConfig::new(1).genesis_payload("hello world");
        let ledger = Ledger::with_config(config, AcceptAll);
        assert_eq!(&ledger.blocks()[0].payload[..], b"hello world");
    }
}
