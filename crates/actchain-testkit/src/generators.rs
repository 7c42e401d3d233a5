//! Proptest generators for property-based testing.

use proptest::prelude::*;

use actchain_core::{Block, BlockHash};
use actchain_identity::IdentityKeyPair;

/// Generate a valid secret scalar.
///
/// Zero and values at or above the curve order are vanishingly unlikely and
/// are filtered out.
pub fn secret() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>().prop_filter("secret outside the scalar field", |secret| {
        IdentityKeyPair::from_secret_bytes(secret).is_ok()
    })
}

/// Generate a random key pair.
pub fn keypair() -> impl Strategy<Value = IdentityKeyPair> {
    secret().prop_map(|secret| {
        IdentityKeyPair::from_secret_bytes(&secret).expect("filtered to valid scalars")
    })
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a reasonable timestamp (Unix seconds).
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Payloads the default admission rule approves (`len % 10 < 5`).
pub fn approved_payload() -> impl Strategy<Value = Vec<u8>> {
    (0usize..20, 0usize..5)
        .prop_flat_map(|(tens, units)| prop::collection::vec(any::<u8>(), tens * 10 + units))
}

/// Payloads the default admission rule turns down (`len % 10 >= 5`).
pub fn rejected_payload() -> impl Strategy<Value = Vec<u8>> {
    (0usize..20, 5usize..10)
        .prop_flat_map(|(tens, units)| prop::collection::vec(any::<u8>(), tens * 10 + units))
}

/// Signature text that is unlikely to be well formed.
pub fn garbage_signature() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9a-fA-F]{0,70}",
        "[0-9a-f]{1,64}:[0-9a-f]{1,64}:[0-9a-f]{0,8}",
        ":[0-9a-f]{0,64}",
        "[0-9a-f]{0,64}:",
        "[g-z0-9]{1,64}:[0-9a-f]{1,64}",
        ".{0,140}",
    ]
}

/// Parameters for generating a block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub index: u64,
    pub timestamp: i64,
    pub payload: Vec<u8>,
    pub prev_hash: Option<BlockHash>,
    pub nonce: u64,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            0u64..=1_000_000,
            timestamp(),
            payload(256),
            prop::option::of(block_hash()),
            any::<u64>(),
        )
            .prop_map(|(index, timestamp, payload, prev_hash, nonce)| BlockParams {
                index,
                timestamp,
                payload,
                prev_hash,
                nonce,
            })
            .boxed()
    }
}

/// Build an unmined block from parameters, with a consistent hash.
pub fn block_from_params(params: &BlockParams) -> Block {
    let mut block = Block::with_timestamp(
        params.index,
        params.timestamp,
        params.payload.clone(),
        params.prev_hash,
    );
    block.nonce = params.nonce;
    block.hash = block.compute_hash();
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use actchain_core::{AdmissionPolicy, LengthModulo};
    use actchain_identity::{verify_signature, EcdsaSignatureText};

    proptest! {
        #[test]
        fn test_block_hash_deterministic(params: BlockParams) {
            let b1 = block_from_params(&params);
            let b2 = block_from_params(&params);

            prop_assert_eq!(b1.hash, b2.hash);
            prop_assert!(b1.is_hash_consistent());
        }

        #[test]
        fn test_block_hash_changes_with_nonce(params: BlockParams) {
            prop_assume!(params.nonce < u64::MAX);

            let b1 = block_from_params(&params);
            let mut next = params.clone();
            next.nonce += 1;
            let b2 = block_from_params(&next);

            prop_assert_ne!(b1.hash, b2.hash);
        }

        #[test]
        fn test_block_hash_changes_with_payload(
            params: BlockParams,
            other in payload(256),
        ) {
            prop_assume!(params.payload != other);

            let mut changed = params.clone();
            changed.payload = other;

            prop_assert_ne!(block_from_params(&params).hash, block_from_params(&changed).hash);
        }

        #[test]
        fn test_admission_generators_match_default_rule(
            approved in approved_payload(),
            rejected in rejected_payload(),
        ) {
            let policy = LengthModulo::default();
            prop_assert!(policy.approve(&approved));
            prop_assert!(!policy.approve(&rejected));
        }

        #[test]
        fn test_garbage_never_panics(text in garbage_signature(), message in payload(32)) {
            let _ = EcdsaSignatureText::parse(&text);
            let _ = verify_signature(&message, &text, "04");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn test_generated_keypairs_sign(kp in keypair(), message in payload(64)) {
            let signature = kp.sign(&message).unwrap();
            prop_assert!(verify_signature(&message, &signature, &kp.public_key_hex()));
        }
    }
}
