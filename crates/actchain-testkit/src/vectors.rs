//! Golden test vectors for deterministic verification.
//!
//! Block vectors pin the hash preimage layout: decimal index, decimal
//! timestamp, raw payload, predecessor hex (or `"0"`), decimal nonce.
//! Identity vectors pin public key encoding and address derivation.

use serde::Serialize;

use actchain_core::{Block, BlockHash, GENESIS_PAYLOAD};
use actchain_identity::{verify_signature, Address, IdentityKeyPair};

const GENESIS_HASH: &str = "719b747735435c35f66908e12ac01ccaadee137032590c587990758c1646a764";

/// A golden block vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenBlockVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub index: u64,
    pub timestamp: i64,
    pub payload: &'static [u8],
    /// Predecessor hash (hex), or `None` for genesis.
    pub prev_hash: Option<&'static str>,
    pub nonce: u64,
    /// Expected block hash (hex).
    pub expected_hash: &'static str,
    /// Difficulty this nonce is the first solution for, counting up from 1.
    pub mined_at: Option<u32>,
}

/// A golden identity vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenIdentityVector {
    pub name: &'static str,
    /// Secret scalar, big-endian.
    pub secret: [u8; 32],
    /// Uncompressed SEC1 public key (hex).
    pub public_key: &'static str,
    /// RIPEMD160(SHA256(public key hex text)).
    pub address: &'static str,
    /// A message and an externally produced `r:s` signature over it.
    pub message: &'static [u8],
    pub signature: &'static str,
}

fn scalar(value: u8) -> [u8; 32] {
    let mut secret = [0u8; 32];
    secret[31] = value;
    secret
}

/// Get all golden block vectors.
pub fn block_vectors() -> Vec<GoldenBlockVector> {
    vec![
        GoldenBlockVector {
            name: "genesis",
            index: 0,
            timestamp: 1_700_000_000,
            payload: GENESIS_PAYLOAD,
            prev_hash: None,
            nonce: 0,
            expected_hash: GENESIS_HASH,
            mined_at: None,
        },
        GoldenBlockVector {
            name: "empty genesis at epoch",
            index: 0,
            timestamp: 0,
            payload: b"",
            prev_hash: None,
            nonce: 0,
            expected_hash: "9af15b336e6a9619928537df30b2e6a2376569fcf9d7e773eccede65606529a0",
            mined_at: None,
        },
        GoldenBlockVector {
            name: "abc after genesis, unmined",
            index: 1,
            timestamp: 1_700_000_000,
            payload: b"abc",
            prev_hash: Some(GENESIS_HASH),
            nonce: 0,
            expected_hash: "0ae89b28a57abd3b97030cdc9cb696cc4aadb9de600d61bb486faa4ac2a11eb8",
            mined_at: None,
        },
        GoldenBlockVector {
            name: "abc after genesis, difficulty 1",
            index: 1,
            timestamp: 1_700_000_000,
            payload: b"abc",
            prev_hash: Some(GENESIS_HASH),
            nonce: 8,
            expected_hash: "0322bb810cc4f7e26d81bc16019333ffdb8a04ef5ff79a3b073f3c2b3eab0c3f",
            mined_at: Some(1),
        },
        GoldenBlockVector {
            name: "abc after genesis, difficulty 2",
            index: 1,
            timestamp: 1_700_000_000,
            payload: b"abc",
            prev_hash: Some(GENESIS_HASH),
            nonce: 127,
            expected_hash: "00a2d57ee36099be8b91a9db6a3915def97d1b257f5280e261b659f16df72e0a",
            mined_at: Some(2),
        },
        GoldenBlockVector {
            name: "abc after genesis, difficulty 3",
            index: 1,
            timestamp: 1_700_000_000,
            payload: b"abc",
            prev_hash: Some(GENESIS_HASH),
            nonce: 1340,
            expected_hash: "00091d512e0da535a712ab784408550415c1af6581e0a911cb46efc016ddd0e2",
            mined_at: Some(3),
        },
        GoldenBlockVector {
            name: "genesis, difficulty 2",
            index: 0,
            timestamp: 1_700_000_000,
            payload: GENESIS_PAYLOAD,
            prev_hash: None,
            nonce: 95,
            expected_hash: "0021f3ae34b0b274009b456db6a7c9baeaf2bc07dd8775cba6a924d3217a6bfa",
            mined_at: Some(2),
        },
    ]
}

/// Get all golden identity vectors.
pub fn identity_vectors() -> Vec<GoldenIdentityVector> {
    vec![
        GoldenIdentityVector {
            name: "scalar one (generator point)",
            secret: scalar(1),
            public_key: "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                         483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
            address: "49886e8b35210373c26ceb0d003d2fc52cbe4785",
            message: b"",
            signature: "",
        },
        GoldenIdentityVector {
            name: "scalar two",
            secret: scalar(2),
            public_key: "04c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5\
                         1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a",
            address: "4236d7708c2ba9300c554f8b1f1aee0804ba0753",
            message: b"",
            signature: "",
        },
        GoldenIdentityVector {
            name: "repeated 0x42",
            secret: [0x42; 32],
            public_key: "0424653eac434488002cc06bbfb7f10fe18991e35f9fe4302dbea6d2353dc0ab1c\
                         119fc5009a032aa9fe47f5e149bb8442f71f884ccb516590686d8ff6ab91c613",
            address: "d61f9b6bf5729feeb6ac651300dbd21b52607608",
            message: b"Plant 100 trees in the city park",
            signature: "5a07b060c2897a7b680eca79ff165881b134d4038e82c6a4c4123913305e882c:\
                        77eaa0fa9c02e42f0043aa8205ea22d79cb955ca10bece6440262a0468457337",
        },
        GoldenIdentityVector {
            name: "repeated 0x42, empty message",
            secret: [0x42; 32],
            public_key: "0424653eac434488002cc06bbfb7f10fe18991e35f9fe4302dbea6d2353dc0ab1c\
                         119fc5009a032aa9fe47f5e149bb8442f71f884ccb516590686d8ff6ab91c613",
            address: "d61f9b6bf5729feeb6ac651300dbd21b52607608",
            message: b"",
            signature: "f02bee8440238096e93257b041eb6bddc77c686f1edc45b75ee338b5361c5442:\
                        6344eb0a047f4570b9f7f1bcbd28d72fdbf7fffcdbde84073aed1c8b1a6303b9",
        },
    ]
}

/// Build the block a vector describes, hashed from its fields.
pub fn block_from_vector(vector: &GoldenBlockVector) -> Block {
    let prev_hash = vector
        .prev_hash
        .map(|hex| BlockHash::from_hex(hex).expect("vector prev_hash is valid hex"));
    let mut block = Block::with_timestamp(vector.index, vector.timestamp, vector.payload, prev_hash);
    block.nonce = vector.nonce;
    block.hash = block.compute_hash();
    block
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches, detail)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let blocks = block_vectors().into_iter().map(|v| {
        let hex = block_from_vector(&v).hash.to_hex();
        (v.name.to_string(), hex == v.expected_hash, hex)
    });

    let identities = identity_vectors().into_iter().map(|v| {
        let Ok(keypair) = IdentityKeyPair::from_secret_bytes(&v.secret) else {
            return (v.name.to_string(), false, "secret rejected".to_string());
        };
        let public_key = keypair.public_key_hex();
        let address = Address::derive(&public_key).to_hex();
        let signature_ok =
            v.signature.is_empty() || verify_signature(v.message, v.signature, v.public_key);
        let matches = public_key == v.public_key && address == v.address && signature_ok;
        (v.name.to_string(), matches, address)
    });

    blocks.chain(identities).collect()
}

/// All vectors as pretty JSON, for sharing with other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Export {
        blocks: Vec<ExportBlock>,
        identities: Vec<GoldenIdentityVector>,
    }

    #[derive(Serialize)]
    struct ExportBlock {
        name: &'static str,
        index: u64,
        timestamp: i64,
        payload_hex: String,
        prev_hash: Option<&'static str>,
        nonce: u64,
        expected_hash: &'static str,
    }

    let blocks = block_vectors()
        .into_iter()
        .map(|v| ExportBlock {
            name: v.name,
            index: v.index,
            timestamp: v.timestamp,
            payload_hex: hex::encode(v.payload),
            prev_hash: v.prev_hash,
            nonce: v.nonce,
            expected_hash: v.expected_hash,
        })
        .collect();

    serde_json::to_string_pretty(&Export {
        blocks,
        identities: identity_vectors(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actchain_core::Difficulty;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, detail) in verify_all_vectors() {
            assert!(matches, "vector '{name}' mismatched: {detail}");
        }
    }

    #[test]
    fn test_mined_vectors_are_first_solutions() {
        for vector in block_vectors() {
            let Some(difficulty) = vector.mined_at else {
                continue;
            };

            let mut block = block_from_vector(&vector);
            block.nonce = 0;
            block.hash = block.compute_hash();
            let report = block.mine(Difficulty::new(difficulty)).unwrap();

            assert_eq!(report.nonce, vector.nonce, "vector '{}'", vector.name);
            assert_eq!(report.hash.to_hex(), vector.expected_hash);
            assert_eq!(report.attempts, vector.nonce);
        }
    }

    #[test]
    fn test_signature_vectors_reject_other_messages() {
        for vector in identity_vectors() {
            if vector.signature.is_empty() {
                continue;
            }
            assert!(!verify_signature(
                b"some other message",
                vector.signature,
                vector.public_key
            ));
        }
    }

    #[test]
    fn test_vectors_json_lists_every_vector() {
        let json = vectors_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["blocks"].as_array().unwrap().len(), block_vectors().len());
        assert_eq!(
            value["identities"].as_array().unwrap().len(),
            identity_vectors().len()
        );
        assert_eq!(value["blocks"][0]["prev_hash"], serde_json::Value::Null);
    }
}
