//! Signed message envelope.
//!
//! Bundles a message with the signer's public key and signature so the
//! whole thing can travel as an opaque ledger payload. Nothing in the ledger
//! checks it; readers call [`SignedMessage::verify`] themselves.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::Result;
use crate::keypair::IdentityKeyPair;
use crate::signature::verify_signature;

/// A message plus the claim of who signed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    /// The signed bytes, hex encoded on the wire.
    #[serde(with = "hex::serde")]
    pub message: Vec<u8>,

    /// Claimed signer, uncompressed SEC1 hex.
    pub public_key: String,

    /// `hex(r):hex(s)` over `message`.
    pub signature: String,
}

impl SignedMessage {
    /// Sign `message` with `keypair`.
    pub fn sign(keypair: &IdentityKeyPair, message: impl Into<Vec<u8>>) -> Result<Self> {
        let message = message.into();
        let signature = keypair.sign(&message)?;
        Ok(Self {
            message,
            public_key: keypair.public_key_hex(),
            signature,
        })
    }

    /// Check the signature against the claimed public key.
    pub fn verify(&self) -> bool {
        verify_signature(&self.message, &self.signature, &self.public_key)
    }

    /// Address of the claimed signer.
    ///
    /// Only meaningful once [`verify`](Self::verify) has passed.
    pub fn claimed_address(&self) -> Address {
        Address::derive(&self.public_key.to_ascii_lowercase())
    }

    /// Encode as JSON bytes suitable for a ledger payload.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from a ledger payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(payload)?)
    }
}
