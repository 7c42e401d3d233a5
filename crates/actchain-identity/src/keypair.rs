//! secp256k1 identity key pairs.
//!
//! The secret scalar lives inside a [`SigningKey`], which zeroizes itself on
//! drop. Scratch buffers used during generation are wrapped in
//! [`Zeroizing`] so they are wiped on every exit path.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::Zeroizing;

use crate::address::Address;
use crate::error::{IdentityError, Result};
use crate::signature::{verify_signature, EcdsaSignatureText};

/// A secp256k1 key pair used to attribute and authenticate payloads.
///
/// Not `Clone`: each instance exclusively owns its secret.
pub struct IdentityKeyPair {
    signing_key: SigningKey,
}

impl IdentityKeyPair {
    /// Generate a fresh key pair from the operating system RNG.
    pub fn generate() -> Result<Self> {
        let mut secret = Zeroizing::new([0u8; 32]);
        OsRng
            .try_fill_bytes(&mut secret[..])
            .map_err(|e| IdentityError::KeyGeneration(e.to_string()))?;

        let signing_key = SigningKey::from_slice(&secret[..])
            .map_err(|e| IdentityError::KeyGeneration(e.to_string()))?;

        let keypair = Self { signing_key };
        tracing::debug!(address = %keypair.address(), "generated identity");
        Ok(keypair)
    }

    /// Create from a 32-byte big-endian secret scalar.
    ///
    /// Fails if the scalar is zero or not below the curve order.
    pub fn from_secret_bytes(secret: &[u8; 32]) -> Result<Self> {
        let signing_key = SigningKey::from_slice(secret)
            .map_err(|e| IdentityError::KeyGeneration(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// The public half.
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Uncompressed SEC1 point (`04 || X || Y`).
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.verifying_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec()
    }

    /// Uncompressed SEC1 point as lowercase hex (130 characters).
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// `ripemd160(sha256(public_key_hex))`.
    pub fn address(&self) -> Address {
        Address::derive(&self.public_key_hex())
    }

    /// Sign the SHA-256 digest of `message`, returning `hex(r):hex(s)`.
    pub fn sign(&self, message: &[u8]) -> Result<String> {
        Ok(self.sign_text(message)?.to_string())
    }

    /// Sign and return the typed signature.
    pub fn sign_text(&self, message: &[u8]) -> Result<EcdsaSignatureText> {
        let digest = Sha256::digest(message);
        let signature: Signature = self
            .signing_key
            .sign_prehash(&digest)
            .map_err(|e| IdentityError::Signing(e.to_string()))?;
        Ok(EcdsaSignatureText::from_signature(signature))
    }

    /// Stateless verification. See [`verify_signature`].
    pub fn verify(message: &[u8], signature_text: &str, public_key_hex: &str) -> bool {
        verify_signature(message, signature_text, public_key_hex)
    }
}

impl fmt::Debug for IdentityKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKeyPair({})", self.address())
    }
}
