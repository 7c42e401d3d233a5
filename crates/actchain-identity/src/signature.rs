//! Signature text encoding and stateless verification.
//!
//! Signatures travel as `<hex(r)>:<hex(s)>`. Each half is produced as 64
//! lowercase hex characters; on input any case, length up to 32 bytes once
//! leading zeros are dropped, and odd digit counts are accepted.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, VerifyingKey};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::SignatureParseError;

/// Delimiter between the r and s halves.
pub const SIGNATURE_DELIMITER: char = ':';

/// An ECDSA (r, s) pair in its text form.
#[derive(Clone, PartialEq, Eq)]
pub struct EcdsaSignatureText {
    signature: Signature,
}

impl EcdsaSignatureText {
    /// Parse `r:s` text.
    pub fn parse(text: &str) -> Result<Self, SignatureParseError> {
        let (r, s) = text
            .split_once(SIGNATURE_DELIMITER)
            .ok_or(SignatureParseError::MissingDelimiter)?;

        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&parse_scalar(r)?);
        bytes[32..].copy_from_slice(&parse_scalar(s)?);

        let signature =
            Signature::from_slice(&bytes).map_err(|_| SignatureParseError::OutOfRange)?;
        Ok(Self { signature })
    }

    pub(crate) fn from_signature(signature: Signature) -> Self {
        Self { signature }
    }

    /// The underlying signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Big-endian r bytes.
    pub fn r_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signature.to_bytes()[..32]);
        out
    }

    /// Big-endian s bytes.
    pub fn s_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signature.to_bytes()[32..]);
        out
    }

    /// Verify against a SHA-256 prehash of the message.
    ///
    /// High-S signatures are accepted by normalizing them first.
    pub fn verify(&self, message: &[u8], key: &VerifyingKey) -> bool {
        let digest = Sha256::digest(message);
        let normalized = self
            .signature
            .normalize_s()
            .unwrap_or_else(|| self.signature.clone());
        key.verify_prehash(&digest, &normalized).is_ok()
    }
}

impl fmt::Display for EcdsaSignatureText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            hex::encode(self.r_bytes()),
            SIGNATURE_DELIMITER,
            hex::encode(self.s_bytes())
        )
    }
}

impl fmt::Debug for EcdsaSignatureText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_string();
        write!(f, "EcdsaSignatureText({}...)", &text[..16])
    }
}

impl FromStr for EcdsaSignatureText {
    type Err = SignatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse one half of the signature into a 32-byte big-endian scalar.
fn parse_scalar(text: &str) -> Result<[u8; 32], SignatureParseError> {
    if text.is_empty() {
        return Err(SignatureParseError::EmptyComponent);
    }
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SignatureParseError::InvalidHex);
    }

    let significant = text.trim_start_matches('0');
    if significant.len() > 64 {
        return Err(SignatureParseError::ComponentTooLong);
    }

    let padded = format!("{significant:0>64}");
    let mut out = [0u8; 32];
    hex::decode_to_slice(&padded, &mut out).map_err(|_| SignatureParseError::InvalidHex)?;
    Ok(out)
}

/// Parse a SEC1 public key (compressed or uncompressed) from hex.
pub fn parse_public_key(public_key_hex: &str) -> Option<VerifyingKey> {
    let bytes = hex::decode(public_key_hex).ok()?;
    VerifyingKey::from_sec1_bytes(&bytes).ok()
}

/// Check `signature_text` over `message` against `public_key_hex`.
///
/// Malformed signature text, an unparseable or off-curve public key, and a
/// failed check all yield `false`. This function never panics on input.
pub fn verify_signature(message: &[u8], signature_text: &str, public_key_hex: &str) -> bool {
    let signature = match EcdsaSignatureText::parse(signature_text) {
        Ok(signature) => signature,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed signature text");
            return false;
        }
    };

    let Some(key) = parse_public_key(public_key_hex) else {
        tracing::debug!("rejecting invalid public key");
        return false;
    };

    signature.verify(message, &key)
}
