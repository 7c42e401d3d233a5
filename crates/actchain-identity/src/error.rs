//! Error types for identities and signatures.

use thiserror::Error;

/// Errors from key pair operations.
///
/// Key generation and signing failures come from the underlying primitive
/// and are not recoverable by retrying with the same input.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureParseError),

    #[error("malformed signed message: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// Why signature text could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureParseError {
    #[error("missing ':' delimiter")]
    MissingDelimiter,

    #[error("empty r or s component")]
    EmptyComponent,

    #[error("component is not hexadecimal")]
    InvalidHex,

    #[error("component exceeds 32 bytes")]
    ComponentTooLong,

    #[error("component is zero or not below the curve order")]
    OutOfRange,
}

/// Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;
