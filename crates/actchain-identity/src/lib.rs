//! # actchain identity
//!
//! secp256k1 identities: key generation, address derivation, message
//! signing, and stateless signature verification.
//!
//! Identities are independent of the chain. Callers use them to sign
//! payloads before submission and to check signatures on payloads they read
//! back.
//!
//! ```rust
//! use actchain_identity::IdentityKeyPair;
//!
//! let keypair = IdentityKeyPair::generate().unwrap();
//! let signature = keypair.sign(b"plant 100 trees").unwrap();
//!
//! assert!(IdentityKeyPair::verify(
//!     b"plant 100 trees",
//!     &signature,
//!     &keypair.public_key_hex(),
//! ));
//! ```

pub mod address;
pub mod envelope;
pub mod error;
pub mod keypair;
pub mod signature;

pub use address::Address;
pub use envelope::SignedMessage;
pub use error::{IdentityError, Result, SignatureParseError};
pub use keypair::IdentityKeyPair;
pub use signature::{parse_public_key, verify_signature, EcdsaSignatureText, SIGNATURE_DELIMITER};
