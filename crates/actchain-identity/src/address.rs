//! Addresses: short identifiers derived from public keys.
//!
//! ```text
//! address = ripemd160(sha256(public_key_hex))
//! ```
//!
//! The first stage hashes the canonical text form of the public key (the
//! lowercase hex of the uncompressed point), not the raw point bytes.

use ripemd::Ripemd160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 20-byte RIPEMD-160 address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Derive from the canonical public key hex.
    pub fn derive(public_key_hex: &str) -> Self {
        let first = Sha256::digest(public_key_hex.as_bytes());
        Self(Ripemd160::digest(first).into())
    }

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex, 40 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string (either case).
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 20];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G_HEX: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_derive_from_generator_hex() {
        let addr = Address::derive(G_HEX);
        assert_eq!(addr.to_hex(), "49886e8b35210373c26ceb0d003d2fc52cbe4785");
    }

    #[test]
    fn test_hex_roundtrip_and_display() {
        let addr = Address::derive(G_HEX);
        let parsed = Address::from_hex(&addr.to_hex().to_uppercase()).unwrap();
        assert_eq!(parsed, addr);
        assert_eq!(format!("{addr}").len(), 40);
    }

    #[test]
    fn test_from_hex_wrong_length() {
        assert!(Address::from_hex("abcd").is_err());
    }
}
