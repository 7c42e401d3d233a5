//! Admission policies ("proof of action").
//!
//! An admission policy is a pure predicate over a candidate payload. The
//! ledger consults it after mining and only appends approved blocks.

use std::fmt;
use std::sync::Arc;

use crate::error::{CoreError, Result};

/// Decides whether a payload may enter the chain.
///
/// Implementations must be deterministic and free of side effects other
/// than logging.
pub trait AdmissionPolicy: Send + Sync {
    /// Approve or reject a payload.
    fn approve(&self, payload: &[u8]) -> bool;

    /// Short name used in logs and rejection outcomes.
    fn name(&self) -> &str;
}

/// Approves payloads whose byte length modulo `modulus` is below `threshold`.
///
/// The default is `len % 10 < 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthModulo {
    modulus: usize,
    threshold: usize,
}

impl LengthModulo {
    pub fn new(modulus: usize, threshold: usize) -> Result<Self> {
        if modulus == 0 {
            return Err(CoreError::InvalidPolicy("modulus must be non-zero".into()));
        }
        Ok(Self { modulus, threshold })
    }

    pub fn modulus(&self) -> usize {
        self.modulus
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for LengthModulo {
    fn default() -> Self {
        Self {
            modulus: 10,
            threshold: 5,
        }
    }
}

impl AdmissionPolicy for LengthModulo {
    fn approve(&self, payload: &[u8]) -> bool {
        let residue = payload.len() % self.modulus;
        let approved = residue < self.threshold;
        tracing::debug!(
            len = payload.len(),
            modulus = self.modulus,
            residue,
            threshold = self.threshold,
            approved,
            "length-modulo admission check"
        );
        approved
    }

    fn name(&self) -> &str {
        "length-modulo"
    }
}

/// Approves everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl AdmissionPolicy for AcceptAll {
    fn approve(&self, _payload: &[u8]) -> bool {
        true
    }

    fn name(&self) -> &str {
        "accept-all"
    }
}

/// Rejects everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectAll;

impl AdmissionPolicy for RejectAll {
    fn approve(&self, _payload: &[u8]) -> bool {
        false
    }

    fn name(&self) -> &str {
        "reject-all"
    }
}

/// Adapts a closure into a named policy.
pub struct FnPolicy<F> {
    name: String,
    predicate: F,
}

impl<F> FnPolicy<F>
where
    F: Fn(&[u8]) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<F> AdmissionPolicy for FnPolicy<F>
where
    F: Fn(&[u8]) -> bool + Send + Sync,
{
    fn approve(&self, payload: &[u8]) -> bool {
        let approved = (self.predicate)(payload);
        tracing::debug!(policy = %self.name, approved, "admission check");
        approved
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnPolicy({})", self.name)
    }
}

impl<P: AdmissionPolicy + ?Sized> AdmissionPolicy for Box<P> {
    fn approve(&self, payload: &[u8]) -> bool {
        (**self).approve(payload)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: AdmissionPolicy + ?Sized> AdmissionPolicy for Arc<P> {
    fn approve(&self, payload: &[u8]) -> bool {
        (**self).approve(payload)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
