//! Salt and commitment encoding for the commit-reveal scheme.

use super::hash::{digest, Hash256};
use crate::protocol::Decision;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Secret salt that blinds a decision until it is revealed
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salt(Vec<u8>);

impl Salt {
    /// Create a new random 32-byte salt
    pub fn random() -> Self {
        let mut bytes = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes of any length
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hash of the raw salt, submitted next to the decision commitment
    pub fn salt_hash(&self) -> Hash256 {
        digest(&self.0)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.0.len().min(8);
        write!(f, "Salt({})", hex::encode(&self.0[..shown]))
    }
}

/// Canonical encoding: one discriminant byte followed by the raw salt
pub fn encode_choice(decision: Decision, salt: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + salt.len());
    bytes.push(decision.as_byte());
    bytes.extend_from_slice(salt);
    bytes
}

/// Commitment = H(decision || salt)
pub fn commit(decision: Decision, salt: &[u8]) -> Hash256 {
    digest(&encode_choice(decision, salt))
}

/// Recover which decision, if any, `salt` opens `commitment` to.
///
/// Returns `Decision::NotMade` when neither the split nor the steal encoding
/// matches.
pub fn verify_reveal(commitment: &Hash256, salt: &[u8]) -> Decision {
    if commit(Decision::Split, salt) == *commitment {
        Decision::Split
    } else if commit(Decision::Steal, salt) == *commitment {
        Decision::Steal
    } else {
        Decision::NotMade
    }
}
