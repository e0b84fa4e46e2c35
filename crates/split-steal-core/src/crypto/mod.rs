//! Cryptographic primitives for the commit-reveal scheme.
//!
//! This module provides:
//! - Hash256 and the SHA3-256 digest
//! - Salt, choice encoding, commitment creation and reveal verification

mod commitment;
mod hash;

pub use commitment::{commit, encode_choice, verify_reveal, Salt};
pub use hash::{digest, Hash256};
