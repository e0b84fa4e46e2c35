//! Ledger trait definition.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from ledger operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient balance: need {need}, have {available}")]
    InsufficientBalance { need: u64, available: u64 },

    #[error("Balance overflow crediting {0}")]
    Overflow(Address),
}

/// A completed value transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: u64,
}

/// Trait for ledger operations
///
/// The escrow game only needs to read spendable balances and move value
/// between two accounts. Implementations can be:
/// - MockLedger for testing and the demo
/// - An adapter over a real chain or bank ledger in production
///
/// A transfer that returns `Ok` is atomic and irreversible.
pub trait Ledger: Send + Sync {
    /// Spendable balance of an account, zero for unknown accounts
    fn balance_of(&self, address: &Address) -> u64;

    /// Move `amount` from `from` to `to`
    fn transfer(&self, from: &Address, to: &Address, amount: u64) -> Result<(), LedgerError>;

    /// Check that `to` can receive `amount` without changing any balance.
    ///
    /// Lets callers that must make several transfers reject the batch up
    /// front instead of failing halfway through it.
    fn check_credit(&self, to: &Address, amount: u64) -> Result<(), LedgerError> {
        match self.balance_of(to).checked_add(amount) {
            Some(_) => Ok(()),
            None => Err(LedgerError::Overflow(*to)),
        }
    }
}
