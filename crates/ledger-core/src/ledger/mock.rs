//! Mock ledger for testing.

use super::traits::{Ledger, LedgerError, Transfer};
use crate::address::Address;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct MockLedgerState {
    balances: HashMap<Address, u64>,
    /// Every successful transfer, in execution order
    history: Vec<Transfer>,
}

/// In-memory mock ledger for testing
///
/// Clones share the same accounts, so a test can hand one clone to the game
/// and keep another to inspect balances.
#[derive(Clone, Default)]
pub struct MockLedger {
    state: Arc<Mutex<MockLedgerState>>,
}

impl MockLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` into an account
    pub fn credit(&self, address: Address, amount: u64) {
        let mut state = self.state.lock();
        let balance = state.balances.entry(address).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Current balance of an account
    pub fn balance(&self, address: &Address) -> u64 {
        self.state.lock().balances.get(address).copied().unwrap_or(0)
    }

    /// Sum of all balances held by the ledger
    pub fn total_supply(&self) -> u128 {
        self.state
            .lock()
            .balances
            .values()
            .map(|b| u128::from(*b))
            .sum()
    }

    /// All transfers executed so far (for testing)
    pub fn history(&self) -> Vec<Transfer> {
        self.state.lock().history.clone()
    }
}

impl Ledger for MockLedger {
    fn balance_of(&self, address: &Address) -> u64 {
        self.balance(address)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: u64) -> Result<(), LedgerError> {
        let mut state = self.state.lock();

        let available = state.balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                need: amount,
                available,
            });
        }

        // Self-transfers only need the balance check
        if from != to {
            let receiver = state.balances.get(to).copied().unwrap_or(0);
            let credited = receiver
                .checked_add(amount)
                .ok_or(LedgerError::Overflow(*to))?;
            state.balances.insert(*from, available - amount);
            state.balances.insert(*to, credited);
        }

        state.history.push(Transfer {
            from: *from,
            to: *to,
            amount,
        });

        tracing::debug!(%from, %to, amount, "ledger transfer");
        Ok(())
    }
}
