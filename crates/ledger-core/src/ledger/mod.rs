//! Ledger abstraction for balance checks and value transfers.

mod mock;
mod traits;

pub use mock::MockLedger;
pub use traits::{Ledger, LedgerError, Transfer};
