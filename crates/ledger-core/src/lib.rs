//! Ledger Core Library
//!
//! Collaborator abstractions the escrow game settles against:
//! - Address type for ledger accounts
//! - Ledger trait and MockLedger
//! - Clock trait, SystemClock and MockClock

pub mod address;
pub mod clock;
pub mod ledger;

pub use address::{Address, AddressParseError};
pub use clock::{Clock, MockClock, SystemClock};
pub use ledger::{Ledger, LedgerError, MockLedger, Transfer};
