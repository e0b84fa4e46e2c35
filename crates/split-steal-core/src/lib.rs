//! Split or Steal Core Library
//!
//! This crate provides the commit-reveal protocol, the game registry, and the
//! settlement state machine for a two-player split-or-steal escrow game.
//! Balances and time come from the collaborators in `ledger-core`.

pub mod config;
pub mod crypto;
pub mod error;
pub mod game;
pub mod machine;
pub mod protocol;
pub mod registry;
pub mod shared;

pub use config::{ConfigError, GameConfig, DEFAULT_EXPIRATION_WINDOW_SECS};
pub use crypto::{commit, digest, encode_choice, verify_reveal, Hash256, Salt};
pub use error::{GameError, Result};
pub use game::{Game, GamePhase, Payout, PlayerData, Seat};
pub use machine::{RevealOutcome, Settlement, SplitOrSteal};
pub use protocol::{Decision, Event, EventSink, GameId, MemoryEventSink, TracingEventSink};
pub use registry::Registry;
pub use shared::SharedSplitOrSteal;

pub use ledger_core::{Address, Clock, Ledger, LedgerError, MockClock, MockLedger, SystemClock};
