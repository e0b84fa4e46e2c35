use crate::protocol::GameId;
use ledger_core::{Address, LedgerError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

/// Rejections returned before any state change
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Caller {0} is not the operator")]
    NotAuthorized(Address),

    #[error("Insufficient balance: need {need}, have {available}")]
    InsufficientBalance { need: u64, available: u64 },

    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("Player {0} is not in this game")]
    PlayerNotInGame(Address),

    #[error("Decision already submitted")]
    DecisionAlreadySubmitted,

    #[error("Decision already revealed")]
    DecisionAlreadyRevealed,

    #[error("Both players must have submitted a decision")]
    BothPlayersMustHaveSubmitted,

    #[error("Game not yet expired: now {now}, expires at {expires_at}")]
    GameNotYetExpired { now: u64, expires_at: u64 },

    #[error("Duplicate game: {0}")]
    DuplicateGame(GameId),

    #[error("Escrow holds {available}, settlement needs {need}")]
    EscrowUnderfunded { need: u64, available: u64 },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
