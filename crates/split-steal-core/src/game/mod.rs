//! Game records and the payout matrix.

mod payout;
mod state;

pub use payout::{conclusion_payouts, expiration_payouts, Payout};
pub use state::{Game, GamePhase, PlayerData, Seat};
