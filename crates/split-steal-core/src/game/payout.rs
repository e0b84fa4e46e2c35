//! Payout matrix for concluded and expired games.
//!
//! Every function here returns payouts summing to exactly the prize pool.
//! Zero-amount entries are dropped.

use super::state::Game;
use crate::protocol::Decision;
use ledger_core::Address;
use serde::{Deserialize, Serialize};

/// A single transfer out of escrow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub recipient: Address,
    pub amount: u64,
}

fn pay(recipient: Address, amount: u64) -> Payout {
    Payout { recipient, amount }
}

/// Payouts once both decisions are known.
///
/// An unrevealed decision forfeits to the opponent; two unrevealed decisions
/// return the pool to the operator. On split/split each player gets half and
/// the odd unit, if any, goes back to the operator.
pub fn conclusion_payouts(game: &Game, operator: Address) -> Vec<Payout> {
    let pool = game.prize_pool_amount;
    let one = game.player_one.player_address;
    let two = game.player_two.player_address;

    let payouts = match (game.player_one.decision, game.player_two.decision) {
        (Decision::Split, Decision::Split) => {
            let half = pool / 2;
            vec![pay(one, half), pay(two, half), pay(operator, pool % 2)]
        }
        (Decision::Split, Decision::Steal) => vec![pay(two, pool)],
        (Decision::Steal, Decision::Split) => vec![pay(one, pool)],
        (Decision::Steal, Decision::Steal) => vec![pay(operator, pool)],
        (Decision::NotMade, Decision::Split | Decision::Steal) => vec![pay(two, pool)],
        (Decision::Split | Decision::Steal, Decision::NotMade) => vec![pay(one, pool)],
        (Decision::NotMade, Decision::NotMade) => vec![pay(operator, pool)],
    };

    payouts.into_iter().filter(|p| p.amount > 0).collect()
}

/// Payouts for a game settled by timeout.
///
/// With a missing commitment the operator is refunded. With both commitments
/// in, player one takes the pool regardless of who revealed.
pub fn expiration_payouts(game: &Game, operator: Address) -> Vec<Payout> {
    let pool = game.prize_pool_amount;
    let recipient = if game.both_submitted() {
        game.player_one.player_address
    } else {
        operator
    };

    if pool == 0 {
        Vec::new()
    } else {
        vec![pay(recipient, pool)]
    }
}
