//! Game and per-player records.

use crate::crypto::Hash256;
use crate::protocol::{Decision, GameId};
use ledger_core::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat at the table; order decides payout tie-breaks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// Get the opponent
    pub fn opponent(&self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::One => write!(f, "player_one"),
            Seat::Two => write!(f, "player_two"),
        }
    }
}

/// Live phase of a game still held by the registry.
///
/// Concluded and expired games are removed from the registry, so they have
/// no phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Created,
    OneSubmitted,
    BothSubmitted,
    OneRevealed,
}

/// One participant's commitment and revealed decision
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub player_address: Address,
    pub decision_hash: Option<Hash256>,
    /// Stored for auditing only, never checked during settlement
    pub salt_hash: Option<Hash256>,
    pub decision: Decision,
}

impl PlayerData {
    pub fn new(player_address: Address) -> Self {
        Self {
            player_address,
            decision_hash: None,
            salt_hash: None,
            decision: Decision::NotMade,
        }
    }

    pub fn has_submitted(&self) -> bool {
        self.decision_hash.is_some()
    }

    pub fn has_revealed(&self) -> bool {
        self.decision.is_made()
    }
}

/// An escrowed game between two players
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub prize_pool_amount: u64,
    pub player_one: PlayerData,
    pub player_two: PlayerData,
    pub expiration_timestamp: u64,
}

impl Game {
    pub fn new(
        id: GameId,
        prize_pool_amount: u64,
        player_one: Address,
        player_two: Address,
        expiration_timestamp: u64,
    ) -> Self {
        Self {
            id,
            prize_pool_amount,
            player_one: PlayerData::new(player_one),
            player_two: PlayerData::new(player_two),
            expiration_timestamp,
        }
    }

    /// Seat held by `address`; player one wins if both seats share it
    pub fn seat_of(&self, address: &Address) -> Option<Seat> {
        if self.player_one.player_address == *address {
            Some(Seat::One)
        } else if self.player_two.player_address == *address {
            Some(Seat::Two)
        } else {
            None
        }
    }

    pub fn player(&self, seat: Seat) -> &PlayerData {
        match seat {
            Seat::One => &self.player_one,
            Seat::Two => &self.player_two,
        }
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut PlayerData {
        match seat {
            Seat::One => &mut self.player_one,
            Seat::Two => &mut self.player_two,
        }
    }

    pub fn both_submitted(&self) -> bool {
        self.player_one.has_submitted() && self.player_two.has_submitted()
    }

    pub fn both_revealed(&self) -> bool {
        self.player_one.has_revealed() && self.player_two.has_revealed()
    }

    /// Strictly past the expiration timestamp
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expiration_timestamp
    }

    pub fn phase(&self) -> GamePhase {
        if self.player_one.has_revealed() || self.player_two.has_revealed() {
            GamePhase::OneRevealed
        } else if self.both_submitted() {
            GamePhase::BothSubmitted
        } else if self.player_one.has_submitted() || self.player_two.has_submitted() {
            GamePhase::OneSubmitted
        } else {
            GamePhase::Created
        }
    }
}
