//! Transition events for off-band observers.
//!
//! Emission is fire-and-forget: sinks cannot fail and nothing they do feeds
//! back into the state machine.

use crate::crypto::Hash256;
use crate::protocol::{Decision, GameId};
use ledger_core::Address;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One recorded state transition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    GameCreated {
        game_id: GameId,
        prize_pool_amount: u64,
        player_one: Address,
        player_two: Address,
        expiration_timestamp: u64,
        timestamp: u64,
    },
    DecisionSubmitted {
        game_id: GameId,
        player: Address,
        decision_hash: Hash256,
        salt_hash: Hash256,
        timestamp: u64,
    },
    DecisionRevealed {
        game_id: GameId,
        player: Address,
        decision: Decision,
        timestamp: u64,
    },
    GameConcluded {
        game_id: GameId,
        player_one_decision: Decision,
        player_two_decision: Decision,
        prize_pool_amount: u64,
        timestamp: u64,
    },
    FundsReleasedAfterExpiration {
        game_id: GameId,
        player_one_decision: Decision,
        player_two_decision: Decision,
        prize_pool_amount: u64,
        timestamp: u64,
    },
}

impl Event {
    pub fn game_id(&self) -> GameId {
        match self {
            Event::GameCreated { game_id, .. }
            | Event::DecisionSubmitted { game_id, .. }
            | Event::DecisionRevealed { game_id, .. }
            | Event::GameConcluded { game_id, .. }
            | Event::FundsReleasedAfterExpiration { game_id, .. } => *game_id,
        }
    }

    /// Stable event name, matching the serialized `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Event::GameCreated { .. } => "game_created",
            Event::DecisionSubmitted { .. } => "decision_submitted",
            Event::DecisionRevealed { .. } => "decision_revealed",
            Event::GameConcluded { .. } => "game_concluded",
            Event::FundsReleasedAfterExpiration { .. } => "funds_released_after_expiration",
        }
    }
}

/// Destination for transition events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Writes every event into the tracing stream
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: Event) {
        tracing::info!(
            kind = event.kind(),
            game_id = %event.game_id(),
            "event: {:?}",
            event
        );
    }
}

/// Keeps events in memory, in emission order
///
/// Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct MemoryEventSink {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Take all recorded events, leaving the buffer empty
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: Event) {
        self.events.lock().push(event);
    }
}
