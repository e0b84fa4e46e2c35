//! Thread-safe handle over the state machine.

use crate::crypto::Hash256;
use crate::error::Result;
use crate::game::Game;
use crate::machine::{RevealOutcome, Settlement, SplitOrSteal};
use crate::protocol::{EventSink, GameId};
use ledger_core::{Address, Clock, Ledger};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle that serializes every entry operation.
///
/// Each call holds the lock for its whole duration, so concurrent callers on
/// the same game are linearized and never observe a half-updated record.
pub struct SharedSplitOrSteal<L, C, E> {
    inner: Arc<Mutex<SplitOrSteal<L, C, E>>>,
}

impl<L, C, E> Clone for SharedSplitOrSteal<L, C, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: Ledger, C: Clock, E: EventSink> SharedSplitOrSteal<L, C, E> {
    pub fn new(engine: SplitOrSteal<L, C, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn create_game(
        &self,
        caller: &Address,
        prize_pool_amount: u64,
        player_one: Address,
        player_two: Address,
    ) -> Result<GameId> {
        self.inner
            .lock()
            .create_game(caller, prize_pool_amount, player_one, player_two)
    }

    pub fn submit_decision(
        &self,
        caller: &Address,
        game_id: GameId,
        decision_hash: Hash256,
        salt_hash: Hash256,
    ) -> Result<()> {
        self.inner
            .lock()
            .submit_decision(caller, game_id, decision_hash, salt_hash)
    }

    pub fn reveal_decision(
        &self,
        caller: &Address,
        game_id: GameId,
        salt: &[u8],
    ) -> Result<RevealOutcome> {
        self.inner.lock().reveal_decision(caller, game_id, salt)
    }

    pub fn release_funds_after_expiration(
        &self,
        caller: &Address,
        game_id: GameId,
    ) -> Result<Settlement> {
        self.inner
            .lock()
            .release_funds_after_expiration(caller, game_id)
    }

    /// Snapshot of a live game
    pub fn game(&self, game_id: GameId) -> Option<Game> {
        self.inner.lock().game(game_id).cloned()
    }

    /// Run a read-only closure against the engine under the lock
    pub fn with<R>(&self, f: impl FnOnce(&SplitOrSteal<L, C, E>) -> R) -> R {
        f(&self.inner.lock())
    }
}
