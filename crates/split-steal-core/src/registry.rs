//! Game registry: live games keyed by monotonically allocated ids.

use crate::error::{GameError, Result};
use crate::game::Game;
use crate::protocol::GameId;
use ledger_core::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owns every game that has not reached a terminal payout
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registry {
    next_game_id: u128,
    games: HashMap<GameId, Game>,
    escrow: Address,
}

impl Registry {
    pub fn new(escrow: Address) -> Self {
        Self {
            next_game_id: 0,
            games: HashMap::new(),
            escrow,
        }
    }

    /// Hand out the next id. Ids are never reused, even after removal.
    ///
    /// The counter is a `u128`: a billion games a second would take longer
    /// than the age of the universe to reach `u128::MAX`, so allocation is
    /// treated as infallible.
    pub fn allocate_id(&mut self) -> GameId {
        let id = GameId::new(self.next_game_id);
        self.next_game_id += 1;
        tracing::debug!(game_id = %id, "allocated game id");
        id
    }

    /// Id the next call to `allocate_id` will return
    pub fn peek_next_id(&self) -> GameId {
        GameId::new(self.next_game_id)
    }

    pub fn insert(&mut self, id: GameId, game: Game) -> Result<()> {
        if self.games.contains_key(&id) {
            return Err(GameError::DuplicateGame(id));
        }
        self.games.insert(id, game);
        Ok(())
    }

    pub fn get(&self, id: GameId) -> Result<&Game> {
        self.games.get(&id).ok_or(GameError::GameNotFound(id))
    }

    pub fn get_mut(&mut self, id: GameId) -> Result<&mut Game> {
        self.games.get_mut(&id).ok_or(GameError::GameNotFound(id))
    }

    pub fn remove(&mut self, id: GameId) -> Result<Game> {
        self.games.remove(&id).ok_or(GameError::GameNotFound(id))
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.games.contains_key(&id)
    }

    /// Live game ids in ascending order
    pub fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.games.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn escrow(&self) -> Address {
        self.escrow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: GameId) -> Game {
        Game::new(
            id,
            10,
            Address::from_bytes([1; 32]),
            Address::from_bytes([2; 32]),
            0,
        )
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut registry = Registry::new(Address::random());
        let a = registry.allocate_id();
        let b = registry.allocate_id();

        assert_eq!(a, GameId::new(0));
        assert_eq!(b, GameId::new(1));
        assert_eq!(registry.peek_next_id(), GameId::new(2));
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut registry = Registry::new(Address::random());
        let id = registry.allocate_id();
        registry.insert(id, game(id)).unwrap();
        registry.remove(id).unwrap();

        assert_ne!(registry.allocate_id(), id);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut registry = Registry::new(Address::random());
        let id = registry.allocate_id();
        registry.insert(id, game(id)).unwrap();

        assert_eq!(
            registry.insert(id, game(id)),
            Err(GameError::DuplicateGame(id))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_game() {
        let mut registry = Registry::new(Address::random());
        let id = GameId::new(5);

        assert_eq!(registry.get(id).unwrap_err(), GameError::GameNotFound(id));
        assert_eq!(registry.remove(id), Err(GameError::GameNotFound(id)));
    }

    #[test]
    fn test_remove_returns_record() {
        let mut registry = Registry::new(Address::random());
        let id = registry.allocate_id();
        registry.insert(id, game(id)).unwrap();

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(!registry.contains(id));
        assert!(registry.is_empty());
    }
}
