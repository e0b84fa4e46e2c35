//! Split-or-steal state machine.
//!
//! Four entry operations drive every game:
//! - `create_game`: the operator escrows a prize pool for two players
//! - `submit_decision`: each player commits to H(decision || salt)
//! - `reveal_decision`: each player opens their commitment with the salt
//! - `release_funds_after_expiration`: anyone settles a timed-out game
//!
//! Every precondition is checked before the registry is touched or value is
//! moved, so a rejected call leaves no trace.

use crate::config::GameConfig;
use crate::crypto::{verify_reveal, Hash256};
use crate::error::{GameError, Result};
use crate::game::{conclusion_payouts, expiration_payouts, Game, Payout};
use crate::protocol::{Decision, Event, EventSink, GameId};
use crate::registry::Registry;
use ledger_core::{Address, Clock, Ledger};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Final distribution of a game that left the registry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub game_id: GameId,
    pub player_one_decision: Decision,
    pub player_two_decision: Decision,
    pub prize_pool_amount: u64,
    pub payouts: Vec<Payout>,
}

impl Settlement {
    /// Amount paid to `address` across all payouts
    pub fn paid_to(&self, address: &Address) -> u64 {
        self.payouts
            .iter()
            .filter(|p| p.recipient == *address)
            .map(|p| p.amount)
            .sum()
    }
}

/// Result of a reveal call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealOutcome {
    /// Decision recorded for the caller; `NotMade` when the salt did not open
    /// the commitment
    pub decision: Decision,
    /// Present when this reveal concluded the game
    pub settlement: Option<Settlement>,
}

/// Escrow game engine over injected ledger, clock and event sink
pub struct SplitOrSteal<L, C, E> {
    config: GameConfig,
    registry: Registry,
    ledger: L,
    clock: C,
    events: E,
}

impl<L: Ledger, C: Clock, E: EventSink> SplitOrSteal<L, C, E> {
    /// Bootstrap an empty registry custodied by the configured escrow account
    pub fn new(config: GameConfig, ledger: L, clock: C, events: E) -> Self {
        let registry = Registry::new(config.escrow);
        Self::with_registry(config, registry, ledger, clock, events)
    }

    /// Resume from a registry the host persisted earlier
    pub fn with_registry(
        config: GameConfig,
        registry: Registry,
        ledger: L,
        clock: C,
        events: E,
    ) -> Self {
        info!(
            operator = %config.operator,
            escrow = %registry.escrow(),
            live_games = registry.len(),
            "split-or-steal engine ready"
        );
        Self {
            config,
            registry,
            ledger,
            clock,
            events,
        }
    }

    pub fn operator(&self) -> Address {
        self.config.operator
    }

    pub fn escrow(&self) -> Address {
        self.registry.escrow()
    }

    pub fn expiration_window(&self) -> u64 {
        self.config.expiration_window_secs
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.registry.get(game_id).ok()
    }

    /// Escrow a prize pool and open a game for two players
    pub fn create_game(
        &mut self,
        caller: &Address,
        prize_pool_amount: u64,
        player_one: Address,
        player_two: Address,
    ) -> Result<GameId> {
        if *caller != self.config.operator {
            warn!(%caller, "create_game rejected: caller is not the operator");
            return Err(GameError::NotAuthorized(*caller));
        }

        let available = self.ledger.balance_of(caller);
        if available < prize_pool_amount {
            warn!(
                need = prize_pool_amount,
                available, "create_game rejected: operator underfunded"
            );
            return Err(GameError::InsufficientBalance {
                need: prize_pool_amount,
                available,
            });
        }

        let next_id = self.registry.peek_next_id();
        if self.registry.contains(next_id) {
            return Err(GameError::DuplicateGame(next_id));
        }

        let escrow = self.registry.escrow();
        self.ledger.transfer(caller, &escrow, prize_pool_amount)?;

        let now = self.clock.now();
        let expiration_timestamp = now.saturating_add(self.config.expiration_window_secs);
        let game_id = self.registry.allocate_id();
        let game = Game::new(
            game_id,
            prize_pool_amount,
            player_one,
            player_two,
            expiration_timestamp,
        );
        self.registry.insert(game_id, game)?;

        info!(
            %game_id,
            prize_pool_amount,
            %player_one,
            %player_two,
            expiration_timestamp,
            "game created"
        );
        self.events.emit(Event::GameCreated {
            game_id,
            prize_pool_amount,
            player_one,
            player_two,
            expiration_timestamp,
            timestamp: now,
        });

        Ok(game_id)
    }

    /// Record the caller's commitment and salt hash
    pub fn submit_decision(
        &mut self,
        caller: &Address,
        game_id: GameId,
        decision_hash: Hash256,
        salt_hash: Hash256,
    ) -> Result<()> {
        let game = self.registry.get_mut(game_id)?;
        let seat = game
            .seat_of(caller)
            .ok_or(GameError::PlayerNotInGame(*caller))?;

        let player = game.player_mut(seat);
        if player.has_submitted() {
            warn!(%game_id, %caller, "decision already submitted");
            return Err(GameError::DecisionAlreadySubmitted);
        }

        player.decision_hash = Some(decision_hash);
        player.salt_hash = Some(salt_hash);

        info!(%game_id, %caller, %seat, phase = ?game.phase(), "decision submitted");
        self.events.emit(Event::DecisionSubmitted {
            game_id,
            player: *caller,
            decision_hash,
            salt_hash,
            timestamp: self.clock.now(),
        });

        Ok(())
    }

    /// Open the caller's commitment with `salt`.
    ///
    /// A salt that opens neither a split nor a steal commitment is not an
    /// error: the decision stays `NotMade` and the player may try again until
    /// the game expires. The game concludes as soon as both decisions are made.
    pub fn reveal_decision(
        &mut self,
        caller: &Address,
        game_id: GameId,
        salt: &[u8],
    ) -> Result<RevealOutcome> {
        let game = self.registry.get(game_id)?;
        let seat = game
            .seat_of(caller)
            .ok_or(GameError::PlayerNotInGame(*caller))?;

        if !game.both_submitted() {
            return Err(GameError::BothPlayersMustHaveSubmitted);
        }

        let player = game.player(seat);
        if player.has_revealed() {
            return Err(GameError::DecisionAlreadyRevealed);
        }

        let decision = match &player.decision_hash {
            Some(commitment) => verify_reveal(commitment, salt),
            None => Decision::NotMade,
        };
        if !decision.is_made() {
            warn!(%game_id, %caller, "reveal did not match commitment");
        }

        // Work out the settlement before mutating anything
        let mut updated = game.clone();
        updated.player_mut(seat).decision = decision;
        let payouts = if updated.both_revealed() {
            let payouts = conclusion_payouts(&updated, self.config.operator);
            self.ensure_payable(game_id, &payouts)?;
            Some(payouts)
        } else {
            None
        };

        self.registry.get_mut(game_id)?.player_mut(seat).decision = decision;

        let now = self.clock.now();
        info!(%game_id, %caller, %seat, %decision, "decision revealed");
        self.events.emit(Event::DecisionRevealed {
            game_id,
            player: *caller,
            decision,
            timestamp: now,
        });

        let settlement = match payouts {
            Some(payouts) => {
                let game = self.registry.remove(game_id)?;
                let settlement = self.pay_out(game, payouts)?;
                info!(
                    %game_id,
                    player_one = %settlement.player_one_decision,
                    player_two = %settlement.player_two_decision,
                    prize_pool_amount = settlement.prize_pool_amount,
                    "game concluded"
                );
                self.events.emit(Event::GameConcluded {
                    game_id,
                    player_one_decision: settlement.player_one_decision,
                    player_two_decision: settlement.player_two_decision,
                    prize_pool_amount: settlement.prize_pool_amount,
                    timestamp: now,
                });
                Some(settlement)
            }
            None => {
                info!(
                    %game_id,
                    awaiting = %seat.opponent(),
                    phase = ?updated.phase(),
                    "waiting for the other reveal"
                );
                None
            }
        };

        Ok(RevealOutcome {
            decision,
            settlement,
        })
    }

    /// Settle a game whose expiration timestamp has passed. Anyone may call.
    pub fn release_funds_after_expiration(
        &mut self,
        caller: &Address,
        game_id: GameId,
    ) -> Result<Settlement> {
        let now = self.clock.now();
        let game = self.registry.get(game_id)?;

        if !game.is_expired(now) {
            return Err(GameError::GameNotYetExpired {
                now,
                expires_at: game.expiration_timestamp,
            });
        }

        let payouts = expiration_payouts(game, self.config.operator);
        self.ensure_payable(game_id, &payouts)?;

        let game = self.registry.remove(game_id)?;
        let settlement = self.pay_out(game, payouts)?;

        info!(
            %game_id,
            %caller,
            player_one = %settlement.player_one_decision,
            player_two = %settlement.player_two_decision,
            prize_pool_amount = settlement.prize_pool_amount,
            "funds released after expiration"
        );
        self.events.emit(Event::FundsReleasedAfterExpiration {
            game_id,
            player_one_decision: settlement.player_one_decision,
            player_two_decision: settlement.player_two_decision,
            prize_pool_amount: settlement.prize_pool_amount,
            timestamp: now,
        });

        Ok(settlement)
    }

    /// Reject a settlement the ledger could not complete in full.
    ///
    /// Payouts are separate irreversible transfers, so both sides of each one
    /// are checked before the game record changes: the escrow must hold the
    /// whole amount and every recipient must be able to take its share.
    fn ensure_payable(&self, game_id: GameId, payouts: &[Payout]) -> Result<()> {
        let escrow = self.registry.escrow();
        let mut owed: BTreeMap<Address, u64> = BTreeMap::new();
        for payout in payouts {
            let entry = owed.entry(payout.recipient).or_insert(0);
            *entry = entry.saturating_add(payout.amount);
        }

        let need = owed.values().fold(0u64, |acc, v| acc.saturating_add(*v));
        let available = self.ledger.balance_of(&escrow);
        if available < need {
            warn!(%game_id, need, available, "settlement blocked: escrow underfunded");
            return Err(GameError::EscrowUnderfunded { need, available });
        }

        for (recipient, amount) in owed.iter().filter(|(r, _)| **r != escrow) {
            if let Err(e) = self.ledger.check_credit(recipient, *amount) {
                warn!(%game_id, %recipient, amount, "settlement blocked: {}", e);
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Move each payout out of escrow for a game already removed from the registry
    fn pay_out(&self, game: Game, payouts: Vec<Payout>) -> Result<Settlement> {
        let escrow = self.registry.escrow();
        for payout in &payouts {
            self.ledger
                .transfer(&escrow, &payout.recipient, payout.amount)?;
        }

        Ok(Settlement {
            game_id: game.id,
            player_one_decision: game.player_one.decision,
            player_two_decision: game.player_two.decision,
            prize_pool_amount: game.prize_pool_amount,
            payouts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{commit, Salt};
    use crate::protocol::MemoryEventSink;
    use ledger_core::{LedgerError, MockClock, MockLedger};

    type Engine = SplitOrSteal<MockLedger, MockClock, MemoryEventSink>;

    struct Harness {
        engine: Engine,
        ledger: MockLedger,
        clock: MockClock,
        events: MemoryEventSink,
        operator: Address,
        escrow: Address,
        alice: Address,
        bob: Address,
    }

    fn harness() -> Harness {
        let operator = Address::from_bytes([0xaa; 32]);
        let escrow = Address::from_bytes([0xee; 32]);
        let ledger = MockLedger::new();
        ledger.credit(operator, 10_000);
        let clock = MockClock::new(10);
        let events = MemoryEventSink::new();

        let engine = SplitOrSteal::new(
            GameConfig::new(operator, escrow),
            ledger.clone(),
            clock.clone(),
            events.clone(),
        );

        Harness {
            engine,
            ledger,
            clock,
            events,
            operator,
            escrow,
            alice: Address::from_bytes([1; 32]),
            bob: Address::from_bytes([2; 32]),
        }
    }

    fn submit(h: &mut Harness, who: Address, id: GameId, decision: Decision, salt: &Salt) {
        h.engine
            .submit_decision(&who, id, commit(decision, salt.as_bytes()), salt.salt_hash())
            .unwrap();
    }

    #[test]
    fn test_create_requires_operator() {
        let mut h = harness();
        let (alice, bob) = (h.alice, h.bob);

        let result = h.engine.create_game(&alice, 100, alice, bob);

        assert_eq!(result, Err(GameError::NotAuthorized(alice)));
        assert_eq!(h.engine.registry().peek_next_id(), GameId::new(0));
        assert!(h.ledger.history().is_empty());
        assert!(h.events.is_empty());
    }

    #[test]
    fn test_create_requires_balance() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);

        let result = h.engine.create_game(&operator, 10_001, alice, bob);

        assert_eq!(
            result,
            Err(GameError::InsufficientBalance {
                need: 10_001,
                available: 10_000
            })
        );
        assert_eq!(h.engine.registry().peek_next_id(), GameId::new(0));
        assert!(h.engine.registry().is_empty());
        assert_eq!(h.ledger.balance(&operator), 10_000);
    }

    #[test]
    fn test_create_escrows_pool() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);

        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();

        assert_eq!(h.ledger.balance(&operator), 9000);
        assert_eq!(h.ledger.balance(&h.escrow), 1000);
        let game = h.engine.game(id).unwrap();
        assert_eq!(game.expiration_timestamp, 3610);
        assert_eq!(game.player_one.player_address, alice);
        assert_eq!(game.player_two.decision, Decision::NotMade);
    }

    #[test]
    fn test_submit_by_outsider_rejected() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let outsider = Address::from_bytes([7; 32]);
        let hash = commit(Decision::Split, b"x");

        assert_eq!(
            h.engine.submit_decision(&outsider, id, hash, hash),
            Err(GameError::PlayerNotInGame(outsider))
        );
    }

    #[test]
    fn test_submit_twice_keeps_first_commitment() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let first = Salt::random();
        submit(&mut h, alice, id, Decision::Split, &first);

        let second = commit(Decision::Steal, b"other");
        let result = h.engine.submit_decision(&alice, id, second, second);

        assert_eq!(result, Err(GameError::DecisionAlreadySubmitted));
        let player = &h.engine.game(id).unwrap().player_one;
        assert_eq!(
            player.decision_hash,
            Some(commit(Decision::Split, first.as_bytes()))
        );
        assert_eq!(player.salt_hash, Some(first.salt_hash()));
    }

    #[test]
    fn test_submit_unknown_game() {
        let mut h = harness();
        let alice = h.alice;
        let hash = commit(Decision::Split, b"x");

        assert_eq!(
            h.engine.submit_decision(&alice, GameId::new(3), hash, hash),
            Err(GameError::GameNotFound(GameId::new(3)))
        );
    }

    #[test]
    fn test_reveal_before_opponent_commits() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let salt = Salt::random();
        submit(&mut h, alice, id, Decision::Split, &salt);

        assert_eq!(
            h.engine.reveal_decision(&alice, id, salt.as_bytes()),
            Err(GameError::BothPlayersMustHaveSubmitted)
        );
        assert_eq!(h.engine.game(id).unwrap().player_one.decision, Decision::NotMade);
    }

    #[test]
    fn test_bad_salt_is_recorded_not_rejected() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let salt_a = Salt::random();
        let salt_b = Salt::random();
        submit(&mut h, alice, id, Decision::Split, &salt_a);
        submit(&mut h, bob, id, Decision::Steal, &salt_b);

        let outcome = h.engine.reveal_decision(&alice, id, b"wrong").unwrap();

        assert_eq!(outcome.decision, Decision::NotMade);
        assert!(outcome.settlement.is_none());
        assert!(h.engine.game(id).is_some());
        assert!(matches!(
            h.events.events().last(),
            Some(Event::DecisionRevealed {
                decision: Decision::NotMade,
                ..
            })
        ));

        // A later correct reveal still counts
        let outcome = h.engine.reveal_decision(&alice, id, salt_a.as_bytes()).unwrap();
        assert_eq!(outcome.decision, Decision::Split);
    }

    #[test]
    fn test_second_reveal_rejected() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let salt_a = Salt::random();
        let salt_b = Salt::random();
        submit(&mut h, alice, id, Decision::Steal, &salt_a);
        submit(&mut h, bob, id, Decision::Steal, &salt_b);
        h.engine.reveal_decision(&alice, id, salt_a.as_bytes()).unwrap();

        assert_eq!(
            h.engine.reveal_decision(&alice, id, salt_a.as_bytes()),
            Err(GameError::DecisionAlreadyRevealed)
        );
    }

    #[test]
    fn test_split_split_pays_half_each() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1001, alice, bob).unwrap();
        let salt_a = Salt::random();
        let salt_b = Salt::random();
        submit(&mut h, alice, id, Decision::Split, &salt_a);
        submit(&mut h, bob, id, Decision::Split, &salt_b);
        h.engine.reveal_decision(&alice, id, salt_a.as_bytes()).unwrap();

        let outcome = h.engine.reveal_decision(&bob, id, salt_b.as_bytes()).unwrap();

        let settlement = outcome.settlement.unwrap();
        assert_eq!(settlement.paid_to(&alice), 500);
        assert_eq!(settlement.paid_to(&bob), 500);
        assert_eq!(h.ledger.balance(&alice), 500);
        assert_eq!(h.ledger.balance(&bob), 500);
        // Odd unit goes back to the operator
        assert_eq!(h.ledger.balance(&operator), 10_000 - 1000);
        assert_eq!(h.ledger.balance(&h.escrow), 0);
        assert!(h.engine.game(id).is_none());
    }

    #[test]
    fn test_steal_steal_refunds_operator() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let salt_a = Salt::random();
        let salt_b = Salt::random();
        submit(&mut h, alice, id, Decision::Steal, &salt_a);
        submit(&mut h, bob, id, Decision::Steal, &salt_b);
        h.engine.reveal_decision(&bob, id, salt_b.as_bytes()).unwrap();
        h.engine.reveal_decision(&alice, id, salt_a.as_bytes()).unwrap();

        assert_eq!(h.ledger.balance(&operator), 10_000);
        assert_eq!(h.ledger.balance(&alice), 0);
        assert_eq!(h.ledger.balance(&bob), 0);
        assert_eq!(h.ledger.balance(&h.escrow), 0);
    }

    #[test]
    fn test_release_before_expiry_rejected() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        h.clock.set(3610);

        assert_eq!(
            h.engine.release_funds_after_expiration(&bob, id),
            Err(GameError::GameNotYetExpired {
                now: 3610,
                expires_at: 3610
            })
        );
        assert!(h.engine.game(id).is_some());
    }

    #[test]
    fn test_release_with_no_commitments_refunds_operator() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        h.clock.set(3611);
        let stranger = Address::from_bytes([9; 32]);

        let settlement = h.engine.release_funds_after_expiration(&stranger, id).unwrap();

        assert_eq!(settlement.paid_to(&operator), 1000);
        assert_eq!(h.ledger.balance(&operator), 10_000);
        assert!(h.engine.game(id).is_none());
        assert_eq!(
            h.engine.release_funds_after_expiration(&stranger, id),
            Err(GameError::GameNotFound(id))
        );
    }

    #[test]
    fn test_release_after_both_commit_pays_player_one() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let salt_a = Salt::random();
        let salt_b = Salt::random();
        submit(&mut h, alice, id, Decision::Split, &salt_a);
        submit(&mut h, bob, id, Decision::Steal, &salt_b);
        // Only player two reveals; player one still takes the pool
        h.engine.reveal_decision(&bob, id, salt_b.as_bytes()).unwrap();
        h.clock.advance(3601);

        let settlement = h.engine.release_funds_after_expiration(&bob, id).unwrap();

        assert_eq!(settlement.player_two_decision, Decision::Steal);
        assert_eq!(h.ledger.balance(&alice), 1000);
        assert_eq!(h.ledger.balance(&bob), 0);
        assert!(matches!(
            h.events.events().last(),
            Some(Event::FundsReleasedAfterExpiration {
                prize_pool_amount: 1000,
                ..
            })
        ));
    }

    #[test]
    fn test_underfunded_escrow_blocks_settlement() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        // Drain escrow out from under the engine
        let escrow = h.escrow;
        h.ledger.transfer(&escrow, &operator, 1000).unwrap();
        h.clock.advance(4000);

        assert_eq!(
            h.engine.release_funds_after_expiration(&alice, id),
            Err(GameError::EscrowUnderfunded {
                need: 1000,
                available: 0
            })
        );
        assert!(h.engine.game(id).is_some());
    }

    #[test]
    fn test_uncreditable_recipient_blocks_conclusion() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        h.ledger.credit(bob, u64::MAX - 100);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let salt_a = Salt::random();
        let salt_b = Salt::random();
        submit(&mut h, alice, id, Decision::Split, &salt_a);
        submit(&mut h, bob, id, Decision::Split, &salt_b);
        h.engine.reveal_decision(&alice, id, salt_a.as_bytes()).unwrap();
        let events_before = h.events.len();

        let result = h.engine.reveal_decision(&bob, id, salt_b.as_bytes());

        assert_eq!(
            result,
            Err(GameError::Ledger(LedgerError::Overflow(bob)))
        );
        // Nothing moved and nothing was recorded
        let game = h.engine.game(id).unwrap();
        assert_eq!(game.player_two.decision, Decision::NotMade);
        assert_eq!(h.ledger.balance(&alice), 0);
        assert_eq!(h.ledger.balance(&h.escrow), 1000);
        assert_eq!(h.events.len(), events_before);

        // The pool is still recoverable once the game expires
        h.clock.advance(3601);
        let settlement = h.engine.release_funds_after_expiration(&alice, id).unwrap();
        assert_eq!(settlement.paid_to(&alice), 1000);
        assert_eq!(h.ledger.balance(&h.escrow), 0);
    }

    #[test]
    fn test_uncreditable_recipient_blocks_release() {
        let mut h = harness();
        let (operator, alice, bob) = (h.operator, h.alice, h.bob);
        let id = h.engine.create_game(&operator, 1000, alice, bob).unwrap();
        let salt_a = Salt::random();
        let salt_b = Salt::random();
        submit(&mut h, alice, id, Decision::Split, &salt_a);
        submit(&mut h, bob, id, Decision::Steal, &salt_b);
        h.ledger.credit(alice, u64::MAX);
        h.clock.advance(3601);

        assert_eq!(
            h.engine.release_funds_after_expiration(&bob, id),
            Err(GameError::Ledger(LedgerError::Overflow(alice)))
        );
        assert!(h.engine.game(id).is_some());
        assert_eq!(h.ledger.balance(&h.escrow), 1000);
        assert!(!matches!(
            h.events.events().last(),
            Some(Event::FundsReleasedAfterExpiration { .. })
        ));
    }

    #[test]
    fn test_same_address_in_both_seats() {
        let mut h = harness();
        let (operator, alice) = (h.operator, h.alice);
        let id = h.engine.create_game(&operator, 1000, alice, alice).unwrap();
        let salt = Salt::random();
        submit(&mut h, alice, id, Decision::Steal, &salt);

        // Both calls resolve to player one, so seat two can never commit
        let hash = commit(Decision::Split, b"again");
        assert_eq!(
            h.engine.submit_decision(&alice, id, hash, hash),
            Err(GameError::DecisionAlreadySubmitted)
        );
        assert_eq!(
            h.engine.reveal_decision(&alice, id, salt.as_bytes()),
            Err(GameError::BothPlayersMustHaveSubmitted)
        );
        let game = h.engine.game(id).unwrap();
        assert_eq!(game.player_two.decision_hash, None);

        h.clock.advance(3601);
        let settlement = h.engine.release_funds_after_expiration(&alice, id).unwrap();

        assert_eq!(settlement.paid_to(&operator), 1000);
        assert_eq!(settlement.paid_to(&alice), 0);
        assert_eq!(h.ledger.balance(&operator), 10_000);
        assert_eq!(h.ledger.balance(&alice), 0);
    }
}
