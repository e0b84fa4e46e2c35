//! Split or Steal Demo
//!
//! Bootstraps the registry and escrow account over a mock ledger, then plays
//! one scripted game and prints every emitted event as a JSON line.
//!
//! Environment:
//! - `SPLIT_STEAL_OPERATOR`, `SPLIT_STEAL_ESCROW` - hex addresses (random if unset)
//! - `SPLIT_STEAL_EXPIRATION_SECS` - expiration window (default 3600)
//! - `SPLIT_STEAL_PRIZE_POOL` - prize pool to escrow (default 1000)
//! - `SPLIT_STEAL_SCENARIO` - `split-steal`, `split-split`, `steal-steal` or `timeout`
//! - `RUST_LOG` - log filter (default `info`)

use ledger_core::{Clock, MockClock, MockLedger, SystemClock};
use split_steal_core::{
    commit, Address, Decision, Event, EventSink, GameConfig, GameId, MemoryEventSink, Salt,
    SharedSplitOrSteal, SplitOrSteal, TracingEventSink,
};
use std::error::Error;
use std::thread;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_PRIZE_POOL: u64 = 1000;

type Engine = SharedSplitOrSteal<MockLedger, MockClock, DemoSink>;

/// Logs every event and keeps a copy for the JSON dump
#[derive(Clone, Default)]
struct DemoSink {
    memory: MemoryEventSink,
}

impl EventSink for DemoSink {
    fn emit(&self, event: Event) {
        TracingEventSink.emit(event.clone());
        self.memory.emit(event);
    }
}

#[derive(Clone, Copy, Debug)]
enum Scenario {
    SplitSteal,
    SplitSplit,
    StealSteal,
    Timeout,
}

impl Scenario {
    fn from_env() -> Result<Self, String> {
        match std::env::var("SPLIT_STEAL_SCENARIO").as_deref() {
            Err(_) | Ok("split-steal") => Ok(Scenario::SplitSteal),
            Ok("split-split") => Ok(Scenario::SplitSplit),
            Ok("steal-steal") => Ok(Scenario::StealSteal),
            Ok("timeout") => Ok(Scenario::Timeout),
            Ok(other) => Err(format!("unknown scenario: {}", other)),
        }
    }

    fn decisions(&self) -> (Decision, Decision) {
        match self {
            Scenario::SplitSteal => (Decision::Split, Decision::Steal),
            Scenario::SplitSplit | Scenario::Timeout => (Decision::Split, Decision::Split),
            Scenario::StealSteal => (Decision::Steal, Decision::Steal),
        }
    }
}

fn load_config() -> Result<GameConfig, Box<dyn Error>> {
    if std::env::var("SPLIT_STEAL_OPERATOR").is_ok() {
        let config = GameConfig::from_env()?;
        info!("Loaded deployment config from environment");
        return Ok(config);
    }

    info!("Using random operator and escrow (set SPLIT_STEAL_OPERATOR and SPLIT_STEAL_ESCROW to pin them)");
    let mut config = GameConfig::new(Address::random(), Address::random());
    if let Ok(secs) = std::env::var("SPLIT_STEAL_EXPIRATION_SECS") {
        config = config.with_expiration_window(secs.parse()?);
    }
    Ok(config)
}

/// Each player commits from their own thread
fn submit_both(engine: &Engine, id: GameId, players: [(Address, Decision, &Salt); 2]) {
    thread::scope(|scope| {
        for (address, decision, salt) in players {
            let engine = engine.clone();
            scope.spawn(move || {
                let result = engine.submit_decision(
                    &address,
                    id,
                    commit(decision, salt.as_bytes()),
                    salt.salt_hash(),
                );
                if let Err(e) = result {
                    tracing::error!("Submit by {} failed: {}", address, e);
                }
            });
        }
    });
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let scenario = Scenario::from_env()?;
    let prize_pool: u64 = match std::env::var("SPLIT_STEAL_PRIZE_POOL") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_PRIZE_POOL,
    };

    let operator = config.operator;
    let escrow = config.escrow;
    let window = config.expiration_window_secs;

    // Bootstrap: fund the operator and start the clock at wall time
    let ledger = MockLedger::new();
    ledger.credit(operator, prize_pool);
    let clock = MockClock::new(SystemClock.now());
    let sink = DemoSink::default();

    let engine: Engine = SharedSplitOrSteal::new(SplitOrSteal::new(
        config,
        ledger.clone(),
        clock.clone(),
        sink.clone(),
    ));

    let player_one = Address::random();
    let player_two = Address::random();
    info!("Operator: {}", operator);
    info!("Escrow: {}", escrow);
    info!("Player one: {}", player_one);
    info!("Player two: {}", player_two);
    info!("Scenario: {:?}, prize pool {}", scenario, prize_pool);

    let id = engine.create_game(&operator, prize_pool, player_one, player_two)?;

    let (d1, d2) = scenario.decisions();
    let salt_one = Salt::random();
    let salt_two = Salt::random();
    submit_both(
        &engine,
        id,
        [(player_one, d1, &salt_one), (player_two, d2, &salt_two)],
    );

    if let Some(game) = engine.game(id) {
        info!("Game {} is {:?}", id, game.phase());
    }

    match scenario {
        Scenario::Timeout => {
            // Only player one reveals before the window closes
            engine.reveal_decision(&player_one, id, salt_one.as_bytes())?;
            clock.advance(window + 1);
            engine.release_funds_after_expiration(&Address::random(), id)?;
        }
        _ => {
            engine.reveal_decision(&player_one, id, salt_one.as_bytes())?;
            engine.reveal_decision(&player_two, id, salt_two.as_bytes())?;
        }
    }

    for event in sink.memory.drain() {
        println!("{}", serde_json::to_string(&event)?);
    }

    info!(
        "Final balances: operator {}, player one {}, player two {}, escrow {}",
        ledger.balance(&operator),
        ledger.balance(&player_one),
        ledger.balance(&player_two),
        ledger.balance(&escrow)
    );

    Ok(())
}
