//! merge2048 demo
//!
//! Plays a seeded game with a fixed direction preference, persists the best
//! score, then replays the same seed and directions to check determinism.
//!
//! Usage: `merge2048-demo [SEED] [BEST_SCORE_FILE]`
//! Log level comes from `RUST_LOG` (default `info`).

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use merge2048::{
    VERSION, GRID_SIZE, WIN_TILE,
    game::{
        direction::Direction,
        events::GameEventData,
        rules::legal_directions,
        session::{replay_game, GameConfig, GameSession},
    },
    storage::{load_best_score, BestScoreStore, JsonFileStore},
    DeterministicRng,
};

/// Corner strategy: keep big tiles in the bottom-left.
const PREFERENCE: [Direction; 4] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
];

/// Safety cap on demo length.
const MAX_MOVES: usize = 100_000;

const DEFAULT_SEED: u64 = 2048;
const DEFAULT_STORE: &str = "merge2048-best.json";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {:?}", s))?,
        None => DEFAULT_SEED,
    };
    let store_path = args.next().unwrap_or_else(|| DEFAULT_STORE.to_string());

    info!("merge2048 v{}", VERSION);
    info!("Board: {}x{}, win tile {}", GRID_SIZE, GRID_SIZE, WIN_TILE);

    let mut store = JsonFileStore::new(store_path);
    let best_score = load_best_score(&store)
        .with_context(|| format!("failed to load {}", store.path().display()))?;

    demo_game(seed, best_score, &mut store)
}

/// Play one game and verify it by replay.
fn demo_game(seed: u64, best_score: u32, store: &mut JsonFileStore) -> anyhow::Result<()> {
    info!("=== Starting Demo Game ===");
    info!("RNG Seed: {}", seed);
    info!("Stored best score: {}", best_score);

    let config = GameConfig::default();
    let mut session =
        GameSession::with_rng(config.clone(), DeterministicRng::new(seed), best_score);
    session.take_events();
    info!("Starting board:\n{}", session.board());

    let mut played: Vec<Direction> = Vec::new();

    while !session.status().is_terminal() && played.len() < MAX_MOVES {
        let legal = legal_directions(session.board());
        let Some(direction) = PREFERENCE.into_iter().find(|d| legal.contains(d)) else {
            break;
        };

        let turn = session.apply_move(direction)?;
        played.push(direction);

        for event in &turn.events {
            match &event.data {
                GameEventData::ScoreChanged { best_score, new_best: true, .. } => {
                    store.save(*best_score)?;
                }
                GameEventData::StatusChanged { new_status, .. } => {
                    info!("Move {}: {:?}", event.move_number, new_status);
                }
                _ => {}
            }
        }

        if played.len() % 200 == 0 {
            info!(
                "Move {}: score {}, max tile {}",
                played.len(),
                session.score(),
                session.board().max_tile()
            );
        }
    }

    // Print final results
    info!("=== Game Results ===");
    info!("Final board:\n{}", session.board());
    info!("Status: {:?}", session.status());
    info!("Score: {} (best {})", session.score(), session.best_score());
    info!("Moves: {}", session.move_count());

    let hash = session.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Snapshot: {}", serde_json::to_string(&session.snapshot())?);

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replayed, events) = replay_game(seed, config, best_score, &played);
    let replay_hash = replayed.compute_hash();

    info!("Replay State Hash: {} ({} events)", hex::encode(replay_hash), events.len());

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        anyhow::bail!("DETERMINISM FAILURE: Hashes differ!")
    }
}
