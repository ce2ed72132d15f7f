//! End-to-end session tests with an external RNG and a persisted best score.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use merge2048::game::{
    legal_directions, Direction, GameConfig, GameEventData, GameSession, GameStatus,
    SessionError,
};
use merge2048::storage::{load_best_score, BestScoreStore, JsonFileStore, MemoryStore};
use merge2048::{Board, RandomSource};

/// Any `rand` generator can drive a session.
struct RandSource(StdRng);

impl RandomSource for RandSource {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

fn rand_session(seed: u64, best_score: u32) -> GameSession<RandSource> {
    GameSession::with_rng(
        GameConfig::default(),
        RandSource(StdRng::seed_from_u64(seed)),
        best_score,
    )
}

/// Play random legal moves until the game ends or `max_moves` is hit.
fn play_out<R: RandomSource>(
    session: &mut GameSession<R>,
    picker: &mut StdRng,
    max_moves: usize,
    mut on_best: impl FnMut(u32),
) {
    for _ in 0..max_moves {
        let legal = legal_directions(session.board());
        if legal.is_empty() {
            break;
        }
        let direction = legal[picker.gen_range(0..legal.len())];

        let before = session.score();
        let turn = session.apply_move(direction).unwrap();

        assert!(turn.changed(), "legal move {} did nothing", direction);
        assert_eq!(session.score(), before + turn.move_result.score_delta);
        assert!(session.best_score() >= session.score());

        for event in &turn.events {
            if let GameEventData::ScoreChanged { best_score, new_best: true, .. } = event.data {
                on_best(best_score);
            }
        }

        if turn.status.is_terminal() {
            break;
        }
    }
}

#[test]
fn test_random_games_reach_consistent_end_states() {
    let mut picker = StdRng::seed_from_u64(99);

    for seed in 0..20 {
        let mut session = rand_session(seed, 0);
        session.take_events();
        play_out(&mut session, &mut picker, 5_000, |_| {});

        match session.status() {
            GameStatus::Lost => assert!(legal_directions(session.board()).is_empty()),
            GameStatus::Won => assert!(session.board().max_tile() >= 2048),
            GameStatus::Playing => assert!(!legal_directions(session.board()).is_empty()),
        }

        if session.status().is_terminal() {
            assert_eq!(
                session.apply_move(Direction::Left).unwrap_err(),
                SessionError::Finished(session.status())
            );
        }
    }
}

#[test]
fn test_best_score_survives_sessions_via_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");
    let mut picker = StdRng::seed_from_u64(7);

    let mut store = JsonFileStore::new(&path);
    let mut first = rand_session(1, load_best_score(&store).unwrap());
    play_out(&mut first, &mut picker, 300, |best| store.save(best).unwrap());

    let first_best = first.best_score();
    assert!(first_best > 0);

    // A new process reading the same file starts from the saved best
    let reopened = JsonFileStore::new(&path);
    let stored = load_best_score(&reopened).unwrap();
    assert_eq!(stored, first_best);

    let mut second = rand_session(2, stored);
    let started = second.take_events();
    assert_eq!(started[0].data, GameEventData::GameStarted { best_score: first_best });
    assert_eq!(second.score(), 0);
    assert_eq!(second.best_score(), first_best);
}

#[test]
fn test_best_score_only_grows() {
    let mut store = MemoryStore::new();
    let mut picker = StdRng::seed_from_u64(3);
    let mut session = rand_session(11, 0);

    let mut saved = Vec::new();
    play_out(&mut session, &mut picker, 200, |best| {
        store.save(best).unwrap();
        saved.push(best);
    });

    assert!(saved.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(store.load().unwrap(), saved.last().copied());
}

#[test]
fn test_spawn_distribution_with_rand() {
    let mut rng = RandSource(StdRng::seed_from_u64(2048));
    let mut fours = 0u32;
    let total = 10_000u32;

    for _ in 0..total {
        let mut board = Board::EMPTY;
        let tile = board.spawn_random_tile(&mut rng).unwrap();
        assert!(tile.value == 2 || tile.value == 4);
        if tile.value == 4 {
            fours += 1;
        }
    }

    // 10% fours, give or take
    assert!((700..1300).contains(&fours), "fours = {}", fours);
}
