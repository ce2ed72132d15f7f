//! Property tests for the move engine and terminal rules.

use proptest::prelude::*;

use merge2048::game::{
    apply_move, has_won, is_game_over, legal_directions, Board, Coord, Direction,
};
use merge2048::{DeterministicRng, GRID_SIZE};

/// Boards with tiles up to 2048 (exponent 0 = empty).
fn board_strategy() -> impl Strategy<Value = Board> {
    prop::array::uniform16(0u32..=11).prop_map(|exps| {
        let mut rows = [[0u32; GRID_SIZE]; GRID_SIZE];
        for (i, exp) in exps.iter().enumerate() {
            rows[i / GRID_SIZE][i % GRID_SIZE] = if *exp == 0 { 0 } else { 1 << exp };
        }
        Board::from_rows(rows).unwrap()
    })
}

/// Full boards built from a few small tiles, so equal neighbours are common
/// but not guaranteed.
fn full_board_strategy() -> impl Strategy<Value = Board> {
    prop::array::uniform16(1u32..=3).prop_map(|exps| {
        let mut rows = [[0u32; GRID_SIZE]; GRID_SIZE];
        for (i, exp) in exps.iter().enumerate() {
            rows[i / GRID_SIZE][i % GRID_SIZE] = 1 << exp;
        }
        Board::from_rows(rows).unwrap()
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    (0u8..4).prop_map(|i| Direction::from_index(i).unwrap())
}

proptest! {
    #[test]
    fn prop_move_is_deterministic(board in board_strategy(), dir in direction_strategy()) {
        prop_assert_eq!(apply_move(&board, dir), apply_move(&board, dir));
    }

    #[test]
    fn prop_merges_remove_one_tile_each(board in board_strategy(), dir in direction_strategy()) {
        let result = apply_move(&board, dir);

        prop_assert_eq!(
            result.new_board.tile_count(),
            board.tile_count() - result.merge_count()
        );
        prop_assert_eq!(result.new_board.tile_sum(), board.tile_sum());
    }

    #[test]
    fn prop_score_is_sum_of_merged_tiles(board in board_strategy(), dir in direction_strategy()) {
        let result = apply_move(&board, dir);
        let merged_sum: u32 = result
            .merged_cells
            .iter()
            .map(|c| result.new_board.get(*c))
            .sum();

        prop_assert_eq!(result.score_delta, merged_sum);
    }

    #[test]
    fn prop_only_merges_grow_tiles(board in board_strategy(), dir in direction_strategy()) {
        let result = apply_move(&board, dir);
        let old_max = board.max_tile();

        for coord in Coord::all() {
            let value = result.new_board.get(coord);
            if result.merged_cells.contains(&coord) {
                prop_assert!(value <= old_max * 2);
            } else {
                prop_assert!(value <= old_max);
            }
        }
    }

    #[test]
    fn prop_unchanged_means_identical(board in board_strategy(), dir in direction_strategy()) {
        let result = apply_move(&board, dir);

        if result.changed {
            prop_assert!(!result.movements.is_empty());
            prop_assert_ne!(result.new_board, board);
        } else {
            prop_assert_eq!(result.new_board, board);
            prop_assert_eq!(result.score_delta, 0);
            prop_assert!(result.movements.is_empty());
            prop_assert!(result.merged_cells.is_empty());

            // Fixed point: asking again changes nothing either
            prop_assert!(!apply_move(&result.new_board, dir).changed);
        }
    }

    #[test]
    fn prop_movements_are_consistent(board in board_strategy(), dir in direction_strategy()) {
        let result = apply_move(&board, dir);

        for m in &result.movements {
            prop_assert_ne!(m.from, m.to);
            prop_assert_eq!(board.get(m.from), m.value);
            prop_assert!(result.new_board.get(m.to) >= m.value);
            if dir.is_vertical() {
                prop_assert_eq!(m.from.col, m.to.col);
            } else {
                prop_assert_eq!(m.from.row, m.to.row);
            }
        }
    }

    #[test]
    fn prop_slide_back_without_merges(board in board_strategy()) {
        // Only boards already packed to the left and with no merge on the way
        // right come back unchanged.
        let packed = apply_move(&board, Direction::Left).new_board;
        let right = apply_move(&packed, Direction::Right);

        if !apply_move(&packed, Direction::Left).changed && right.merge_count() == 0 {
            let back = apply_move(&right.new_board, Direction::Left);
            prop_assert_eq!(back.new_board, packed);
            prop_assert_eq!(back.merge_count(), 0);
        }
    }

    #[test]
    fn prop_game_over_iff_no_legal_direction(board in full_board_strategy()) {
        prop_assert_eq!(is_game_over(&board), legal_directions(&board).is_empty());
    }

    #[test]
    fn prop_has_won_is_exact(board in board_strategy()) {
        let expected = Coord::all().any(|c| board.get(c) == 2048);
        prop_assert_eq!(has_won(&board), expected);
    }

    #[test]
    fn prop_spawn_fills_one_empty_cell(board in board_strategy(), seed in any::<u64>()) {
        let mut rng = DeterministicRng::new(seed);
        let mut after = board;

        match after.spawn_random_tile(&mut rng) {
            Some(tile) => {
                prop_assert_eq!(board.get(tile.coord), 0);
                prop_assert!(tile.value == 2 || tile.value == 4);
                prop_assert_eq!(after.tile_count(), board.tile_count() + 1);
                for coord in Coord::all().filter(|c| *c != tile.coord) {
                    prop_assert_eq!(after.get(coord), board.get(coord));
                }
            }
            None => {
                prop_assert_eq!(board.empty_count(), 0);
                prop_assert_eq!(after, board);
            }
        }
    }
}

#[test]
fn test_row_scenarios() {
    let cases: [([u32; 4], Direction, [u32; 4], u32); 3] = [
        ([2, 2, 2, 2], Direction::Left, [4, 4, 0, 0], 8),
        ([0, 0, 2, 2], Direction::Left, [4, 0, 0, 0], 4),
        ([2, 0, 0, 2], Direction::Right, [0, 0, 0, 4], 4),
    ];

    for (row, dir, expected, delta) in cases {
        for r in 0..GRID_SIZE {
            let mut rows = [[0u32; GRID_SIZE]; GRID_SIZE];
            rows[r] = row;
            let result = apply_move(&Board::from_rows(rows).unwrap(), dir);

            assert_eq!(result.new_board.rows()[r], expected, "row {} {:?} {}", r, row, dir);
            assert_eq!(result.score_delta, delta);
            assert!(result.changed);
        }
    }
}
