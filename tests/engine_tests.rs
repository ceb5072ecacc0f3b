//! Board, match detection, gravity and tick behaviour on an 8x8 board.

mod common;

use common::board_with;
use tui_crush::core::{
    clear_matches, find_runs, has_match, init_board, settle_step, tick, Board, Palette, SimpleRng,
};
use tui_crush::types::MatchKind;

#[test]
fn quiet_board_has_no_runs() {
    let board = board_with(&[]);
    assert!(!has_match(&board));
    assert!(find_runs(&board).is_empty());
}

#[test]
fn runs_never_wrap_across_rows() {
    // Cells 6 and 7 end row 0; cell 8 starts row 1.
    let board = board_with(&[(6, 'P'), (7, 'P'), (8, 'P')]);
    assert!(!has_match(&board));
    assert!(find_runs(&board).is_empty());
}

#[test]
fn row_of_three_is_cleared_and_scores_three() {
    let mut board = board_with(&[(3, 'P'), (4, 'P'), (5, 'P')]);
    let report = clear_matches(&mut board);
    assert_eq!(report.score, 3);
    assert_eq!(report.count(MatchKind::RowOfThree), 1);
    assert_eq!(report.cells_cleared, 3);
    for i in 3..=5 {
        assert_eq!(board.get(i), Some(None));
    }
    assert_eq!(board.empty_count(), 3);
}

#[test]
fn column_of_three_is_cleared() {
    let mut board = board_with(&[(2, 'P'), (10, 'P'), (18, 'P')]);
    let report = clear_matches(&mut board);
    assert_eq!(report.count(MatchKind::ColumnOfThree), 1);
    assert_eq!(report.score, 3);
    assert_eq!(board.empty_count(), 3);
}

#[test]
fn run_of_four_scores_four() {
    let mut board = board_with(&[(16, 'P'), (17, 'P'), (18, 'P'), (19, 'P')]);
    let report = clear_matches(&mut board);
    assert_eq!(report.runs.len(), 1);
    assert_eq!(report.runs[0].kind, MatchKind::RowOfFour);
    assert_eq!(report.score, 4);
    assert_eq!(report.cells_cleared, 4);
}

#[test]
fn crossing_runs_both_score_but_share_cleared_cell() {
    // Row 0 cells 0..=2 and column 0 cells 0, 8, 16.
    let mut board = board_with(&[(0, 'P'), (1, 'P'), (2, 'P'), (8, 'P'), (16, 'P')]);
    let report = clear_matches(&mut board);
    assert_eq!(report.count(MatchKind::RowOfThree), 1);
    assert_eq!(report.count(MatchKind::ColumnOfThree), 1);
    assert_eq!(report.score, 6);
    assert_eq!(report.cells_cleared, 5);
}

#[test]
fn clear_matches_is_a_no_op_without_runs() {
    let mut board = board_with(&[]);
    let before = board.clone();
    assert!(clear_matches(&mut board).is_empty());
    assert_eq!(board, before);
}

#[test]
fn empty_column_fills_within_height_steps() {
    let holes: Vec<(usize, char)> = (0..8).map(|r| (r * 8, '.')).collect();
    let mut board = board_with(&holes);
    let palette = Palette::classic();
    let mut rng = SimpleRng::new(3);

    for _ in 0..7 {
        settle_step(&mut board, &palette, &mut rng);
        assert!(board.has_empty());
    }
    settle_step(&mut board, &palette, &mut rng);
    assert!(!board.has_empty());
}

#[test]
fn settle_step_moves_each_candy_at_most_one_row() {
    // Hole at the bottom of column 3: the whole column above shifts down by
    // one and the top cell is refilled.
    let mut board = board_with(&[(59, '.')]);
    let col: Vec<_> = (0..8).map(|r| board.get(r * 8 + 3).flatten()).collect();
    let report = settle_step(&mut board, &Palette::classic(), &mut SimpleRng::new(1));
    assert_eq!(report.moved, 7);
    assert_eq!(report.refilled, 1);
    for r in 1..8 {
        assert_eq!(board.get(r * 8 + 3).flatten(), col[r - 1]);
    }
    assert!(!board.has_empty());
}

#[test]
fn repeated_ticks_converge_to_a_full_quiet_board() {
    let palette = Palette::classic();
    let mut rng = SimpleRng::new(2024);
    let mut board = init_board(8, &palette, &mut rng).unwrap();

    let mut ticks = 0;
    while !tick(&mut board, &palette, &mut rng).is_idle() {
        ticks += 1;
        assert!(ticks < 10_000, "board never settled");
    }
    assert!(!board.has_empty());
    assert!(!has_match(&board));
}

#[test]
fn init_board_respects_width_bounds() {
    let palette = Palette::classic();
    let mut rng = SimpleRng::new(1);
    assert!(init_board(2, &palette, &mut rng).is_err());
    assert!(init_board(33, &palette, &mut rng).is_err());
    let board = init_board(12, &palette, &mut rng).unwrap();
    assert_eq!(board.len(), 144);
    assert!(!board.has_empty());
}

#[test]
fn board_display_round_trips_through_rows() {
    let board = Board::from_rows(&["RGB", "Y.P", "OOO"]).unwrap();
    let rows = board.to_rows();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    assert_eq!(Board::from_rows(&refs).unwrap(), board);
}
