#![allow(dead_code)]

use tui_crush::core::Board;

/// Letters for an 8x8 board with no two equal neighbours in any row or column.
pub fn quiet_rows() -> Vec<String> {
    const LETTERS: [char; 4] = ['R', 'G', 'B', 'Y'];
    (0..8)
        .map(|r| (0..8).map(|c| LETTERS[(r + 2 * c) % 4]).collect())
        .collect()
}

/// The quiet board with selected flat indices overwritten.
pub fn board_with(overrides: &[(usize, char)]) -> Board {
    let mut rows: Vec<Vec<char>> = quiet_rows().iter().map(|r| r.chars().collect()).collect();
    for &(index, ch) in overrides {
        rows[index / 8][index % 8] = ch;
    }
    let rows: Vec<String> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    Board::from_rows(&refs).unwrap()
}
