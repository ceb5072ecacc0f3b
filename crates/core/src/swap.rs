//! Swap validation with rollback
//!
//! A swap is kept only when the swapped board contains at least one run.
//! Otherwise the two cells are exchanged back and the board is left exactly as
//! it was. Out-of-range, identical and non-adjacent indices never touch the board.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::matcher::{clear_matches, MatchReport};

/// Why a swap was not kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapRejection {
    /// An index is past the end of the board
    OutOfBounds,
    /// Both indices name the same cell
    SameCell,
    /// The cells do not share an edge
    NotAdjacent,
    /// The swap produced no run and was reverted
    NoMatch,
    /// The game is paused
    Paused,
}

impl SwapRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapRejection::OutOfBounds => "outOfBounds",
            SwapRejection::SameCell => "sameCell",
            SwapRejection::NotAdjacent => "notAdjacent",
            SwapRejection::NoMatch => "noMatch",
            SwapRejection::Paused => "paused",
        }
    }
}

/// Result of [`attempt_swap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap stands; the runs it produced are already cleared.
    Committed(MatchReport),
    /// Nothing changed.
    Rejected(SwapRejection),
}

impl SwapOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, SwapOutcome::Committed(_))
    }

    pub fn score_delta(&self) -> u32 {
        match self {
            SwapOutcome::Committed(report) => report.score,
            SwapOutcome::Rejected(_) => 0,
        }
    }

    pub fn rejection(&self) -> Option<SwapRejection> {
        match self {
            SwapOutcome::Committed(_) => None,
            SwapOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Two cells are adjacent when they differ by one column in the same row or
/// by one row in the same column.
pub fn is_adjacent(width: usize, a: usize, b: usize) -> bool {
    if width == 0 || a == b {
        return false;
    }
    let (ra, ca) = (a / width, a % width);
    let (rb, cb) = (b / width, b % width);
    (ra == rb && ca.abs_diff(cb) == 1) || (ca == cb && ra.abs_diff(rb) == 1)
}

/// In-bounds neighbors of `index` on a square board: up, down, left, right.
pub fn neighbors(width: usize, index: usize) -> ArrayVec<usize, 4> {
    let mut out = ArrayVec::new();
    let len = width * width;
    if index >= len {
        return out;
    }
    let (row, col) = (index / width, index % width);
    if row > 0 {
        out.push(index - width);
    }
    if row + 1 < width {
        out.push(index + width);
    }
    if col > 0 {
        out.push(index - 1);
    }
    if col + 1 < width {
        out.push(index + 1);
    }
    out
}

/// Swap `dragged` with `target`, keeping the swap only if it yields a match.
pub fn attempt_swap(board: &mut Board, dragged: usize, target: usize) -> SwapOutcome {
    if dragged >= board.len() || target >= board.len() {
        return SwapOutcome::Rejected(SwapRejection::OutOfBounds);
    }
    if dragged == target {
        return SwapOutcome::Rejected(SwapRejection::SameCell);
    }
    if !is_adjacent(board.width(), dragged, target) {
        return SwapOutcome::Rejected(SwapRejection::NotAdjacent);
    }

    board.swap(dragged, target);
    let report = clear_matches(board);
    if report.is_empty() {
        board.swap(dragged, target);
        return SwapOutcome::Rejected(SwapRejection::NoMatch);
    }
    SwapOutcome::Committed(report)
}

/// First swap (lowest dragged index, then target) that would produce a match.
///
/// Works on a scratch copy; `board` is not modified.
pub fn find_valid_swap(board: &Board) -> Option<(usize, usize)> {
    let w = board.width();
    let mut scratch = board.clone();
    for a in 0..board.len() {
        // Right and down cover every adjacent pair once.
        for b in [a + 1, a + w] {
            if b >= board.len() || !is_adjacent(w, a, b) {
                continue;
            }
            scratch.swap(a, b);
            let hit = crate::matcher::has_match(&scratch);
            scratch.swap(a, b);
            if hit {
                return Some((a, b));
            }
        }
    }
    None
}
