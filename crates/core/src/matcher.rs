//! Match detection - finds and clears runs of identical candies
//!
//! A run is a maximal line of three or more identical non-empty cells inside a
//! single row or a single column. Rows are scanned cell by cell within their own
//! bounds, so a run can never wrap from the last column into the next row.
//!
//! Clearing policy:
//! - all runs are found on the board as it was before the pass, then cleared;
//! - a run of three scores 3, a run of four or longer scores 4 and is cleared whole;
//! - a row run and a column run sharing cells are scored independently.
//!
//! Runs are reported rows-of-three, rows-of-four, columns-of-three,
//! columns-of-four, each group by ascending start index.

use crate::board::Board;
use crate::types::{CandyKind, MatchKind, MIN_RUN};

/// One detected run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub kind: MatchKind,
    /// Flat index of the top-most / left-most cell
    pub start: usize,
    pub len: usize,
    pub candy: CandyKind,
}

impl Run {
    /// Flat indices covered by this run
    pub fn cells(&self, width: usize) -> impl Iterator<Item = usize> {
        let step = if self.kind.is_row() { 1 } else { width };
        let start = self.start;
        (0..self.len).map(move |k| start + k * step)
    }

    pub fn score(&self) -> u32 {
        self.kind.score()
    }
}

/// Result of one clearing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub runs: Vec<Run>,
    pub score: u32,
    /// Distinct cells emptied (shared cells count once)
    pub cells_cleared: u32,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn count(&self, kind: MatchKind) -> usize {
        self.runs.iter().filter(|r| r.kind == kind).count()
    }
}

/// Find every run on the board without modifying it
pub fn find_runs(board: &Board) -> Vec<Run> {
    let mut runs = Vec::new();
    let w = board.width();

    for row in 0..board.height() {
        scan_line(board, row * w, 1, w, true, &mut runs);
    }
    for col in 0..w {
        scan_line(board, col, w, board.height(), false, &mut runs);
    }

    runs.sort_by_key(|r| (r.kind, r.start));
    runs
}

/// Check whether any run exists
pub fn has_match(board: &Board) -> bool {
    let w = board.width();
    let cells = board.cells();

    let row_hit = (0..board.height()).any(|row| {
        let line = &cells[row * w..(row + 1) * w];
        line.windows(MIN_RUN)
            .any(|win| win[0].is_some() && win.iter().all(|c| *c == win[0]))
    });
    if row_hit {
        return true;
    }

    (0..w).any(|col| {
        (0..=board.height() - MIN_RUN).any(|row| {
            let first = cells[row * w + col];
            first.is_some() && (1..MIN_RUN).all(|k| cells[(row + k) * w + col] == first)
        })
    })
}

/// Find every run, empty its cells and report the score
pub fn clear_matches(board: &mut Board) -> MatchReport {
    let runs = find_runs(board);
    if runs.is_empty() {
        return MatchReport::default();
    }

    let w = board.width();
    let mut score = 0;
    let mut cells_cleared = 0;
    let cells = board.cells_mut();
    for run in &runs {
        score += run.score();
        for idx in run.cells(w) {
            if cells[idx].take().is_some() {
                cells_cleared += 1;
            }
        }
    }

    MatchReport {
        runs,
        score,
        cells_cleared,
    }
}

/// Scan `count` cells starting at `first`, `step` apart, for maximal runs.
fn scan_line(board: &Board, first: usize, step: usize, count: usize, is_row: bool, out: &mut Vec<Run>) {
    let cells = board.cells();
    let mut k = 0;
    while k < count {
        let Some(candy) = cells[first + k * step] else {
            k += 1;
            continue;
        };

        let start = k;
        k += 1;
        while k < count && cells[first + k * step] == Some(candy) {
            k += 1;
        }

        if let Some(kind) = MatchKind::classify(is_row, k - start) {
            out.push(Run {
                kind,
                start: first + start * step,
                len: k - start,
                candy,
            });
        }
    }
}
