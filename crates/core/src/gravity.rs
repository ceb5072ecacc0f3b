//! Gravity and refill - one settling step per tick
//!
//! Each column is walked bottom to top once. An empty cell pulls the value
//! directly above it down one row, leaving the upper cell empty. Afterwards
//! any empty cell in the top row gets a fresh random candy. Nothing moves more
//! than one row per step; repeated steps converge to a full board.

use crate::board::Board;
use crate::palette::Palette;
use crate::rng::SimpleRng;

/// What one settling step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityReport {
    /// Candies that fell one row
    pub moved: u32,
    /// Top-row cells that received a new candy
    pub refilled: u32,
}

impl GravityReport {
    pub fn is_idle(&self) -> bool {
        self.moved == 0 && self.refilled == 0
    }
}

/// Apply a single gravity pass followed by a top-row refill
pub fn settle_step(board: &mut Board, palette: &Palette, rng: &mut SimpleRng) -> GravityReport {
    let w = board.width();
    let h = board.height();
    let mut report = GravityReport::default();
    let cells = board.cells_mut();

    for col in 0..w {
        for row in (1..h).rev() {
            let below = row * w + col;
            let above = below - w;
            if cells[below].is_none() && cells[above].is_some() {
                cells[below] = cells[above].take();
                report.moved += 1;
            }
        }
    }

    for cell in cells[..w].iter_mut() {
        if cell.is_none() {
            *cell = Some(palette.pick(rng));
            report.refilled += 1;
        }
    }

    report
}
