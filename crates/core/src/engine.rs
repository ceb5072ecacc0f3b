//! Match engine entry points.
//!
//! These are the pure board operations a driver calls: build a board, run one
//! tick, try a swap. [`crate::GameState`] wraps them with score and counters.

use crate::board::Board;
use crate::error::ConfigError;
use crate::gravity::{settle_step, GravityReport};
use crate::matcher::{clear_matches, MatchReport};
use crate::palette::Palette;
use crate::rng::SimpleRng;

pub use crate::swap::attempt_swap;

/// Result of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub matches: MatchReport,
    pub gravity: GravityReport,
}

impl TickReport {
    pub fn score_delta(&self) -> u32 {
        self.matches.score
    }

    /// True when the tick neither cleared nor moved anything
    pub fn is_idle(&self) -> bool {
        self.matches.is_empty() && self.gravity.is_idle()
    }
}

/// Build a `width x width` board of uniformly random candies.
///
/// The board may contain runs; the first ticks clear them.
pub fn init_board(width: usize, palette: &Palette, rng: &mut SimpleRng) -> Result<Board, ConfigError> {
    Board::random(width, palette, rng)
}

/// One tick: clear every run, then apply one gravity/refill step.
pub fn tick(board: &mut Board, palette: &Palette, rng: &mut SimpleRng) -> TickReport {
    let matches = clear_matches(board);
    let gravity = settle_step(board, palette, rng);
    TickReport { matches, gravity }
}
