//! Game state module - owns one running match-3 game
//!
//! This module ties together the board, palette, RNG, drag tracking and score.
//! Drivers call [`GameState::tick`] on a fixed interval and feed swap requests
//! through [`GameState::attempt_swap`], the drag methods, or [`GameState::apply_action`].

use tracing::debug;

use crate::board::Board;
use crate::config::GameConfig;
use crate::drag::DragTracker;
use crate::engine::{self, TickReport};
use crate::error::ConfigError;
use crate::palette::Palette;
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::swap::{self, SwapOutcome, SwapRejection};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    palette: Palette,
    rng: SimpleRng,
    seed: u32,
    drag: DragTracker,
    /// Keyboard cursor, a flat cell index
    cursor: usize,
    score: u32,
    tick_count: u64,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    swaps_committed: u32,
    swaps_rejected: u32,
    /// Last clear/swap event (consumed by observers).
    last_event: Option<CoreLastEvent>,
    paused: bool,
}

impl GameState {
    /// Create a new game with a random board
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SimpleRng::new(config.seed);
        let board = engine::init_board(config.width, &config.palette, &mut rng)?;
        Ok(Self::assemble(board, config.palette.clone(), rng, config.seed))
    }

    /// Start from a prepared board (replays, tests, puzzles).
    pub fn from_board(board: Board, palette: Palette, seed: u32) -> Self {
        Self::assemble(board, palette, SimpleRng::new(seed), seed)
    }

    fn assemble(board: Board, palette: Palette, rng: SimpleRng, seed: u32) -> Self {
        Self {
            board,
            palette,
            rng,
            seed,
            drag: DragTracker::new(),
            cursor: 0,
            score: 0,
            tick_count: 0,
            episode_id: 0,
            swaps_committed: 0,
            swaps_rejected: 0,
            last_event: None,
            paused: false,
        }
    }

    /// Throw away the board and score and deal a new board of the same size.
    ///
    /// The RNG continues from its current state, so consecutive episodes differ.
    pub fn restart(&mut self) {
        self.seed = self.rng.state();
        for cell in self.board.cells_mut() {
            *cell = Some(self.palette.pick(&mut self.rng));
        }
        self.drag.cancel();
        self.cursor = 0;
        self.score = 0;
        self.tick_count = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.swaps_committed = 0;
        self.swaps_rejected = 0;
        self.last_event = None;
        self.paused = false;
        debug!(episode = self.episode_id, seed = self.seed, "game restarted");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn swaps_committed(&self) -> u32 {
        self.swaps_committed
    }

    pub fn swaps_rejected(&self) -> u32 {
        self.swaps_rejected
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cell currently picked up, if any
    pub fn held(&self) -> Option<usize> {
        self.drag.dragged()
    }

    /// Move the keyboard cursor. Returns false for an out-of-range index.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index >= self.board.len() {
            return false;
        }
        self.cursor = index;
        true
    }

    /// Main game tick - clear runs, then one gravity/refill step
    pub fn tick(&mut self) -> TickReport {
        if self.paused {
            return TickReport::default();
        }

        let report = engine::tick(&mut self.board, &self.palette, &mut self.rng);
        self.tick_count = self.tick_count.wrapping_add(1);
        self.score = self.score.saturating_add(report.score_delta());

        if !report.matches.is_empty() {
            self.last_event = Some(CoreLastEvent {
                kind: CoreEventKind::Cleared,
                runs: report.matches.runs.len() as u32,
                cells_cleared: report.matches.cells_cleared,
                score_delta: report.score_delta(),
            });
            debug!(
                tick = self.tick_count,
                runs = report.matches.runs.len(),
                score = self.score,
                "tick cleared runs"
            );
        }

        report
    }

    /// Swap two cells if doing so produces a match; otherwise leave the board untouched.
    pub fn attempt_swap(&mut self, dragged: usize, target: usize) -> SwapOutcome {
        let outcome = if self.paused {
            SwapOutcome::Rejected(SwapRejection::Paused)
        } else {
            swap::attempt_swap(&mut self.board, dragged, target)
        };

        match &outcome {
            SwapOutcome::Committed(report) => {
                self.swaps_committed = self.swaps_committed.wrapping_add(1);
                self.score = self.score.saturating_add(report.score);
                self.last_event = Some(CoreLastEvent {
                    kind: CoreEventKind::SwapCommitted,
                    runs: report.runs.len() as u32,
                    cells_cleared: report.cells_cleared,
                    score_delta: report.score,
                });
                debug!(dragged, target, delta = report.score, "swap committed");
            }
            SwapOutcome::Rejected(reason) => {
                self.swaps_rejected = self.swaps_rejected.wrapping_add(1);
                self.last_event = Some(CoreLastEvent {
                    kind: CoreEventKind::SwapRejected,
                    runs: 0,
                    cells_cleared: 0,
                    score_delta: 0,
                });
                debug!(dragged, target, reason = reason.as_str(), "swap rejected");
            }
        }

        outcome
    }

    pub fn drag_start(&mut self, index: usize) {
        self.drag.drag_start(index);
    }

    pub fn drag_drop(&mut self, index: usize) {
        self.drag.drag_drop(index);
    }

    /// Finish a drag. Returns the swap outcome when the drag named two cells.
    pub fn drag_end(&mut self) -> Option<SwapOutcome> {
        let (dragged, target) = self.drag.drag_end()?;
        Some(self.attempt_swap(dragged, target))
    }

    /// Apply a game action.
    ///
    /// Returns the swap outcome when the action completed a swap.
    pub fn apply_action(&mut self, action: GameAction) -> Option<SwapOutcome> {
        match action {
            GameAction::Pause => {
                self.paused = !self.paused;
                None
            }
            GameAction::Restart => {
                self.restart();
                None
            }
            _ if self.paused => None,
            GameAction::CursorUp => {
                self.move_cursor(-1, 0);
                None
            }
            GameAction::CursorDown => {
                self.move_cursor(1, 0);
                None
            }
            GameAction::CursorLeft => {
                self.move_cursor(0, -1);
                None
            }
            GameAction::CursorRight => {
                self.move_cursor(0, 1);
                None
            }
            GameAction::Select => {
                if self.drag.is_dragging() {
                    self.drag.drag_drop(self.cursor);
                    self.drag_end()
                } else {
                    self.drag.drag_start(self.cursor);
                    None
                }
            }
            GameAction::Cancel => {
                self.drag.cancel();
                None
            }
        }
    }

    /// Move the cursor, clamped to the board edges
    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let w = self.board.width();
        let max = (w - 1) as isize;
        let row = ((self.cursor / w) as isize + d_row).clamp(0, max) as usize;
        let col = ((self.cursor % w) as isize + d_col).clamp(0, max) as usize;
        self.cursor = row * w + col;
    }

    /// Take and clear the last clear/swap event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        self.board.write_codes(&mut out.cells);
        out.score = self.score;
        out.tick = self.tick_count;
        out.cursor = self.cursor;
        out.held = self.drag.dragged();
        out.paused = self.paused;
        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.swaps_committed = self.swaps_committed;
        out.swaps_rejected = self.swaps_rejected;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
