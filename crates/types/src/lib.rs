//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, adapter protocol).
//!
//! # Board Dimensions
//!
//! The board is always square and stored row-major:
//!
//! - **Width**: 8 columns by default (`BOARD_WIDTH`)
//! - **Height**: equal to the width
//! - **Index**: `i = row * width + col`, so `(row, col) = (i / width, i % width)`
//!
//! # Game Timing and Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Fixed interval between match/gravity passes |
//! | `SCORE_THREE` | 3 | Points for a run of three |
//! | `SCORE_FOUR` | 4 | Points for a run of four (or longer) |
//! | `STATIC_RENDER_INTERVAL_MS` | 250 | Redraw cadence for an unchanged frame |
//!
//! # Examples
//!
//! ```
//! use tui_crush_types::{CandyKind, GameAction, MatchKind, BOARD_WIDTH};
//!
//! // Parse a candy from its board letter (case-insensitive)
//! assert_eq!(CandyKind::from_char('r'), Some(CandyKind::Red));
//!
//! // Parse a game action
//! assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
//!
//! // Match kinds carry their score
//! assert_eq!(MatchKind::RowOfFour.score(), 4);
//!
//! assert_eq!(BOARD_WIDTH, 8);
//! ```

/// Default board width in cells (8 columns, 8 rows)
pub const BOARD_WIDTH: u8 = 8;

/// Smallest board that can hold a run of three
pub const MIN_BOARD_WIDTH: u8 = 3;

/// Largest supported board width
pub const MAX_BOARD_WIDTH: u8 = 32;

/// Fixed tick interval in milliseconds
pub const TICK_MS: u32 = 100;

/// Points awarded for a run of three
pub const SCORE_THREE: u32 = 3;

/// Points awarded for a run of four or longer
pub const SCORE_FOUR: u32 = 4;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Number of distinct candy kinds
pub const CANDY_KINDS: usize = 6;

/// Redraw cadence when nothing on screen changed
pub const STATIC_RENDER_INTERVAL_MS: u64 = 250;


/// The six candy kinds
///
/// Each kind has a board letter used by text boards and the adapter:
/// - **Red**: `R`
/// - **Orange**: `O`
/// - **Yellow**: `Y`
/// - **Green**: `G`
/// - **Blue**: `B`
/// - **Purple**: `P`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandyKind {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl CandyKind {
    /// Every kind, in code order.
    pub const ALL: [CandyKind; CANDY_KINDS] = [
        CandyKind::Red,
        CandyKind::Orange,
        CandyKind::Yellow,
        CandyKind::Green,
        CandyKind::Blue,
        CandyKind::Purple,
    ];

    /// Parse candy kind from its board letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_crush_types::CandyKind;
    ///
    /// assert_eq!(CandyKind::from_char('B'), Some(CandyKind::Blue));
    /// assert_eq!(CandyKind::from_char('p'), Some(CandyKind::Purple));
    /// assert_eq!(CandyKind::from_char('.'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(CandyKind::Red),
            'o' => Some(CandyKind::Orange),
            'y' => Some(CandyKind::Yellow),
            'g' => Some(CandyKind::Green),
            'b' => Some(CandyKind::Blue),
            'p' => Some(CandyKind::Purple),
            _ => None,
        }
    }

    /// Uppercase board letter
    pub fn as_char(&self) -> char {
        match self {
            CandyKind::Red => 'R',
            CandyKind::Orange => 'O',
            CandyKind::Yellow => 'Y',
            CandyKind::Green => 'G',
            CandyKind::Blue => 'B',
            CandyKind::Purple => 'P',
        }
    }

    /// Parse candy kind from its name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(CandyKind::Red),
            "orange" => Some(CandyKind::Orange),
            "yellow" => Some(CandyKind::Yellow),
            "green" => Some(CandyKind::Green),
            "blue" => Some(CandyKind::Blue),
            "purple" => Some(CandyKind::Purple),
            _ => None,
        }
    }

    /// Convert to lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CandyKind::Red => "red",
            CandyKind::Orange => "orange",
            CandyKind::Yellow => "yellow",
            CandyKind::Green => "green",
            CandyKind::Blue => "blue",
            CandyKind::Purple => "purple",
        }
    }

    /// Compact non-zero code used by snapshots (1..=6)
    pub fn code(&self) -> u8 {
        match self {
            CandyKind::Red => 1,
            CandyKind::Orange => 2,
            CandyKind::Yellow => 3,
            CandyKind::Green => 4,
            CandyKind::Blue => 5,
            CandyKind::Purple => 6,
        }
    }

    /// Inverse of [`CandyKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=6 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell (cleared by a match, waiting for gravity/refill)
/// - `Some(CandyKind)`: Cell holding a candy
pub type Cell = Option<CandyKind>;

/// Snapshot code for a cell (0 = empty).
#[inline]
pub fn cell_code(cell: Cell) -> u8 {
    cell.map(|k| k.code()).unwrap_or(0)
}

/// Inverse of [`cell_code`]. Unknown codes read as empty.
#[inline]
pub fn cell_from_code(code: u8) -> Cell {
    CandyKind::from_code(code)
}

/// Game actions that can be applied to modify game state
///
/// These actions are used by both keyboard input and the adapter.
/// Swaps themselves travel as cell indices, not actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the keyboard cursor one row up
    CursorUp,
    /// Move the keyboard cursor one row down
    CursorDown,
    /// Move the keyboard cursor one column left
    CursorLeft,
    /// Move the keyboard cursor one column right
    CursorRight,
    /// Pick up the cell under the cursor, or drop onto it when holding one
    Select,
    /// Drop whatever is held without swapping
    Cancel,
    /// Toggle pause state
    Pause,
    /// Start a new game with a fresh board
    Restart,
}

impl GameAction {
    /// Parse action from string (for the adapter protocol)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_crush_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("RESTART"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "cancel" => Some(GameAction::Cancel),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string for the adapter protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Cancel => "cancel",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Kind of run found by the match detector
///
/// Runs longer than four are reported (and scored) as fours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchKind {
    RowOfThree,
    RowOfFour,
    ColumnOfThree,
    ColumnOfFour,
}

impl MatchKind {
    /// Classify a run by direction and length. Returns `None` below three.
    pub fn classify(is_row: bool, len: usize) -> Option<Self> {
        match (is_row, len) {
            (_, 0..=2) => None,
            (true, 3) => Some(MatchKind::RowOfThree),
            (true, _) => Some(MatchKind::RowOfFour),
            (false, 3) => Some(MatchKind::ColumnOfThree),
            (false, _) => Some(MatchKind::ColumnOfFour),
        }
    }

    /// Points awarded for this run
    pub fn score(&self) -> u32 {
        match self {
            MatchKind::RowOfThree | MatchKind::ColumnOfThree => SCORE_THREE,
            MatchKind::RowOfFour | MatchKind::ColumnOfFour => SCORE_FOUR,
        }
    }

    pub fn is_row(&self) -> bool {
        matches!(self, MatchKind::RowOfThree | MatchKind::RowOfFour)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::RowOfThree => "rowOfThree",
            MatchKind::RowOfFour => "rowOfFour",
            MatchKind::ColumnOfThree => "columnOfThree",
            MatchKind::ColumnOfFour => "columnOfFour",
        }
    }
}

/// What produced a [`CoreLastEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEventKind {
    /// A tick cleared one or more runs
    Cleared,
    /// A swap produced a match and was kept
    SwapCommitted,
    /// A swap was rejected or reverted
    SwapRejected,
}

impl CoreEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreEventKind::Cleared => "cleared",
            CoreEventKind::SwapCommitted => "swapCommitted",
            CoreEventKind::SwapRejected => "swapRejected",
        }
    }
}

/// Core-side event emitted after a clearing tick or a swap attempt.
///
/// This is engine-internal and can be mapped to adapter protocol `last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLastEvent {
    pub kind: CoreEventKind,
    pub runs: u32,
    pub cells_cleared: u32,
    pub score_delta: u32,
}
