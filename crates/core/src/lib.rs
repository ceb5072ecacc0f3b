//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the match-3 rules, state management, and simulation logic.
//! It has **no dependencies** on UI, networking, or terminal I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Every rule is a plain function over a [`Board`]
//! - **Portable**: Can be driven by a terminal, a socket, or a test harness
//!
//! # Module Structure
//!
//! - [`board`]: square grid stored as a flat row-major vector
//! - [`matcher`]: row/column run detection and clearing
//! - [`gravity`]: single-step fall and top-row refill
//! - [`swap`]: adjacency rules and swap-with-rollback
//! - [`drag`]: drag-start / drag-drop / drag-end resolution
//! - [`engine`]: `init_board` and `tick` entry points
//! - [`game_state`]: board + score + counters owned by one game
//! - [`palette`] and [`rng`]: seeded candy generation
//! - [`config`]: environment-driven configuration
//!
//! # Game Rules
//!
//! - **Runs**: three or four identical candies in a row or column; a run of three
//!   scores 3, a run of four (or longer) scores 4
//! - **Swaps**: only between edge-adjacent cells, and only kept if they create a run
//! - **Gravity**: every tick, candies fall at most one row and the top row refills
//! - **No game over**: play continues until the driver stops ticking
//!
//! # Example
//!
//! ```
//! use tui_crush_core::{Board, GameState, Palette};
//!
//! // Row 0 becomes R R R once cell 1 and cell 4 trade places.
//! let board = Board::from_rows(&["RGR", "GRY", "BYG"]).unwrap();
//! let mut game = GameState::from_board(board, Palette::classic(), 1);
//!
//! let outcome = game.attempt_swap(1, 4);
//! assert!(outcome.is_committed());
//! assert_eq!(game.score(), 3);
//!
//! // The cleared cells fill back in over the next ticks.
//! game.tick();
//! ```
//!
//! # Timing
//!
//! The engine has no clock. Call [`GameState::tick`](game_state::GameState::tick)
//! every [`TICK_MS`](tui_crush_types::TICK_MS) milliseconds from the driver loop.

pub mod board;
pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod gravity;
pub mod matcher;
pub mod palette;
pub mod rng;
pub mod snapshot;
pub mod swap;

pub use tui_crush_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use drag::DragTracker;
pub use engine::{attempt_swap, init_board, tick, TickReport};
pub use error::ConfigError;
pub use game_state::GameState;
pub use gravity::{settle_step, GravityReport};
pub use matcher::{clear_matches, find_runs, has_match, MatchReport, Run};
pub use palette::Palette;
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
pub use swap::{find_valid_swap, is_adjacent, neighbors, SwapOutcome, SwapRejection};
