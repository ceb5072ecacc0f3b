//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board is drawn into a plain
//! framebuffer which is then diffed and flushed to the terminal. No widget
//! toolkit is involved, which keeps frame output predictable and lets board
//! cells be drawn two columns wide to compensate for glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_crush_core as core;
pub use tui_crush_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AdapterStatusView, AnchorY, GameView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
