//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and turns mouse
//! presses and releases into the drag-start / drag-drop / drag-end sequence
//! the engine resolves into swaps.

pub mod handler;
pub mod map;

pub use tui_crush_types as types;

pub use handler::{PointerEvent, PointerHandler};
pub use map::{handle_key_event, should_quit};
