//! TUI Crush (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_crush::{core,adapter,term,input,types}`
//! and holds the game-loop glue shared by the binary and the integration tests.

pub mod bridge;

pub use tui_crush_adapter as adapter;
pub use tui_crush_core as core;
pub use tui_crush_input as input;
pub use tui_crush_term as term;
pub use tui_crush_types as types;
