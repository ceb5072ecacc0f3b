//! Construction and configuration errors.
//!
//! Gameplay itself never fails: rejected swaps are ordinary outcomes. These
//! errors only surface while building a board, a palette or a config.

/// Errors that can occur when building a board or loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board width {0} is out of range (3..=32)")]
    InvalidWidth(usize),

    #[error("board needs {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown cell '{ch}' at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("unknown color letter '{0}'")]
    InvalidColor(char),

    #[error("color '{0}' appears more than once in the palette")]
    DuplicateColor(char),

    #[error("tick interval must be > 0 ms")]
    ZeroTick,

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}
