//! Error types for engine construction

use thiserror::Error;

use crate::types::{MAX_BOARD_DIM, MIN_BOARD_DIM};

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while building a board or a game from configuration
///
/// Gameplay commands never fail: blocked moves and rotations are no-ops and
/// game over is a state, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Board side outside the supported range
    #[error(
        "invalid board dimensions {width}x{height}: each side must be within {}..={}",
        MIN_BOARD_DIM,
        MAX_BOARD_DIM
    )]
    InvalidDimensions { width: u8, height: u8 },

    /// A prepared board row has the wrong length
    #[error("board row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Special piece probability is not a probability
    #[error("special piece chance must be within 0.0..=1.0, got {0}")]
    InvalidSpecialChance(f64),

    /// Levels would never advance
    #[error("lines per level must be greater than zero")]
    ZeroLinesPerLevel,

    /// Starting interval is already below the floor
    #[error("initial drop interval {initial_ms}ms is below the {floor_ms}ms floor")]
    DropIntervalBelowFloor { initial_ms: u32, floor_ms: u32 },
}
