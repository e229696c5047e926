//! Configuration for a game session

use serde::Deserialize;

use crate::board::check_dimensions;
use crate::error::{EngineError, Result};
use crate::types::{
    BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS,
    LINES_PER_LEVEL, LINE_SCORES, SPECIAL_PIECE_CHANCE,
};

/// Board size, progression and randomness of a session
///
/// Deserializes from partial documents; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board width in cells
    pub width: u8,

    /// Board height in cells
    pub height: u8,

    /// Drop interval of a new game (in milliseconds)
    pub initial_drop_interval_ms: u32,

    /// Interval decrease per level up (in milliseconds)
    pub drop_interval_step_ms: u32,

    /// Interval floor (in milliseconds)
    pub min_drop_interval_ms: u32,

    /// Lines per level
    pub lines_per_level: u32,

    /// Points for clearing 0..=4 lines at level 1
    pub line_scores: [u32; 5],

    /// Probability (0.0 - 1.0) that a spawned piece is special; 0 disables them
    pub special_chance: f64,

    /// Piece sequence seed (random if None)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            initial_drop_interval_ms: BASE_DROP_MS,
            drop_interval_step_ms: DROP_INTERVAL_STEP_MS,
            min_drop_interval_ms: DROP_INTERVAL_MIN_MS,
            lines_per_level: LINES_PER_LEVEL,
            line_scores: LINE_SCORES,
            special_chance: SPECIAL_PIECE_CHANCE,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board dimensions
    pub fn with_board_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the starting drop interval in milliseconds
    pub fn with_initial_drop_interval_ms(mut self, interval_ms: u32) -> Self {
        self.initial_drop_interval_ms = interval_ms;
        self
    }

    /// Set the per-level interval step and floor in milliseconds
    pub fn with_drop_interval_step(mut self, step_ms: u32, floor_ms: u32) -> Self {
        self.drop_interval_step_ms = step_ms;
        self.min_drop_interval_ms = floor_ms;
        self
    }

    /// Set the number of lines per level
    pub fn with_lines_per_level(mut self, lines: u32) -> Self {
        self.lines_per_level = lines;
        self
    }

    /// Set the line clear scoring table
    pub fn with_line_scores(mut self, scores: [u32; 5]) -> Self {
        self.line_scores = scores;
        self
    }

    /// Set the special piece probability (0.0 - 1.0)
    pub fn with_special_chance(mut self, chance: f64) -> Self {
        self.special_chance = chance;
        self
    }

    /// Set the piece sequence seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that a session can be built from this configuration
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        if !(0.0..=1.0).contains(&self.special_chance) {
            return Err(EngineError::InvalidSpecialChance(self.special_chance));
        }
        if self.lines_per_level == 0 {
            return Err(EngineError::ZeroLinesPerLevel);
        }
        if self.initial_drop_interval_ms < self.min_drop_interval_ms {
            return Err(EngineError::DropIntervalBelowFloor {
                initial_ms: self.initial_drop_interval_ms,
                floor_ms: self.min_drop_interval_ms,
            });
        }
        Ok(())
    }
}
