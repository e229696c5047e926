//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management and simulation logic.
//! It has no dependency on rendering, input devices or wall-clock time, so it can
//! run in a terminal, a browser bridge or a headless simulator alike.
//!
//! # Module Structure
//!
//! - [`board`]: 12x20 (configurable) grid with collision detection and row sweeping
//! - [`game_state`]: the session: active piece, commands, timing, scoring
//! - [`pieces`]: tetromino matrices, rotation and horizontal wall kicks
//! - [`rng`]: seeded uniform piece selection with special pieces
//! - [`scoring`]: line clear points and level/speed progression
//! - [`config`]: session configuration and validation
//! - [`snapshot`]: serializable views for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each spawn picks one of the seven kinds at random
//! - **Matrix rotation**: transpose based, with kicks of 0, +1, -1, +2, ... columns
//! - **Instant lock**: a piece locks on the first drop that cannot move it down
//! - **Scoring**: 0/100/300/500/800 points for 0-4 lines, multiplied by the level
//! - **Progression**: one level per 10 lines, each level 50ms faster down to 100ms
//! - **Special pieces**: an occasional piece is drawn in the special colour
//!
//! # Example
//!
//! ```
//! use arcade_tetris_core::{EngineConfig, GameState};
//! use arcade_tetris_core::types::GameAction;
//!
//! # fn main() -> arcade_tetris_core::Result<()> {
//! let mut game = GameState::new(EngineConfig::new().with_seed(12345))?;
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::SoftDrop);
//!
//! assert_eq!(game.score(), 0);
//! assert!(!game.is_game_over());
//! # Ok(())
//! # }
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Once the accumulated time exceeds the drop interval
//! (1000ms at level 1) the active piece drops one row.

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use arcade_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use game_state::{GameState, Piece, MAX_PENDING_EVENTS};
pub use pieces::{get_shape, kick_offsets, try_rotate, PieceMatrix};
pub use rng::{PieceDraw, PieceSource};
pub use scoring::{calculate_line_score, next_drop_interval_ms, should_level_up};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
