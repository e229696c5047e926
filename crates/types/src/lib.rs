//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond parsing and conversion, making
//! them usable in any context (core logic, a renderer, a simulation driver).
//!
//! # Board Dimensions
//!
//! Reference playfield dimensions:
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: y = 0, x = `width / 2 - size / 2`
//!
//! # Progression Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Drop interval of a new game |
//! | `DROP_INTERVAL_STEP_MS` | 50 | Interval decrease per level up |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Interval floor |
//! | `LINES_PER_LEVEL` | 10 | Level `n` ends after `n * 10` lines |
//!
//! # Examples
//!
//! ```
//! use arcade_tetris_types::{CellKind, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Regular pieces paint their own colour slot
//! assert_eq!(PieceKind::T.cell_kind(), CellKind::T);
//! assert_eq!(CellKind::Special.id(), 8);
//!
//! // Parse game action
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Smallest accepted board side (the I piece must fit horizontally)
pub const MIN_BOARD_DIM: u8 = 4;

/// Largest accepted board side
pub const MAX_BOARD_DIM: u8 = 100;

/// Largest piece matrix side (the I piece)
pub const MAX_PIECE_SIZE: usize = 4;

/// Drop interval of a fresh game (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Drop interval decrease applied on each level up
pub const DROP_INTERVAL_STEP_MS: u32 = 50;

/// Drop interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines per level; level `n` is left once `n * LINES_PER_LEVEL` lines are cleared
pub const LINES_PER_LEVEL: u32 = 10;

/// Starting level of a new game
pub const START_LEVEL: u32 = 1;

/// Chance that a spawned piece is a special (recoloured) piece
pub const SPECIAL_PIECE_CHANCE: f64 = 0.10;

/// Nominal frame time used by the simulation driver (≈60 FPS)
pub const FRAME_MS: u32 = 16;

/// Line clear scoring table
///
/// Base points for clearing N lines in a single sweep:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven tetromino piece kinds
///
/// Catalog order follows the colour-slot ids: T, J, L, O, S, Z, I.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    T,
    J,
    L,
    O,
    S,
    Z,
    I,
}

impl PieceKind {
    /// Every piece kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::I,
    ];

    /// Cell kind written by a regular (non-special) piece of this kind
    pub fn cell_kind(&self) -> CellKind {
        match self {
            PieceKind::T => CellKind::T,
            PieceKind::J => CellKind::J,
            PieceKind::L => CellKind::L,
            PieceKind::O => CellKind::O,
            PieceKind::S => CellKind::S,
            PieceKind::Z => CellKind::Z,
            PieceKind::I => CellKind::I,
        }
    }
}

/// Content of a board or piece-matrix cell
///
/// The numeric ids are the renderer's colour slots: 0 is empty, 1-7 are the
/// catalog shapes and 8 marks cells of a special piece. Colours themselves are
/// owned by whoever draws the board. Serialized as the bare id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Empty = 0,
    T = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    Z = 6,
    I = 7,
    Special = 8,
}

impl CellKind {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellKind::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    /// Numeric colour slot of this kind
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Inverse of [`CellKind::id`]
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(CellKind::Empty),
            1 => Some(CellKind::T),
            2 => Some(CellKind::J),
            3 => Some(CellKind::L),
            4 => Some(CellKind::O),
            5 => Some(CellKind::S),
            6 => Some(CellKind::Z),
            7 => Some(CellKind::I),
            8 => Some(CellKind::Special),
            _ => None,
        }
    }
}

impl From<CellKind> for u8 {
    fn from(value: CellKind) -> Self {
        value.id()
    }
}

impl TryFrom<u8> for CellKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CellKind::from_id(value).ok_or_else(|| format!("unknown cell kind id {value}"))
    }
}

/// Rotation direction of a piece matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDir {
    Clockwise,
    CounterClockwise,
}

/// Commands an input collaborator can send to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// One manual drop step (locks the piece if it cannot fall)
    SoftDrop,
    /// Start a new game
    Reset,
}

impl GameAction {
    /// Parse action from string (case-insensitive, camelCase names)
    ///
    /// # Examples
    ///
    /// ```
    /// use arcade_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveRight"), Some(GameAction::MoveRight));
    /// assert_eq!(GameAction::from_str("softdrop"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdrop" => Some(GameAction::SoftDrop),
            "reset" | "newgame" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDrop => "softDrop",
            GameAction::Reset => "reset",
        }
    }
}

/// Session lifecycle
///
/// `GameOver` is entered only when a freshly spawned piece collides and is left
/// only through an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Active,
    GameOver,
}

/// Notifications queued by the engine for score/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// The active piece was merged into the board
    PieceLocked { kind: PieceKind, special: bool },
    /// A sweep removed `count` rows and awarded `points`
    LinesCleared { count: u32, points: u32 },
    /// The level went up and the drop interval was recomputed
    LevelUp { level: u32, drop_interval_ms: u32 },
    /// A spawned piece collided; the session is over
    GameOver { score: u32 },
}
