//! Read-only views of a session for renderers and serialization

use serde::Serialize;

use crate::game_state::Piece;
use crate::types::{CellKind, GameStatus, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    /// Current orientation, top row first
    pub matrix: Vec<Vec<CellKind>>,
    pub x: i8,
    pub y: i8,
    pub special: bool,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix.rows().map(<[CellKind]>::to_vec).collect(),
            x: value.x,
            y: value.y,
            special: value.special,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Locked cells, top row first; the active piece is not merged in
    pub board: Vec<Vec<CellKind>>,
    pub active: ActiveSnapshot,
    pub status: GameStatus,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub pieces_spawned: u32,
    pub seed: u64,
}

impl GameSnapshot {
    /// Board with the active piece drawn in, for display
    ///
    /// Active cells outside the grid are skipped.
    pub fn composed_board(&self) -> Vec<Vec<CellKind>> {
        let mut rows = self.board.clone();
        for (dy, row) in self.active.matrix.iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let x = self.active.x as isize + dx as isize;
                let y = self.active.y as isize + dy as isize;
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(slot) = rows
                    .get_mut(y as usize)
                    .and_then(|r| r.get_mut(x as usize))
                {
                    *slot = cell;
                }
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::game_state::GameState;

    #[test]
    fn test_composed_board_draws_active_piece() {
        let game = GameState::new(EngineConfig::new().with_seed(3).with_special_chance(0.0)).unwrap();
        let snap = game.snapshot();
        let composed = snap.composed_board();

        let drawn = composed.iter().flatten().filter(|c| c.is_occupied()).count();
        assert_eq!(drawn, 4);
        assert!(snap.board.iter().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_snapshot_serializes_cells_as_ids() {
        let game = GameState::new(EngineConfig::new().with_seed(3).with_board_size(4, 4)).unwrap();
        let json = serde_json::to_value(game.snapshot()).unwrap();

        assert_eq!(json["width"], 4);
        assert_eq!(json["board"][0], serde_json::json!([0, 0, 0, 0]));
        assert_eq!(json["status"], "Active");
        assert_eq!(json["seed"], 3);
    }
}
