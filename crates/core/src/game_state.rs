//! Game state module - manages the complete game session
//!
//! This module ties together the board, the piece catalog, the piece source and
//! scoring. It owns the single active piece and implements the commands an input
//! collaborator sends (move, rotate, drop, reset) plus the frame tick that drives
//! the automatic fall.
//!
//! Every command leaves the active piece in a non-colliding position. Commands
//! that cannot be carried out are no-ops and report `false`; nothing here fails.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::pieces::{get_shape, spawn_x, try_rotate, PieceMatrix, SPAWN_Y};
use crate::rng::{PieceDraw, PieceSource};
use crate::scoring::{calculate_line_score, next_drop_interval_ms, should_level_up};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Undrained events kept before the oldest are discarded
pub const MAX_PENDING_EVENTS: usize = 64;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Current orientation; cells are recoloured when `special` is set
    pub matrix: PieceMatrix,
    pub x: i8,
    pub y: i8,
    /// Cosmetic flag, changes only the cell kind written to the board
    pub special: bool,
}

impl Piece {
    /// Create a piece at the spawn position of a board `board_width` wide
    pub fn spawn(kind: PieceKind, special: bool, board_width: u8) -> Self {
        let shape = get_shape(kind);
        let matrix = if special { shape.to_special() } else { shape };
        Self {
            kind,
            matrix,
            x: spawn_x(board_width, matrix.size()),
            y: SPAWN_Y,
            special,
        }
    }

    /// Check if any occupied cell overlaps the board or its walls
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.matrix, self.x, self.y)
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Piece,
    pieces: PieceSource,
    status: GameStatus,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Time accumulated towards the next automatic drop
    drop_counter_ms: u32,
    /// Number of pieces spawned this game
    pieces_spawned: u32,
    /// Pending notifications, oldest first, at most `MAX_PENDING_EVENTS`
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on an empty board and spawn the first piece
    pub fn new(config: EngineConfig) -> Result<Self> {
        let board = Board::new(config.width, config.height)?;
        Self::from_board(config, board)
    }

    /// Create a new game on a prepared board and spawn the first piece
    ///
    /// The board's own dimensions replace the configured ones. If the first piece
    /// does not fit, the session starts in game over.
    pub fn from_board(mut config: EngineConfig, board: Board) -> Result<Self> {
        config.width = board.width();
        config.height = board.height();
        config.validate()?;
        Ok(Self::start(config, board))
    }

    /// Build a session from a validated configuration
    fn start(config: EngineConfig, board: Board) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut pieces = PieceSource::new(seed, config.special_chance);
        let first = pieces.draw();

        let mut state = Self {
            active: Piece::spawn(first.kind, first.special, board.width()),
            board,
            pieces,
            status: GameStatus::Active,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            drop_interval_ms: config.initial_drop_interval_ms,
            drop_counter_ms: 0,
            pieces_spawned: 0,
            events: Vec::new(),
            config,
        };
        state.place_piece(first);
        state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Seed of the piece sequence
    pub fn seed(&self) -> u64 {
        self.pieces.seed()
    }

    /// Take all pending events, oldest first
    ///
    /// Collaborators that care about events should drain them every frame; once
    /// `MAX_PENDING_EVENTS` are queued the oldest ones are dropped.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Pending events without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.to_rows(),
            active: ActiveSnapshot::from(&self.active),
            status: self.status,
            score: self.score,
            level: self.level,
            lines: self.lines,
            drop_interval_ms: self.drop_interval_ms,
            pieces_spawned: self.pieces_spawned,
            seed: self.seed(),
        }
    }

    /// Start a new game: empty board, fresh counters and a new piece
    ///
    /// The piece sequence continues from the current source, so consecutive
    /// games differ.
    pub fn reset(&mut self) {
        self.board.clear();
        self.status = GameStatus::Active;
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.drop_interval_ms = self.config.initial_drop_interval_ms;
        self.drop_counter_ms = 0;
        self.pieces_spawned = 0;
        self.events.clear();
        info!(seed = self.seed(), "new game");
        self.spawn_piece();
    }

    /// Spawn the next piece from the source
    ///
    /// Returns false and ends the game if the new piece collides.
    pub fn spawn_piece(&mut self) -> bool {
        let draw = self.pieces.draw();
        self.place_piece(draw)
    }

    fn place_piece(&mut self, draw: PieceDraw) -> bool {
        self.active = Piece::spawn(draw.kind, draw.special, self.board.width());
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        trace!(kind = ?draw.kind, special = draw.special, x = self.active.x, "spawned piece");

        if self.active.collides(&self.board) {
            self.status = GameStatus::GameOver;
            self.push_event(GameEvent::GameOver { score: self.score });
            info!(
                score = self.score,
                level = self.level,
                lines = self.lines,
                "game over"
            );
            return false;
        }
        true
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    /// Rotate clockwise, kicking sideways if needed
    pub fn rotate(&mut self) -> bool {
        self.try_rotate(RotateDir::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(RotateDir::CounterClockwise)
    }

    /// Try to shift the active piece horizontally
    pub(crate) fn try_move(&mut self, dx: i8) -> bool {
        if self.is_game_over() {
            return false;
        }

        self.active.x += dx;
        if self.active.collides(&self.board) {
            self.active.x -= dx;
            return false;
        }
        true
    }

    /// Try to rotate the active piece with wall kicks
    ///
    /// On failure the matrix and position are left untouched.
    pub(crate) fn try_rotate(&mut self, dir: RotateDir) -> bool {
        if self.is_game_over() {
            return false;
        }

        let y = self.active.y;
        let board = &self.board;
        let result = try_rotate(&self.active.matrix, self.active.x, dir, |matrix, x| {
            !board.collides(matrix, x, y)
        });

        match result {
            Some((matrix, dx)) => {
                self.active.matrix = matrix;
                self.active.x += dx;
                true
            }
            None => false,
        }
    }

    /// Move the active piece down one row, locking it if it cannot fall
    ///
    /// Locking merges the piece into the board, sweeps full rows and spawns the
    /// next piece. The automatic-drop counter restarts either way. Returns true
    /// if the piece fell.
    pub fn soft_drop(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        self.drop_counter_ms = 0;
        self.active.y += 1;
        if !self.active.collides(&self.board) {
            return true;
        }

        self.active.y -= 1;
        self.lock_piece();
        false
    }

    /// Advance the automatic fall by `elapsed_ms` of real frame time
    ///
    /// Drops one row once the accumulated time exceeds the drop interval. Returns
    /// true if a drop step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.is_game_over() {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            self.soft_drop();
            return true;
        }
        false
    }

    /// Merge the active piece into the board, score the sweep and spawn the next piece
    fn lock_piece(&mut self) {
        let piece = self.active;
        let written = self.board.merge(&piece.matrix, piece.x, piece.y);
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, written, "piece locked");
        self.push_event(GameEvent::PieceLocked {
            kind: piece.kind,
            special: piece.special,
        });

        let cleared = self.board.sweep();
        if cleared > 0 {
            self.apply_line_clear(cleared);
        }

        self.spawn_piece();
    }

    /// Award points and lines for a sweep and advance the level
    fn apply_line_clear(&mut self, cleared: usize) {
        let points = calculate_line_score(&self.config.line_scores, cleared, self.level);
        let count = cleared as u32;
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(count);
        debug!(count, points, score = self.score, "lines cleared");
        self.push_event(GameEvent::LinesCleared { count, points });

        if should_level_up(self.lines, self.level, self.config.lines_per_level) {
            self.level += 1;
            self.drop_interval_ms = next_drop_interval_ms(
                self.drop_interval_ms,
                self.config.drop_interval_step_ms,
                self.config.min_drop_interval_ms,
            );
            info!(
                level = self.level,
                drop_interval_ms = self.drop_interval_ms,
                "level up"
            );
            self.push_event(GameEvent::LevelUp {
                level: self.level,
                drop_interval_ms: self.drop_interval_ms,
            });
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::start(EngineConfig::default(), Board::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(EngineConfig::new().with_seed(12345).with_special_chance(0.0)).unwrap()
    }

    /// Replace the active piece with `kind` at (x, y)
    fn force_piece(state: &mut GameState, kind: PieceKind, x: i8, y: i8) {
        state.active = Piece {
            x,
            y,
            ..Piece::spawn(kind, false, state.board.width())
        };
        assert!(!state.active.collides(&state.board));
    }

    fn fill_row_except(state: &mut GameState, y: i8, gap: i8) {
        for x in 0..state.board.width() as i8 {
            if x != gap {
                state.board.set(x, y, CellKind::Z);
            }
        }
    }

    fn drop_until_locked(state: &mut GameState) {
        let spawned = state.pieces_spawned;
        while state.soft_drop() {}
        assert_eq!(state.pieces_spawned, spawned + 1);
    }

    #[test]
    fn test_new_game_state() {
        let state = new_state();

        assert_eq!(state.status, GameStatus::Active);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.drop_interval_ms, 1000);
        assert_eq!(state.pieces_spawned, 1);
        assert_eq!(state.seed(), 12345);
        assert!(state.board.cells().iter().all(CellKind::is_empty));
        assert!(!state.active.collides(&state.board));
    }

    #[test]
    fn test_default_game_state() {
        let state = GameState::default();
        assert_eq!(state.board.width(), BOARD_WIDTH);
        assert_eq!(state.board.height(), BOARD_HEIGHT);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_piece_spawn_position() {
        assert_eq!(Piece::spawn(PieceKind::T, false, 12).x, 5);
        assert_eq!(Piece::spawn(PieceKind::O, false, 12).x, 5);
        assert_eq!(Piece::spawn(PieceKind::I, false, 12).x, 4);
        assert_eq!(Piece::spawn(PieceKind::I, false, 12).y, 0);
    }

    #[test]
    fn test_special_piece_only_changes_cells() {
        let plain = Piece::spawn(PieceKind::L, false, 12);
        let special = Piece::spawn(PieceKind::L, true, 12);
        assert_eq!(special.x, plain.x);
        assert!(special
            .matrix
            .minos()
            .iter()
            .all(|&(_, _, c)| c == CellKind::Special));
        let offsets = |p: &Piece| -> Vec<(i8, i8)> {
            p.matrix.minos().iter().map(|&(x, y, _)| (x, y)).collect()
        };
        assert_eq!(offsets(&plain), offsets(&special));
    }

    #[test]
    fn test_try_move() {
        let mut state = new_state();
        force_piece(&mut state, PieceKind::T, 5, 0);

        assert!(state.try_move(1));
        assert_eq!(state.active.x, 6);
        assert!(state.try_move(-1));
        assert_eq!(state.active.x, 5);
    }

    #[test]
    fn test_try_move_stops_at_wall() {
        let mut state = new_state();
        force_piece(&mut state, PieceKind::T, 5, 0);

        let mut moved = 0;
        for _ in 0..20 {
            if state.move_left() {
                moved += 1;
            }
        }
        // T occupies columns x..x+2, so it stops at x = 0.
        assert_eq!(moved, 5);
        assert_eq!(state.active.x, 0);
    }

    #[test]
    fn test_rotate_without_kick() {
        let mut state = new_state();
        force_piece(&mut state, PieceKind::J, 5, 5);
        let before = state.active;

        assert!(state.rotate());
        assert_eq!(state.active.x, before.x);
        assert_eq!(state.active.matrix, before.matrix.rotated(RotateDir::Clockwise));

        assert!(state.rotate_ccw());
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        let mut state = new_state();
        // Vertical I in column 0.
        force_piece(&mut state, PieceKind::I, -1, 5);

        assert!(state.rotate());
        // Horizontal at x = -1 would poke out, the +1 kick fits.
        assert_eq!(state.active.x, 0);
        assert!(!state.active.collides(&state.board));
    }

    #[test]
    fn test_failed_rotation_restores_state() {
        let mut state = new_state();
        for y in 10..20 {
            fill_row_except(&mut state, y, 1);
        }
        // Vertical I in the one-wide well at column 1.
        force_piece(&mut state, PieceKind::I, 0, 16);
        let before = state.active;
        let board_before = state.board.clone();

        assert!(!state.rotate());
        assert!(!state.rotate_ccw());
        assert_eq!(state.active, before);
        assert_eq!(state.board, board_before);
    }

    #[test]
    fn test_soft_drop_moves_down() {
        let mut state = new_state();
        force_piece(&mut state, PieceKind::O, 5, 0);
        state.drop_counter_ms = 400;

        assert!(state.soft_drop());
        assert_eq!(state.active.y, 1);
        assert_eq!(state.drop_counter_ms, 0);
    }

    #[test]
    fn test_lock_merges_and_spawns() {
        let mut state = new_state();
        force_piece(&mut state, PieceKind::O, 0, 0);

        drop_until_locked(&mut state);

        assert_eq!(state.board.get(0, 18), Some(CellKind::O));
        assert_eq!(state.board.get(1, 19), Some(CellKind::O));
        assert_eq!(state.active.y, 0);
        assert_eq!(
            state.drain_events().collect::<Vec<_>>(),
            vec![GameEvent::PieceLocked {
                kind: PieceKind::O,
                special: false
            }]
        );
    }

    #[test]
    fn test_single_line_clear_scores_100() {
        let mut state = new_state();
        fill_row_except(&mut state, 19, 0);
        force_piece(&mut state, PieceKind::I, -1, 0);

        drop_until_locked(&mut state);

        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 100);
        // The rest of the I piece settled one row lower.
        assert_eq!(state.board.get(0, 19), Some(CellKind::I));
        assert_eq!(state.board.get(0, 17), Some(CellKind::I));
        assert_eq!(state.board.get(0, 16), Some(CellKind::Empty));
        assert_eq!(state.board.get(1, 19), Some(CellKind::Empty));
    }

    #[test]
    fn test_four_line_clear_scores_800() {
        let mut state = new_state();
        for y in 16..20 {
            fill_row_except(&mut state, y, 0);
        }
        force_piece(&mut state, PieceKind::I, -1, 0);

        drop_until_locked(&mut state);

        assert_eq!(state.lines, 4);
        assert_eq!(state.score, 800);
        assert!(state.board.cells().iter().all(CellKind::is_empty));
        assert!(state
            .pending_events()
            .contains(&GameEvent::LinesCleared { count: 4, points: 800 }));
    }

    #[test]
    fn test_four_line_clear_at_level_three() {
        let mut state = new_state();
        state.level = 3;
        state.lines = 20;
        for y in 16..20 {
            fill_row_except(&mut state, y, 0);
        }
        force_piece(&mut state, PieceKind::I, -1, 0);

        drop_until_locked(&mut state);

        assert_eq!(state.score, 2400);
        assert_eq!(state.lines, 24);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_level_up_shortens_interval() {
        let mut state = new_state();
        state.lines = 9;
        fill_row_except(&mut state, 19, 0);
        force_piece(&mut state, PieceKind::I, -1, 0);

        drop_until_locked(&mut state);

        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.drop_interval_ms, 950);
        assert!(state.pending_events().contains(&GameEvent::LevelUp {
            level: 2,
            drop_interval_ms: 950
        }));
    }

    #[test]
    fn test_level_up_respects_floor() {
        let mut state = new_state();
        for _ in 0..30 {
            state.lines = state.level * 10 - 1;
            state.board.clear();
            fill_row_except(&mut state, 19, 0);
            force_piece(&mut state, PieceKind::I, -1, 0);
            drop_until_locked(&mut state);
            assert!(state.drop_interval_ms >= 100);
        }
        assert_eq!(state.level, 31);
        assert_eq!(state.drop_interval_ms, 100);
    }

    #[test]
    fn test_tick_accumulates_elapsed_time() {
        let mut state = new_state();
        force_piece(&mut state, PieceKind::T, 5, 0);

        assert!(!state.tick(500));
        assert!(!state.tick(500));
        assert_eq!(state.active.y, 0);
        assert_eq!(state.drop_counter_ms, 1000);

        assert!(state.tick(1));
        assert_eq!(state.active.y, 1);
        assert_eq!(state.drop_counter_ms, 0);
    }

    #[test]
    fn test_tick_uses_current_interval() {
        let mut state = new_state();
        force_piece(&mut state, PieceKind::T, 5, 0);
        state.drop_interval_ms = 100;

        assert!(!state.tick(60));
        assert!(state.tick(60));
        assert_eq!(state.active.y, 1);
    }

    #[test]
    fn test_spawn_collision_is_game_over() {
        let mut state = new_state();
        for y in 1..20 {
            state.board.set(5, y, CellKind::J);
            state.board.set(6, y, CellKind::J);
        }

        assert!(!state.spawn_piece());
        assert_eq!(state.status, GameStatus::GameOver);
        assert!(matches!(
            state.pending_events().last(),
            Some(GameEvent::GameOver { score: 0 })
        ));
    }

    #[test]
    fn test_game_over_freezes_board() {
        let mut state = new_state();
        for y in 2..20 {
            state.board.set(5, y, CellKind::J);
            state.board.set(6, y, CellKind::J);
        }
        force_piece(&mut state, PieceKind::O, 5, 0);

        // The O cannot fall and locks at the top; every next piece collides.
        assert!(!state.soft_drop());
        assert!(state.is_game_over());

        let board = state.board.clone();
        let active = state.active;
        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.rotate());
        assert!(!state.soft_drop());
        assert!(!state.tick(10_000));
        assert_eq!(state.board, board);
        assert_eq!(state.active, active);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = new_state();
        state.score = 500;
        state.lines = 12;
        state.level = 2;
        state.drop_interval_ms = 950;
        state.board.set(0, 19, CellKind::T);
        state.status = GameStatus::GameOver;

        assert!(state.apply_action(GameAction::Reset));

        assert_eq!(state.status, GameStatus::Active);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms, 1000);
        assert_eq!(state.pieces_spawned, 1);
        assert!(state.board.cells().iter().all(CellKind::is_empty));
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = new_state();
        force_piece(&mut state, PieceKind::T, 5, 5);

        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active.x, 6);
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active.x, 5);
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.active.y, 6);
        assert!(state.apply_action(GameAction::Rotate));
        assert!(state.apply_action(GameAction::RotateCcw));
        assert_eq!(state.active.matrix, get_shape(PieceKind::T));
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let mut state = new_state();

        // Lock pieces in the left column without ever draining events.
        for _ in 0..20 {
            state.board.clear();
            force_piece(&mut state, PieceKind::O, 0, 0);
            drop_until_locked(&mut state);
        }
        assert_eq!(state.pending_events().len(), 20);

        for _ in 0..100 {
            state.push_event(GameEvent::GameOver { score: 7 });
        }
        assert_eq!(state.pending_events().len(), MAX_PENDING_EVENTS);
        assert!(state
            .pending_events()
            .iter()
            .all(|e| *e == GameEvent::GameOver { score: 7 }));

        // Newest events survive and draining empties the queue
        state.push_event(GameEvent::LinesCleared { count: 1, points: 100 });
        let drained: Vec<GameEvent> = state.drain_events().collect();
        assert_eq!(drained.len(), MAX_PENDING_EVENTS);
        assert_eq!(
            drained.last(),
            Some(&GameEvent::LinesCleared { count: 1, points: 100 })
        );
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = new_state();
        state.board.set(3, 19, CellKind::S);
        let snap = state.snapshot();

        assert_eq!(snap.width, 12);
        assert_eq!(snap.height, 20);
        assert_eq!(snap.board[19][3], CellKind::S);
        assert_eq!(snap.active.x, state.active.x);
        assert_eq!(snap.active.kind, state.active.kind);
        assert_eq!(snap.status, GameStatus::Active);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.seed, 12345);
    }
}
