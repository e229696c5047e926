//! Arcade Tetris (workspace facade crate).
//!
//! Exposes `arcade_tetris::{core,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use arcade_tetris_core as core;
pub use arcade_tetris_types as types;
