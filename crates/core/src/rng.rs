//! RNG module - random piece selection
//!
//! Each spawn draws a piece kind uniformly from the seven-piece catalog and,
//! independently, decides whether the piece is special. Draws come from a
//! seeded `StdRng`, so the same seed always yields the same piece sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// One spawn decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDraw {
    pub kind: PieceKind,
    pub special: bool,
}

/// Seeded source of spawned pieces
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: StdRng,
    seed: u64,
    special_chance: f64,
}

impl PieceSource {
    /// Create a source with the given seed
    ///
    /// `special_chance` is clamped to 0.0..=1.0; NaN disables special pieces.
    pub fn new(seed: u64, special_chance: f64) -> Self {
        let special_chance = if special_chance.is_nan() {
            0.0
        } else {
            special_chance.clamp(0.0, 1.0)
        };
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            special_chance,
        }
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceDraw {
        let kind = PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())];
        let special = self.rng.random_bool(self.special_chance);
        PieceDraw { kind, special }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
