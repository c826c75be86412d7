//! RNG module - deterministic randomness for board generation and hardening
//!
//! Every random decision the engine makes (piece types at generation and
//! refill, hardening rolls, hardening targets) goes through the
//! [`Randomizer`] trait so that games are reproducible from a seed and tests
//! can script exact outcomes.
//!
//! [`SimpleRng`] is a small LCG that is plenty for a puzzle board.

use crate::types::{Cell, PieceType, BOARD_CELLS, PIECE_TYPE_COUNT};

/// Source of randomness consumed by the board
pub trait Randomizer {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Uniform roll in [0, 1)
    fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniformly random piece type
    fn next_kind(&mut self) -> PieceType {
        PieceType::from_index(self.next_range(PIECE_TYPE_COUNT as u32))
    }

    /// Uniformly random cell
    fn next_cell(&mut self) -> Cell {
        let index = self.next_range(BOARD_CELLS as u32) as usize;
        Cell::from_index(index).unwrap_or(Cell::new(0, 0))
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }
}

impl Randomizer for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of an LCG are weak; fold the high half down.
        self.state ^ (self.state >> 16)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        let first = rng.next_u32();
        let second = rng.next_u32();
        assert_ne!(first, second);
    }

    #[test]
    fn test_unit_roll_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            let roll = rng.next_unit();
            assert!((0.0..1.0).contains(&roll));
        }
    }

    #[test]
    fn test_kinds_cover_all_types() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; PIECE_TYPE_COUNT as usize];
        for _ in 0..500 {
            seen[rng.next_kind().index() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every type should appear: {:?}", seen);
    }

    #[test]
    fn test_next_cell_on_board() {
        let mut rng = SimpleRng::new(3);
        for _ in 0..500 {
            assert!(rng.next_cell().index() < BOARD_CELLS);
        }
    }
}
