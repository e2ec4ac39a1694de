#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random seeding system used to scatter live cells across the grid.

use life_core::{CellCoord, Command, GridSize};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeding system that produces [`Command::Reseed`] batches.
///
/// A reseed draws a pick count `k` uniformly from `[0, width * height)` and
/// then performs `k` independent coordinate picks with replacement. Repeated
/// picks collapse once applied, so the resulting population never exceeds `k`.
#[derive(Clone, Debug)]
pub struct Seeding {
    rng: ChaCha8Rng,
}

impl Seeding {
    /// Creates a deterministic seeding system.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a seeding system from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Draws the pick list for a fresh random population.
    pub fn scatter(&mut self, size: GridSize) -> Vec<CellCoord> {
        let picks = self.rng.gen_range(0..size.cell_count());

        (0..picks)
            .map(|_| {
                let column = self.rng.gen_range(0..size.width());
                let row = self.rng.gen_range(0..size.height());
                CellCoord::new(column, row)
            })
            .collect()
    }

    /// Emits a reseed command covering the whole grid.
    pub fn handle(&mut self, size: GridSize, out: &mut Vec<Command>) {
        let cells = self.scatter(size);
        out.push(Command::Reseed { cells });
    }
}

impl Default for Seeding {
    fn default() -> Self {
        Self::from_entropy()
    }
}
