#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawn planner that places apples, power-ups and monsters.
//!
//! Placement uses uniform rejection sampling over the interior of the grid,
//! the ring of cells just inside the walls excluded. Sampling is capped: once
//! the configured number of attempts is spent the planner enumerates the
//! remaining free cells and picks one of them uniformly, so a crowded grid
//! still yields a cell and only a saturated one reports an error.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_battle_core::{CellCoord, Grid, PowerUpKind};
use thiserror::Error;

/// Configuration parameters required to construct the spawn planner.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
    max_attempts: u32,
}

impl Config {
    /// Creates a new configuration using the provided seed and sampling cap.
    #[must_use]
    pub const fn new(rng_seed: u64, max_attempts: u32) -> Self {
        Self {
            rng_seed,
            max_attempts,
        }
    }
}

/// Reasons a spawn request cannot be satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// Every interior cell is blocked.
    #[error("no free interior cell left on a {grid_count}x{grid_count} grid")]
    Exhausted {
        /// Size of the grid that was searched.
        grid_count: i32,
    },
}

/// Cells that spawned items must avoid: snake bodies and turret positions.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    cells: BTreeSet<CellCoord>,
}

impl Occupancy {
    /// Creates an empty occupancy set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every provided cell as blocked.
    pub fn block<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = CellCoord>,
    {
        self.cells.extend(cells);
    }

    /// Reports whether the cell is blocked.
    #[must_use]
    pub fn is_blocked(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }
}

/// Spawn planner owning the simulation's only random number generator.
#[derive(Debug)]
pub struct SpawnPlanner {
    rng: ChaCha8Rng,
    max_attempts: u32,
}

impl SpawnPlanner {
    /// Creates a new planner using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Picks a cell for the apple that avoids occupied cells and the power-up.
    pub fn spawn_food(
        &mut self,
        grid: Grid,
        occupancy: &Occupancy,
        power_up: Option<CellCoord>,
    ) -> Result<CellCoord, SpawnError> {
        self.free_interior_cell(grid, |cell| {
            occupancy.is_blocked(cell) || power_up == Some(cell)
        })
    }

    /// Picks a cell and a uniformly drawn kind for the next power-up.
    pub fn spawn_power_up(
        &mut self,
        grid: Grid,
        occupancy: &Occupancy,
        food: Option<CellCoord>,
    ) -> Result<(CellCoord, PowerUpKind), SpawnError> {
        let cell =
            self.free_interior_cell(grid, |cell| occupancy.is_blocked(cell) || food == Some(cell))?;
        let kind = PowerUpKind::ALL[self.rng.gen_range(0..PowerUpKind::ALL.len())];
        Ok((cell, kind))
    }

    /// Draws any interior cell, occupied or not.
    pub fn random_interior_cell(&mut self, grid: Grid) -> CellCoord {
        let (low, high) = grid.interior();
        let column = self.rng.gen_range(low..=high);
        let row = self.rng.gen_range(low..=high);
        CellCoord::new(column, row)
    }

    fn free_interior_cell<F>(&mut self, grid: Grid, is_blocked: F) -> Result<CellCoord, SpawnError>
    where
        F: Fn(CellCoord) -> bool,
    {
        let (low, high) = grid.interior();
        if low > high {
            return Err(SpawnError::Exhausted {
                grid_count: grid.count(),
            });
        }

        for _ in 0..self.max_attempts {
            let candidate = self.random_interior_cell(grid);
            if !is_blocked(candidate) {
                return Ok(candidate);
            }
        }

        let free: Vec<CellCoord> = (low..=high)
            .flat_map(|row| (low..=high).map(move |column| CellCoord::new(column, row)))
            .filter(|cell| !is_blocked(*cell))
            .collect();
        if free.is_empty() {
            return Err(SpawnError::Exhausted {
                grid_count: grid.count(),
            });
        }
        Ok(free[self.rng.gen_range(0..free.len())])
    }
}
