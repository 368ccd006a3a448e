//! Tunable constants of the ruleset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Grid;

const MIN_GRID_COUNT: i32 = 12;
const MAX_GRID_COUNT: i32 = 1024;

/// Every tunable constant of the simulation.
///
/// Fields missing from a deserialized document fall back to the reference
/// ruleset, so configuration files only need to list overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of cells along each axis of the square grid.
    pub grid_count: i32,
    /// Ticks between two turret volleys.
    pub turret_cooldown: i32,
    /// Ticks granted by shield, speed and poop eater pickups.
    pub buff_duration: u32,
    /// Ticks of the cosmetic stink animation on fresh poop.
    pub stink_duration: u32,
    /// Ticks frozen before a round starts.
    pub countdown_ticks: u32,
    /// Apples both players must eat together to finish a level.
    pub apples_per_level: u32,
    /// Apples a single snake eats before it poops.
    pub apples_per_poop: u32,
    /// Cells a poop monster travels per tick.
    pub monster_speed: f32,
    /// Monsters flee a hunted head closer than this many cells on both axes.
    pub monster_head_avoidance: f32,
    /// Random samples tried before falling back to a free-cell scan.
    pub spawn_attempts: u32,
    /// Ticks per second of the driving clock.
    pub tick_rate_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_count: 40,
            turret_cooldown: 30,
            buff_duration: 100,
            stink_duration: 20,
            countdown_ticks: 15,
            apples_per_level: 4,
            apples_per_poop: 2,
            monster_speed: 0.5,
            monster_head_avoidance: 1.0,
            spawn_attempts: 4096,
            tick_rate_hz: 10,
        }
    }
}

impl GameConfig {
    /// Grid described by the configuration.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        Grid::new(self.grid_count)
    }

    /// Checks that every value can drive a round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_COUNT..=MAX_GRID_COUNT).contains(&self.grid_count) {
            return Err(ConfigError::GridSize {
                count: self.grid_count,
                min: MIN_GRID_COUNT,
                max: MAX_GRID_COUNT,
            });
        }
        if self.turret_cooldown <= 0 {
            return Err(ConfigError::NotPositive("turret_cooldown"));
        }
        if self.apples_per_level == 0 {
            return Err(ConfigError::NotPositive("apples_per_level"));
        }
        if self.apples_per_poop == 0 {
            return Err(ConfigError::NotPositive("apples_per_poop"));
        }
        if self.spawn_attempts == 0 {
            return Err(ConfigError::NotPositive("spawn_attempts"));
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::NotPositive("tick_rate_hz"));
        }
        if !self.monster_speed.is_finite() || self.monster_speed <= 0.0 {
            return Err(ConfigError::NotPositive("monster_speed"));
        }
        if !self.monster_head_avoidance.is_finite() || self.monster_head_avoidance < 0.0 {
            return Err(ConfigError::Negative("monster_head_avoidance"));
        }
        Ok(())
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The grid is too small to seat both snakes or unreasonably large.
    #[error("grid_count {count} must lie within {min}..={max}")]
    GridSize {
        /// Requested cell count.
        count: i32,
        /// Smallest accepted count.
        min: i32,
        /// Largest accepted count.
        max: i32,
    },
    /// A value that must be strictly positive is not.
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    /// A value that must not be negative is.
    #[error("{0} must not be negative")]
    Negative(&'static str),
}
