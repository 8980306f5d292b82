//! Simulation parameters
//!
//! Every tunable of the engine lives in [`SimConfig`]. Defaults reproduce
//! the `consts` module; a JSON document may override any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{GridDims, Obstacle};

/// Errors produced while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Full set of simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the run's single RNG stream
    pub seed: u64,
    pub arena_width: f32,
    pub arena_height: f32,
    /// Distance field cell size in arena units
    pub cell_size: f32,
    pub population_size: usize,
    /// Ticks per generation; also the gene length
    pub lifespan: usize,
    pub max_force: f32,
    pub capture_radius: f32,
    pub elite_count: usize,
    pub mutation_rate: f32,
    pub mating_pool_scale: f32,
    pub completion_multiplier: f32,
    /// Bonus per tick left on the clock when an agent arrives
    pub completion_tick_bonus: f32,
    pub crash_multiplier: f32,
    /// Distance (cells) assumed for agents that never touched a reachable cell
    pub unreachable_penalty: f32,
    pub heading_jitter: f32,
    pub initial_heading: f32,
    pub min_obstacle_size: f32,
    pub start: Vec2,
    pub target: Vec2,
    /// Obstacles present when the simulation is created
    pub initial_obstacles: Vec<Obstacle>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            cell_size: GRID_RES,
            population_size: POPULATION_SIZE,
            lifespan: LIFESPAN,
            max_force: MAX_FORCE,
            capture_radius: CAPTURE_RADIUS,
            elite_count: ELITE_COUNT,
            mutation_rate: MUTATION_RATE,
            mating_pool_scale: MATING_POOL_SCALE,
            completion_multiplier: COMPLETION_MULTIPLIER,
            completion_tick_bonus: COMPLETION_TICK_BONUS,
            crash_multiplier: CRASH_MULTIPLIER,
            unreachable_penalty: UNREACHABLE_PENALTY,
            heading_jitter: HEADING_JITTER,
            initial_heading: INITIAL_HEADING,
            min_obstacle_size: MIN_OBSTACLE_SIZE,
            start: Vec2::new(START_X, START_Y),
            target: Vec2::new(TARGET_X, TARGET_Y),
            initial_obstacles: vec![Obstacle::new(200.0, 300.0, 400.0, 20.0)],
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable by the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(ConfigError::Invalid("arena dimensions must be positive"));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::Invalid("cell_size must be positive"));
        }
        if !(self.arena_width.is_finite() && self.arena_height.is_finite()) {
            return Err(ConfigError::Invalid("arena dimensions must be finite"));
        }
        if GridDims::try_for_arena(self.arena_width, self.arena_height, self.cell_size).is_none() {
            return Err(ConfigError::Invalid("distance grid is too large"));
        }
        if !(self.start.is_finite() && self.target.is_finite()) {
            return Err(ConfigError::Invalid("start and target must be finite"));
        }
        if self.population_size == 0 {
            return Err(ConfigError::Invalid("population_size must be non-zero"));
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::Invalid(
                "elite_count must be smaller than population_size",
            ));
        }
        if self.lifespan == 0 {
            return Err(ConfigError::Invalid("lifespan must be non-zero"));
        }
        if !(self.max_force > 0.0) {
            return Err(ConfigError::Invalid("max_force must be positive"));
        }
        if !(self.capture_radius > 0.0) {
            return Err(ConfigError::Invalid("capture_radius must be positive"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::Invalid("mutation_rate must be within [0, 1]"));
        }
        if !(self.mating_pool_scale > 0.0) {
            return Err(ConfigError::Invalid("mating_pool_scale must be positive"));
        }
        if !(self.crash_multiplier > 0.0 && self.crash_multiplier <= 1.0) {
            return Err(ConfigError::Invalid("crash_multiplier must be within (0, 1]"));
        }
        if !(self.unreachable_penalty > 0.0) {
            return Err(ConfigError::Invalid("unreachable_penalty must be positive"));
        }
        Ok(())
    }

    /// Total ticks-per-generation as the tick counter type
    pub fn lifespan_ticks(&self) -> u32 {
        self.lifespan as u32
    }
}
