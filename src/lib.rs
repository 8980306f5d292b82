//! Evo Rockets - genetic-algorithm rockets in an obstacle arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (distance field, physics, fitness, selection)
//! - `config`: Tunable simulation parameters with validation
//! - `settings`: Run preferences (speed, overlay) persisted on web
//! - `history`: Per-generation telemetry log
//! - `web`: wasm-bindgen surface for a browser host

pub mod config;
pub mod history;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, SimConfig};
pub use history::History;
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Arena dimensions (logical units)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Distance field resolution (units per cell)
    pub const GRID_RES: f32 = 20.0;

    /// Agents per generation
    pub const POPULATION_SIZE: usize = 400;
    /// Ticks per generation (and gene length)
    pub const LIFESPAN: usize = 800;
    /// Maximum magnitude of a single gene force
    pub const MAX_FORCE: f32 = 0.5;
    /// Distance to target that counts as arrival
    pub const CAPTURE_RADIUS: f32 = 15.0;

    /// Agents carried unchanged into the next generation
    pub const ELITE_COUNT: usize = 3;
    /// Per-force probability of re-randomization in offspring
    pub const MUTATION_RATE: f32 = 0.02;
    /// Pool entries per unit of normalized fitness
    pub const MATING_POOL_SCALE: f32 = 100.0;

    /// Fitness shaping
    pub const COMPLETION_MULTIPLIER: f32 = 10.0;
    pub const COMPLETION_TICK_BONUS: f32 = 0.1;
    pub const CRASH_MULTIPLIER: f32 = 0.5;
    /// Stand-in distance (in cells) for never reaching a scored cell
    pub const UNREACHABLE_PENALTY: f32 = 1000.0;

    /// Max heading change per gene step in the random walk (radians, full width)
    pub const HEADING_JITTER: f32 = 1.5;
    /// Initial heading of the random walk (straight up)
    pub const INITIAL_HEADING: f32 = -std::f32::consts::FRAC_PI_2;

    /// Obstacles must exceed this size on both axes
    pub const MIN_OBSTACLE_SIZE: f32 = 5.0;

    /// Default start and target points
    pub const START_X: f32 = 400.0;
    pub const START_Y: f32 = 580.0;
    pub const TARGET_X: f32 = 400.0;
    pub const TARGET_Y: f32 = 50.0;

    /// Physics ticks per frame bounds
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 50;
}

/// Convert polar (magnitude, angle) to a cartesian vector
#[inline]
pub fn polar_to_vec(magnitude: f32, angle: f32) -> Vec2 {
    Vec2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

/// Direction of travel in radians (0 = +x, screen y grows downward)
#[inline]
pub fn heading(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x)
}
