//! Simulation state
//!
//! Everything the engine mutates between frames lives in one owned
//! [`SimState`]. The distance field is private and rebuilt by every method
//! that changes obstacles or the target, so a tick never reads a stale field.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::agent::Agent;
use super::distance::{DistanceField, GridDims};
use super::obstacle::{Obstacle, ObstacleField, random_track};
use crate::config::{ConfigError, SimConfig};
use crate::history::History;
use crate::settings::Settings;

/// Complete simulation state (deterministic for a given seed and command stream)
#[derive(Debug, Clone)]
pub struct SimState {
    pub config: SimConfig,
    /// Current generation, oldest-first order not guaranteed
    pub population: Vec<Agent>,
    /// Tick within the current generation (0-based)
    pub tick: u32,
    /// Generation index (1-based)
    pub generation: u32,
    /// Whether frames advance the simulation
    pub running: bool,
    pub settings: Settings,
    pub history: History,
    pub(super) obstacles: ObstacleField,
    pub(super) distance: DistanceField,
    pub(super) rng: Pcg32,
}

impl SimState {
    /// Create a paused simulation with a fresh random population
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let obstacles = ObstacleField::new(config.initial_obstacles.clone(), config.target);
        let distance = DistanceField::compute(
            obstacles.obstacles(),
            obstacles.target(),
            grid_dims(&config),
        );
        let population = random_population(&config, &mut rng);

        log::info!(
            "Simulation created: {} agents, lifespan {}, seed {}",
            config.population_size,
            config.lifespan,
            config.seed
        );

        Ok(Self {
            config,
            population,
            tick: 0,
            generation: 1,
            running: false,
            settings: Settings::default(),
            history: History::new(),
            obstacles,
            distance,
            rng,
        })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.obstacles()
    }

    pub fn target(&self) -> Vec2 {
        self.obstacles.target()
    }

    pub fn distance_field(&self) -> &DistanceField {
        &self.distance
    }

    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.config.arena_width, self.config.arena_height)
    }

    /// Agents that reached the target this generation
    pub fn completed_count(&self) -> usize {
        self.population.iter().filter(|a| a.is_completed()).count()
    }

    /// Add an obstacle if valid; the field is only rebuilt when accepted
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> bool {
        let accepted = self.obstacles.add(obstacle, self.config.min_obstacle_size);
        if accepted {
            log::info!(
                "Obstacle added at ({}, {}) size {}x{}",
                obstacle.x,
                obstacle.y,
                obstacle.width,
                obstacle.height
            );
            self.rebuild_distance();
        }
        accepted
    }

    /// Remove every obstacle and restart evolution
    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
        log::info!("Obstacles cleared");
        self.rebuild_distance();
        self.reset_population();
    }

    /// Swap in a whole new obstacle set (invalid rectangles are dropped)
    pub fn replace_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        let min_size = self.config.min_obstacle_size;
        let valid: Vec<Obstacle> = obstacles
            .into_iter()
            .filter(|o| o.is_valid(min_size))
            .collect();
        log::info!("Obstacle set replaced ({} obstacles)", valid.len());
        self.obstacles.replace(valid);
        self.rebuild_distance();
    }

    /// Lay out a random walled track and restart evolution
    pub fn generate_random_track(&mut self) {
        let track = random_track(&mut self.rng, self.config.arena_width);
        self.replace_obstacles(track);
        self.reset_population();
    }

    /// Move the target; a target outside the arena leaves the field unreachable
    pub fn set_target(&mut self, target: Vec2) {
        self.obstacles.set_target(target);
        log::info!("Target moved to ({}, {})", target.x, target.y);
        self.rebuild_distance();
    }

    /// Fresh random population, back to generation 1
    pub fn reset_population(&mut self) {
        self.population = random_population(&self.config, &mut self.rng);
        self.tick = 0;
        self.generation = 1;
        log::info!("Population reset ({} agents)", self.population.len());
    }

    fn rebuild_distance(&mut self) {
        self.distance = DistanceField::compute(
            self.obstacles.obstacles(),
            self.obstacles.target(),
            grid_dims(&self.config),
        );
    }
}

/// Grid covering the configured arena
pub fn grid_dims(config: &SimConfig) -> GridDims {
    GridDims::for_arena(config.arena_width, config.arena_height, config.cell_size)
}

fn random_population(config: &SimConfig, rng: &mut Pcg32) -> Vec<Agent> {
    (0..config.population_size)
        .map(|_| Agent::random(rng, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::distance::UNREACHABLE;

    fn small_config() -> SimConfig {
        SimConfig {
            population_size: 20,
            lifespan: 50,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_state() {
        let state = SimState::new(small_config()).unwrap();
        assert_eq!(state.population.len(), 20);
        assert_eq!(state.tick, 0);
        assert_eq!(state.generation, 1);
        assert!(!state.running);
        assert_eq!(state.obstacles().len(), 1);
        assert_eq!(state.distance_field().sample(state.target()), Some(0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(SimState::new(config).is_err());
    }

    #[test]
    fn test_invalid_obstacle_keeps_field() {
        let mut state = SimState::new(small_config()).unwrap();
        let before = state.distance_field().reachable_count();
        assert!(!state.add_obstacle(Obstacle::new(10.0, 10.0, 3.0, 300.0)));
        assert_eq!(state.obstacles().len(), 1);
        assert_eq!(state.distance_field().reachable_count(), before);
    }

    #[test]
    fn test_add_obstacle_rebuilds_field() {
        let mut state = SimState::new(small_config()).unwrap();
        let before = state.distance_field().reachable_count();
        assert!(state.add_obstacle(Obstacle::new(0.0, 400.0, 200.0, 40.0)));
        assert!(state.distance_field().reachable_count() < before);
    }

    #[test]
    fn test_set_target_outside_arena() {
        let mut state = SimState::new(small_config()).unwrap();
        state.set_target(Vec2::new(-50.0, -50.0));
        assert_eq!(state.distance_field().reachable_count(), 0);
        assert_eq!(state.distance_field().cell(0, 0), Some(UNREACHABLE));
    }

    #[test]
    fn test_clear_resets_generation() {
        let mut state = SimState::new(small_config()).unwrap();
        state.generation = 7;
        state.tick = 12;
        state.clear_obstacles();
        assert!(state.obstacles().is_empty());
        assert_eq!(state.generation, 1);
        assert_eq!(state.tick, 0);
        assert_eq!(
            state.distance_field().reachable_count(),
            grid_dims(&state.config).len()
        );
    }

    #[test]
    fn test_random_track_replaces_obstacles() {
        let mut state = SimState::new(small_config()).unwrap();
        state.generate_random_track();
        assert_eq!(state.obstacles().len(), 8);
        assert_eq!(state.population.len(), 20);
        // Start row sits below every wall; it still reaches the target through the gaps
        let start = state.config.start;
        assert!(state.distance_field().sample(start).is_some_and(|d| d != UNREACHABLE));
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = SimState::new(small_config()).unwrap();
        let b = SimState::new(small_config()).unwrap();
        for (x, y) in a.population.iter().zip(&b.population) {
            assert_eq!(x.gene(), y.gene());
        }
    }
}
