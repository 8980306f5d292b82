//! Agents and their genes
//!
//! A gene is the full list of forces an agent will apply, one per tick.
//! Genes are never modified after creation; selection always builds new ones.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::distance::UNREACHABLE;
use crate::config::SimConfig;
use crate::polar_to_vec;

/// Ordered, fixed-length sequence of force impulses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene(Vec<Vec2>);

impl Gene {
    pub fn from_forces(forces: Vec<Vec2>) -> Self {
        Self(forces)
    }

    /// Correlated random walk: the heading drifts by a bounded amount each
    /// step, starting from `initial_heading`, with a random magnitude up to
    /// `max_force`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        len: usize,
        max_force: f32,
        initial_heading: f32,
        jitter: f32,
    ) -> Self {
        let mut angle = initial_heading;
        let forces = (0..len)
            .map(|_| {
                angle += (rng.random::<f32>() - 0.5) * jitter;
                let magnitude = rng.random::<f32>() * max_force;
                polar_to_vec(magnitude, angle)
            })
            .collect();
        Self(forces)
    }

    /// Random gene with the config's walk parameters
    pub fn random_for<R: Rng + ?Sized>(rng: &mut R, config: &SimConfig) -> Self {
        Self::random(
            rng,
            config.lifespan,
            config.max_force,
            config.initial_heading,
            config.heading_jitter,
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Force for tick `t`
    #[inline]
    pub fn force(&self, t: usize) -> Option<Vec2> {
        self.0.get(t).copied()
    }

    pub fn forces(&self) -> &[Vec2] {
        &self.0
    }
}

/// Life state of an agent within its generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    /// Still flying
    Alive,
    /// Reached the target at the given tick
    Completed { tick: u32 },
    /// Hit an obstacle or left the arena at the given tick
    Crashed { tick: u32 },
}

/// One candidate solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    gene: Gene,
    pub fitness: f32,
    pub status: AgentStatus,
    /// Lowest distance-field value visited so far ([`UNREACHABLE`] until scored)
    pub best_distance: u32,
}

impl Agent {
    /// A newborn agent at `start` flying `gene`
    pub fn new(gene: Gene, start: Vec2) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            gene,
            fitness: 0.0,
            status: AgentStatus::Alive,
            best_distance: UNREACHABLE,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &SimConfig) -> Self {
        Self::new(Gene::random_for(rng, config), config.start)
    }

    pub fn gene(&self) -> &Gene {
        &self.gene
    }

    /// Accumulate a force into this tick's acceleration
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.status, AgentStatus::Completed { .. })
    }

    #[inline]
    pub fn is_crashed(&self) -> bool {
        matches!(self.status, AgentStatus::Crashed { .. })
    }

    /// Completed or crashed; terminal agents are frozen until the next generation
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status != AgentStatus::Alive
    }
}
