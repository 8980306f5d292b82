//! Fixed-step simulation tick
//!
//! One tick applies the same gene index to every live agent. When the tick
//! counter reaches the lifespan the generation is scored and replaced.

use glam::Vec2;

use super::agent::{Agent, AgentStatus};
use super::collision::{Contact, check_contact};
use super::distance::DistanceField;
use super::obstacle::ObstacleField;
use super::snapshot::GenerationSummary;
use super::state::SimState;
use super::{fitness, selection};

/// Advance one agent by gene index `t`; terminal agents are left untouched
pub fn step_agent(
    agent: &mut Agent,
    t: u32,
    obstacles: &ObstacleField,
    distance: &DistanceField,
    capture_radius: f32,
    arena_size: Vec2,
) {
    if agent.is_terminal() {
        return;
    }
    let Some(force) = agent.gene().force(t as usize) else {
        return;
    };

    // Impulse model: acceleration only lasts for this tick
    agent.apply_force(force);
    agent.vel += agent.acc;
    agent.pos += agent.vel;
    agent.acc = Vec2::ZERO;

    match check_contact(agent.pos, obstacles, capture_radius, arena_size) {
        Contact::Target => {
            agent.status = AgentStatus::Completed { tick: t };
            agent.pos = obstacles.target();
        }
        Contact::Obstacle | Contact::OutOfBounds => {
            agent.status = AgentStatus::Crashed { tick: t };
        }
        Contact::Clear => {}
    }

    if !agent.is_crashed() {
        if let Some(d) = distance.sample(agent.pos) {
            agent.best_distance = agent.best_distance.min(d);
        }
    }
}

/// Advance the whole population by one tick
///
/// Returns the generation summary when this tick completed a generation.
pub fn tick(state: &mut SimState) -> Option<GenerationSummary> {
    let t = state.tick;
    let arena_size = state.arena_size();
    let capture_radius = state.config.capture_radius;
    for agent in &mut state.population {
        step_agent(
            agent,
            t,
            &state.obstacles,
            &state.distance,
            capture_radius,
            arena_size,
        );
    }

    state.tick += 1;
    if state.tick >= state.config.lifespan_ticks() {
        Some(end_generation(state))
    } else {
        None
    }
}

/// Score the current generation and replace it with its offspring
pub fn end_generation(state: &mut SimState) -> GenerationSummary {
    let evaluation = fitness::evaluate(&mut state.population, &state.config);

    let completed_count = state.completed_count();
    let alive_count = state.population.iter().filter(|a| !a.is_crashed()).count();
    let summary = GenerationSummary {
        generation: state.generation,
        progress: evaluation.progress,
        alive_count,
        completed_count,
        best_raw_fitness: evaluation.max_raw,
    };

    log::info!(
        "Generation {} done: progress {}, alive {}, completed {}",
        summary.generation,
        summary.progress,
        summary.alive_count,
        summary.completed_count
    );
    if state.history.record(summary) {
        log::info!("New best progress: {}", summary.progress);
    }

    state.population =
        selection::next_generation(&state.population, &state.config, &mut state.rng);
    state.tick = 0;
    state.generation += 1;

    summary
}

/// Run one display frame: `speed` ticks back to back while running
///
/// Every requested tick finishes before this returns, so a snapshot taken
/// afterwards is always fully stepped.
pub fn run_frame(state: &mut SimState) -> Vec<GenerationSummary> {
    if !state.running {
        return Vec::new();
    }
    (0..state.settings.speed)
        .filter_map(|_| tick(state))
        .collect()
}
