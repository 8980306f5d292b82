//! End-of-life fitness evaluation
//!
//! Raw fitness is `1 / (d² + 1)` where `d` is the best distance-field value
//! an agent reached, shaped by completion and crash modifiers. Scores are
//! then normalized so the best agent sits at exactly 1.0.

use super::agent::{Agent, AgentStatus};
use super::distance::UNREACHABLE;
use crate::config::SimConfig;

/// Ceiling of the progress score shown to users
pub const MAX_PROGRESS: u32 = 100;

/// Result of evaluating a generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Index of the fittest agent
    pub best_index: usize,
    /// Highest raw (pre-normalization) fitness
    pub max_raw: f32,
    /// Whether fitness values were divided by `max_raw`
    pub normalized: bool,
    /// Display metric derived from the fittest agent's best distance
    pub progress: u32,
}

/// Raw fitness of one agent
pub fn raw_fitness(agent: &Agent, config: &SimConfig) -> f32 {
    let d = if agent.best_distance == UNREACHABLE {
        config.unreachable_penalty
    } else {
        agent.best_distance as f32
    };
    let mut fit = 1.0 / (d * d + 1.0);
    match agent.status {
        AgentStatus::Completed { tick } => {
            let remaining = config.lifespan_ticks().saturating_sub(tick);
            fit *= config.completion_multiplier;
            fit += remaining as f32 * config.completion_tick_bonus;
        }
        AgentStatus::Crashed { .. } => fit *= config.crash_multiplier,
        AgentStatus::Alive => {}
    }
    fit
}

/// Human-readable progress: 100 minus the best distance, clamped to [0, 100]
pub fn progress_score(best_distance: u32) -> u32 {
    if best_distance == UNREACHABLE {
        return 0;
    }
    MAX_PROGRESS.saturating_sub(best_distance)
}

/// Score every agent and normalize against the best one
///
/// When the best raw score is zero (or not finite) normalization is skipped
/// and the raw values are kept.
pub fn evaluate(agents: &mut [Agent], config: &SimConfig) -> Evaluation {
    let mut best_index = 0;
    let mut max_raw = 0.0f32;
    for (i, agent) in agents.iter_mut().enumerate() {
        agent.fitness = raw_fitness(agent, config);
        if agent.fitness > max_raw {
            max_raw = agent.fitness;
            best_index = i;
        }
    }

    let normalized = max_raw > 0.0 && max_raw.is_finite();
    if normalized {
        for agent in agents.iter_mut() {
            agent.fitness /= max_raw;
        }
    } else {
        log::warn!("Degenerate fitness landscape (max {max_raw}), skipping normalization");
    }

    let progress = agents
        .get(best_index)
        .map(|a| progress_score(a.best_distance))
        .unwrap_or(0);

    Evaluation {
        best_index,
        max_raw,
        normalized,
        progress,
    }
}
