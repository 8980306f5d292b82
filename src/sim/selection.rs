//! Reproduction: elitism, mating pool, crossover and mutation
//!
//! Every function here returns fresh genes. Parents are only ever borrowed,
//! so no two agents share a force array.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::agent::{Agent, Gene};
use crate::config::SimConfig;
use crate::polar_to_vec;

/// Indices of the `k` fittest agents, best first
pub fn elite_indices(agents: &[Agent], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..agents.len()).collect();
    order.sort_by(|&a, &b| agents[b].fitness.total_cmp(&agents[a].fitness));
    order.truncate(k);
    order
}

/// Fitness-proportionate pool: `floor(fitness * scale)` references per agent
///
/// Falls back to one reference per agent when every count rounds to zero.
pub fn build_mating_pool(agents: &[Agent], scale: f32) -> Vec<&Gene> {
    let mut pool = Vec::new();
    for agent in agents {
        let copies = (agent.fitness * scale).floor().max(0.0) as usize;
        pool.extend(std::iter::repeat_n(agent.gene(), copies));
    }
    if pool.is_empty() {
        log::warn!(
            "Mating pool empty, falling back to uniform pool of {}",
            agents.len()
        );
        pool.extend(agents.iter().map(Agent::gene));
    }
    pool
}

/// Single-point crossover: `a` before `cut`, `b` from `cut` on
pub fn crossover(a: &Gene, b: &Gene, cut: usize) -> Gene {
    let forces = a
        .forces()
        .iter()
        .zip(b.forces())
        .enumerate()
        .map(|(i, (&fa, &fb))| if i < cut { fa } else { fb })
        .collect();
    Gene::from_forces(forces)
}

/// Copy of `gene` where each force is independently replaced, with
/// probability `rate`, by a uniformly random one
pub fn mutate<R: Rng + ?Sized>(gene: &Gene, rng: &mut R, rate: f32, max_force: f32) -> Gene {
    let forces = gene
        .forces()
        .iter()
        .map(|&force| {
            if rng.random::<f32>() < rate {
                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                let magnitude = rng.random::<f32>() * max_force;
                polar_to_vec(magnitude, angle)
            } else {
                force
            }
        })
        .collect();
    Gene::from_forces(forces)
}

/// Build the next population from an evaluated one
///
/// The top `elite_count` genes are carried over unchanged; the remaining
/// slots are filled with mutated crossovers of parents drawn uniformly from
/// the mating pool.
pub fn next_generation<R: Rng + ?Sized>(
    agents: &[Agent],
    config: &SimConfig,
    rng: &mut R,
) -> Vec<Agent> {
    let mut next = Vec::with_capacity(config.population_size);

    for i in elite_indices(agents, config.elite_count) {
        next.push(Agent::new(agents[i].gene().clone(), config.start));
    }

    let pool = build_mating_pool(agents, config.mating_pool_scale);
    while next.len() < config.population_size {
        let (Some(&parent_a), Some(&parent_b)) = (pool.choose(rng), pool.choose(rng)) else {
            break;
        };
        let cut = rng.random_range(0..config.lifespan);
        let child = crossover(parent_a, parent_b, cut);
        let child = mutate(&child, rng, config.mutation_rate, config.max_force);
        next.push(Agent::new(child, config.start));
    }

    next
}
