use evo_rockets::SimConfig;
use evo_rockets::sim::selection::elite_indices;
use evo_rockets::sim::{
    Agent, Command, Gene, SimState, apply, build_mating_pool, end_generation, evaluate, mutate,
    next_generation, tick,
};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn config(population_size: usize, lifespan: usize) -> SimConfig {
    SimConfig {
        population_size,
        lifespan,
        ..Default::default()
    }
}

#[test]
fn population_and_gene_sizes_hold_across_generations() {
    let mut state = SimState::new(config(30, 40)).unwrap();
    apply(&mut state, Command::GenerateRandomTrack);
    let mut generations = 0;
    while generations < 5 {
        if tick(&mut state).is_some() {
            generations += 1;
        }
        assert_eq!(state.population.len(), 30);
    }
    assert_eq!(state.generation, 6);
    assert!(state.population.iter().all(|a| a.gene().len() == 40));
}

#[test]
fn elites_survive_unchanged() {
    let mut state = SimState::new(config(25, 60)).unwrap();
    while state.tick + 1 < 60 {
        tick(&mut state);
    }

    let mut scored = state.population.clone();
    evaluate(&mut scored, &state.config);
    let elites: Vec<Gene> = elite_indices(&scored, state.config.elite_count)
        .into_iter()
        .map(|i| scored[i].gene().clone())
        .collect();

    end_generation(&mut state);
    for elite in &elites {
        assert!(
            state.population.iter().any(|a| a.gene() == elite),
            "elite gene missing from next generation"
        );
    }
}

#[test]
fn next_generation_owns_every_gene() {
    let mut state = SimState::new(config(25, 60)).unwrap();
    while state.tick + 1 < 60 {
        tick(&mut state);
    }
    let mut scored = state.population.clone();
    evaluate(&mut scored, &state.config);

    let mut rng = Pcg32::seed_from_u64(77);
    let next = next_generation(&scored, &state.config, &mut rng);
    assert_eq!(next.len(), 25);
    for child in &next {
        for parent in &scored {
            assert!(!std::ptr::eq(child.gene().forces(), parent.gene().forces()));
        }
    }
}

#[test]
fn mutation_never_touches_source_gene() {
    let mut state = SimState::new(config(10, 30)).unwrap();
    while tick(&mut state).is_none() {}
    let elite = state.population[0].gene().clone();
    let mut rng = Pcg32::seed_from_u64(1);
    let mutated = mutate(state.population[0].gene(), &mut rng, 1.0, 0.5);
    assert_ne!(&mutated, state.population[0].gene());
    assert_eq!(state.population[0].gene(), &elite);
}

#[test]
fn agent_flying_straight_reaches_target() {
    let cfg = SimConfig {
        population_size: 10,
        initial_obstacles: Vec::new(),
        ..Default::default()
    };
    let lifespan = cfg.lifespan;
    let target = cfg.target;
    let mut state = SimState::new(cfg).unwrap();
    let straight_up = Gene::from_forces(vec![Vec2::new(0.0, -0.5); lifespan]);
    state.population[0] = Agent::new(straight_up, state.config.start);

    let mut completed_at = None;
    for t in 0..(lifespan as u32 - 1) {
        tick(&mut state);
        let rocket = &state.population[0];
        if rocket.is_completed() {
            completed_at.get_or_insert(t);
            assert_eq!(rocket.pos, target);
        }
    }

    assert!(completed_at.is_some());
    let rocket = &state.population[0];
    assert!(rocket.is_completed());

    let field = state.distance_field();
    let (tc, tr) = field.dims().cell_of(target).unwrap();
    assert_eq!(field.distance(tc, tr), Some(0));
    assert_eq!(field.distance(tc, tr + 1), Some(1));
    let adjacent_min = [(tc + 1, tr), (tc - 1, tr), (tc, tr + 1), (tc, tr - 1)]
        .iter()
        .filter_map(|&(c, r)| field.distance(c, r))
        .min()
        .unwrap();
    assert_eq!(rocket.best_distance, 0);
    assert!(rocket.best_distance < adjacent_min);
}

#[test]
fn population_crashing_at_birth_still_reproduces() {
    // Start inside the default wall so every agent crashes on tick 0
    let cfg = SimConfig {
        population_size: 15,
        lifespan: 10,
        start: Vec2::new(400.0, 310.0),
        ..Default::default()
    };
    let mut state = SimState::new(cfg).unwrap();
    tick(&mut state);
    assert!(state.population.iter().all(|a| a.is_crashed()));

    let mut scored = state.population.clone();
    evaluate(&mut scored, &state.config);
    // Equal raw scores normalize to 1.0 each, so the proportional pool is
    // used rather than the uniform fallback
    assert!(scored.iter().all(|a| a.fitness == 1.0));
    let pool = build_mating_pool(&scored, state.config.mating_pool_scale);
    assert_eq!(pool.len(), 15 * 100);

    while tick(&mut state).is_none() {}
    assert_eq!(state.population.len(), 15);
    assert_eq!(state.generation, 2);
}

#[test]
fn frozen_crash_position_holds_for_rest_of_generation() {
    let mut state = SimState::new(config(40, 120)).unwrap();
    let mut frozen: Vec<Option<Vec2>> = vec![None; 40];
    for _ in 0..119 {
        tick(&mut state);
        for (slot, agent) in frozen.iter_mut().zip(&state.population) {
            match *slot {
                Some(pos) => assert_eq!(agent.pos, pos),
                None if agent.is_terminal() => *slot = Some(agent.pos),
                None => {}
            }
        }
    }
}

#[test]
fn same_seed_same_evolution() {
    let run = || {
        let mut state = SimState::new(config(20, 30)).unwrap();
        let mut summaries = Vec::new();
        while summaries.len() < 3 {
            if let Some(s) = tick(&mut state) {
                summaries.push(s);
            }
        }
        summaries
    };
    assert_eq!(run(), run());
}
