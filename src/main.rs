//! Evo Rockets entry point
//!
//! Native builds run the simulation headless and log one line per
//! generation. The browser build is driven through `evo_rockets::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use evo_rockets::SimConfig;
    use evo_rockets::sim::{SimState, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Evo Rockets (native) starting...");

    // Usage: evo-rockets [config.json] [generations]
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(&path)?)?,
        None => SimConfig::default(),
    };
    let generations: u32 = match args.next() {
        Some(n) => n.parse()?,
        None => 20,
    };

    let mut state = SimState::new(config)?;
    let mut finished = 0;
    while finished < generations {
        if let Some(summary) = tick(&mut state) {
            finished += 1;
            println!(
                "gen {:>4}  progress {:>3}  alive {:>4}  completed {:>4}",
                summary.generation, summary.progress, summary.alive_count, summary.completed_count
            );
        }
    }

    log::info!(
        "Finished {} generations, best progress {}",
        generations,
        state.history.best_progress()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
