//! Browser bindings
//!
//! The host page owns the canvas and the `requestAnimationFrame` loop; it
//! calls [`WebSimulation::frame`] once per display refresh and draws the
//! returned snapshot. Commands and snapshots cross the boundary as JSON.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::config::SimConfig;
use crate::settings::Settings;
use crate::sim::{Command, Obstacle, SimState, Snapshot, apply, run_frame};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Evo Rockets starting...");
}

/// Simulation handle exported to JavaScript
#[wasm_bindgen]
pub struct WebSimulation {
    state: SimState,
}

#[wasm_bindgen]
impl WebSimulation {
    /// Create a simulation with default parameters and the given seed
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<WebSimulation, JsError> {
        let config = SimConfig {
            seed,
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create a simulation from a (partial) JSON config
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<WebSimulation, JsError> {
        Self::with_config(SimConfig::from_json(json)?)
    }

    /// Run one frame's worth of ticks; returns JSON summaries of any
    /// generations that ended during it
    pub fn frame(&mut self) -> String {
        let summaries = run_frame(&mut self.state);
        serde_json::to_string(&summaries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Current snapshot as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&Snapshot::capture(&self.state)).unwrap_or_default()
    }

    /// Apply a JSON-encoded command; false if it was malformed or ignored
    pub fn command(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Command>(json) {
            Ok(command) => self.dispatch(command),
            Err(e) => {
                log::warn!("Ignoring malformed command: {e}");
                false
            }
        }
    }

    #[wasm_bindgen(js_name = drawObstacle)]
    pub fn draw_obstacle(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
        let obstacle = Obstacle::from_corners(Vec2::new(x0, y0), Vec2::new(x1, y1));
        self.dispatch(Command::AddObstacle(obstacle))
    }

    #[wasm_bindgen(js_name = clearObstacles)]
    pub fn clear_obstacles(&mut self) {
        self.dispatch(Command::ClearObstacles);
    }

    #[wasm_bindgen(js_name = generateRandomTrack)]
    pub fn generate_random_track(&mut self) {
        self.dispatch(Command::GenerateRandomTrack);
    }

    #[wasm_bindgen(js_name = setTarget)]
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.dispatch(Command::SetTarget(Vec2::new(x, y)));
    }

    pub fn play(&mut self) {
        self.dispatch(Command::Play);
    }

    pub fn pause(&mut self) {
        self.dispatch(Command::Pause);
    }

    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, speed: u32) {
        self.dispatch(Command::SetSpeed(speed));
    }

    #[wasm_bindgen(js_name = setHeatmap)]
    pub fn set_heatmap(&mut self, enabled: bool) {
        self.dispatch(Command::SetHeatmap(enabled));
    }

    pub fn reset(&mut self) {
        self.dispatch(Command::Reset);
    }

    /// All-time best progress score
    #[wasm_bindgen(js_name = bestProgress)]
    pub fn best_progress(&self) -> u32 {
        self.state.history.best_progress()
    }
}

impl WebSimulation {
    fn with_config(config: SimConfig) -> Result<WebSimulation, JsError> {
        let mut state = SimState::new(config)?;
        state.settings = Settings::load();
        Ok(Self { state })
    }

    fn dispatch(&mut self, command: Command) -> bool {
        let persist = matches!(command, Command::SetSpeed(_) | Command::SetHeatmap(_));
        let accepted = apply(&mut self.state, command);
        if persist {
            self.state.settings.save();
        }
        accepted
    }
}
