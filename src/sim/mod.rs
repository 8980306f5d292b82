//! Deterministic simulation module
//!
//! All evolution logic lives here. This module must be pure and deterministic:
//! - One seeded RNG owned by the state
//! - Fixed tick, impulse physics
//! - Distance field rebuilt wholesale on every obstacle/target change
//! - No rendering or platform dependencies

pub mod agent;
pub mod collision;
pub mod command;
pub mod distance;
pub mod fitness;
pub mod obstacle;
pub mod selection;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use agent::{Agent, AgentStatus, Gene};
pub use collision::{Contact, check_contact};
pub use command::{Command, apply};
pub use distance::{DistanceField, DistanceSample, GridDims, UNREACHABLE};
pub use fitness::{Evaluation, evaluate, progress_score};
pub use obstacle::{Obstacle, ObstacleField, random_track};
pub use selection::{build_mating_pool, crossover, mutate, next_generation};
pub use snapshot::{AgentView, GenerationSummary, Snapshot};
pub use state::SimState;
pub use tick::{end_generation, run_frame, tick};
