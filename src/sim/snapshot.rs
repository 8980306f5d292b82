//! Read-only views handed to the host each frame
//!
//! The engine never draws; it only exposes these serializable records.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::AgentStatus;
use super::distance::DistanceSample;
use super::obstacle::Obstacle;
use super::state::SimState;
use crate::heading;

/// Telemetry emitted once per generation boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation that just ended (1-based)
    pub generation: u32,
    /// Progress score of the fittest agent (0-100)
    pub progress: u32,
    /// Agents that did not crash
    pub alive_count: usize,
    /// Agents that reached the target
    pub completed_count: usize,
    pub best_raw_fitness: f32,
}

/// Render data for one agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub pos: Vec2,
    /// Direction of travel in radians
    pub heading: f32,
    pub status: AgentStatus,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u32,
    pub tick: u32,
    pub running: bool,
    pub speed: u32,
    pub completed_count: usize,
    pub agents: Vec<AgentView>,
    pub obstacles: Vec<Obstacle>,
    pub target: Vec2,
    pub cell_size: f32,
    /// Reachable distance-field cells, only when the overlay is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_samples: Option<Vec<DistanceSample>>,
}

impl Snapshot {
    pub fn capture(state: &SimState) -> Self {
        let agents = state
            .population
            .iter()
            .map(|a| AgentView {
                pos: a.pos,
                heading: heading(a.vel),
                status: a.status,
            })
            .collect();

        let distance_samples = state
            .settings
            .show_heatmap
            .then(|| state.distance_field().samples().collect());

        Self {
            generation: state.generation,
            tick: state.tick,
            running: state.running,
            speed: state.settings.speed,
            completed_count: state.completed_count(),
            agents,
            obstacles: state.obstacles().to_vec(),
            target: state.target(),
            cell_size: state.config.cell_size,
            distance_samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn state() -> SimState {
        SimState::new(SimConfig {
            population_size: 5,
            lifespan: 10,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_capture_mirrors_state() {
        let s = state();
        let snap = Snapshot::capture(&s);
        assert_eq!(snap.agents.len(), 5);
        assert_eq!(snap.obstacles, s.obstacles());
        assert_eq!(snap.target, s.target());
        assert!(snap.distance_samples.is_none());
        assert!(snap.agents.iter().all(|a| a.status == AgentStatus::Alive));
    }

    #[test]
    fn test_heatmap_samples_included_when_enabled() {
        let mut s = state();
        s.settings.show_heatmap = true;
        let snap = Snapshot::capture(&s);
        let samples = snap.distance_samples.expect("samples enabled");
        assert_eq!(samples.len(), s.distance_field().reachable_count());
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&Snapshot::capture(&state())).unwrap();
        assert!(json.contains("\"agents\""));
        assert!(!json.contains("distance_samples"));
    }
}
