//! User commands from the host
//!
//! Commands are applied between frames and take effect immediately,
//! including any distance-field rebuild.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::state::SimState;

/// A single user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "args", rename_all = "snake_case")]
pub enum Command {
    AddObstacle(Obstacle),
    /// Obstacle from the two corners of a pointer drag
    DrawObstacle { from: Vec2, to: Vec2 },
    ClearObstacles,
    GenerateRandomTrack,
    SetTarget(Vec2),
    Play,
    Pause,
    TogglePlay,
    SetSpeed(u32),
    SetHeatmap(bool),
    /// Fresh population, generation 1
    Reset,
}

/// Apply a command; returns false if it was ignored (e.g. an undersized obstacle)
pub fn apply(state: &mut SimState, command: Command) -> bool {
    match command {
        Command::AddObstacle(obstacle) => state.add_obstacle(obstacle),
        Command::DrawObstacle { from, to } => state.add_obstacle(Obstacle::from_corners(from, to)),
        Command::ClearObstacles => {
            state.clear_obstacles();
            true
        }
        Command::GenerateRandomTrack => {
            state.generate_random_track();
            true
        }
        Command::SetTarget(target) => {
            state.set_target(target);
            true
        }
        Command::Play => {
            state.running = true;
            true
        }
        Command::Pause => {
            state.running = false;
            true
        }
        Command::TogglePlay => {
            state.running = !state.running;
            true
        }
        Command::SetSpeed(speed) => {
            state.settings.set_speed(speed);
            true
        }
        Command::SetHeatmap(enabled) => {
            state.settings.show_heatmap = enabled;
            true
        }
        Command::Reset => {
            state.reset_population();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::consts::MAX_SPEED;

    fn state() -> SimState {
        SimState::new(SimConfig {
            population_size: 6,
            lifespan: 20,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_draw_obstacle_any_direction() {
        let mut s = state();
        let accepted = apply(
            &mut s,
            Command::DrawObstacle {
                from: Vec2::new(300.0, 200.0),
                to: Vec2::new(100.0, 150.0),
            },
        );
        assert!(accepted);
        assert_eq!(s.obstacles()[1], Obstacle::new(100.0, 150.0, 200.0, 50.0));
    }

    #[test]
    fn test_tiny_drag_ignored() {
        let mut s = state();
        let accepted = apply(
            &mut s,
            Command::DrawObstacle {
                from: Vec2::new(100.0, 100.0),
                to: Vec2::new(103.0, 180.0),
            },
        );
        assert!(!accepted);
        assert_eq!(s.obstacles().len(), 1);
    }

    #[test]
    fn test_play_pause_speed() {
        let mut s = state();
        apply(&mut s, Command::Play);
        assert!(s.running);
        apply(&mut s, Command::TogglePlay);
        assert!(!s.running);
        apply(&mut s, Command::SetSpeed(500));
        assert_eq!(s.settings.speed, MAX_SPEED);
        apply(&mut s, Command::SetSpeed(0));
        assert_eq!(s.settings.speed, 1);
    }

    #[test]
    fn test_command_json() {
        let cmd: Command =
            serde_json::from_str(r#"{"type":"set_target","args":[120.0,80.0]}"#).unwrap();
        assert_eq!(cmd, Command::SetTarget(Vec2::new(120.0, 80.0)));
        let cmd: Command = serde_json::from_str(r#"{"type":"clear_obstacles"}"#).unwrap();
        assert_eq!(cmd, Command::ClearObstacles);
    }
}
