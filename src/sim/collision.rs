//! Terminal-state checks for a freshly moved agent
//!
//! Checked in order: target capture, obstacle hit, arena exit. Only the first
//! match counts.

use glam::Vec2;

use super::obstacle::ObstacleField;

/// Outcome of checking an agent's new position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Nothing touched; keep flying
    Clear,
    /// Within capture radius of the target
    Target,
    /// Inside an obstacle
    Obstacle,
    /// Outside the arena rectangle
    OutOfBounds,
}

impl Contact {
    /// True for contacts that end the agent's flight with a crash
    pub fn is_crash(self) -> bool {
        matches!(self, Contact::Obstacle | Contact::OutOfBounds)
    }
}

/// Classify `pos` against the target, obstacles and arena bounds
pub fn check_contact(
    pos: Vec2,
    field: &ObstacleField,
    capture_radius: f32,
    arena_size: Vec2,
) -> Contact {
    if pos.distance(field.target()) < capture_radius {
        Contact::Target
    } else if field.blocks(pos) {
        Contact::Obstacle
    } else if pos.x < 0.0 || pos.y < 0.0 || pos.x > arena_size.x || pos.y > arena_size.y {
        Contact::OutOfBounds
    } else {
        Contact::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    fn field() -> ObstacleField {
        ObstacleField::new(
            vec![Obstacle::new(200.0, 300.0, 400.0, 20.0)],
            Vec2::new(400.0, 50.0),
        )
    }

    const ARENA: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_capture_radius() {
        let f = field();
        assert_eq!(check_contact(Vec2::new(410.0, 50.0), &f, 15.0, ARENA), Contact::Target);
        assert_eq!(check_contact(Vec2::new(415.0, 50.0), &f, 15.0, ARENA), Contact::Clear);
    }

    #[test]
    fn test_obstacle_hit() {
        let f = field();
        let c = check_contact(Vec2::new(300.0, 310.0), &f, 15.0, ARENA);
        assert_eq!(c, Contact::Obstacle);
        assert!(c.is_crash());
    }

    #[test]
    fn test_out_of_bounds() {
        let f = field();
        for p in [
            Vec2::new(-0.1, 100.0),
            Vec2::new(800.1, 100.0),
            Vec2::new(100.0, -0.1),
            Vec2::new(100.0, 600.1),
        ] {
            assert_eq!(check_contact(p, &f, 15.0, ARENA), Contact::OutOfBounds);
        }
        // Edges are still inside
        assert_eq!(check_contact(Vec2::new(800.0, 600.0), &f, 15.0, ARENA), Contact::Clear);
    }

    #[test]
    fn test_capture_wins_over_obstacle() {
        let f = ObstacleField::new(
            vec![Obstacle::new(380.0, 30.0, 40.0, 40.0)],
            Vec2::new(400.0, 50.0),
        );
        assert_eq!(check_contact(Vec2::new(401.0, 51.0), &f, 15.0, ARENA), Contact::Target);
    }
}
