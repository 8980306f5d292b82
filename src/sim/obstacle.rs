//! Obstacle geometry and the obstacle field
//!
//! Obstacles are axis-aligned rectangles in arena coordinates. The field
//! owns them together with the target point; every mutation reports whether
//! the distance field needs recomputing.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two opposite corners given in any order
    /// (e.g. the start and end of a pointer drag)
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Strict interior test; points on the border are outside
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.width && p.y > self.y && p.y < self.y + self.height
    }

    /// Both sides must exceed `min_size`
    #[inline]
    pub fn is_valid(&self, min_size: f32) -> bool {
        self.width > min_size && self.height > min_size
    }
}

/// Random track layout
const TRACK_WALLS: usize = 4;
const TRACK_WALL_HEIGHT: f32 = 15.0;
const TRACK_GAP: f32 = 160.0;
const TRACK_START_Y: f32 = 500.0;
const TRACK_END_Y: f32 = 100.0;
const TRACK_SIDE_MARGIN: f32 = 50.0;

/// Obstacles plus the target they are scored against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    target: Vec2,
}

impl ObstacleField {
    pub fn new(obstacles: Vec<Obstacle>, target: Vec2) -> Self {
        Self { obstacles, target }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// True if `p` lies strictly inside any obstacle
    pub fn blocks(&self, p: Vec2) -> bool {
        self.obstacles.iter().any(|o| o.contains(p))
    }

    /// Add an obstacle if it is large enough. Returns whether it was accepted.
    pub fn add(&mut self, obstacle: Obstacle, min_size: f32) -> bool {
        if !obstacle.is_valid(min_size) {
            log::debug!(
                "Rejected obstacle {}x{} (minimum {})",
                obstacle.width,
                obstacle.height,
                min_size
            );
            return false;
        }
        self.obstacles.push(obstacle);
        true
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Replace the whole obstacle set
    pub fn replace(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }
}

/// Generate a track of horizontal walls, each with a single gap
///
/// Walls are spaced evenly between y=500 and y=100; every wall is split into
/// a left and right rectangle around a gap whose position is random.
pub fn random_track<R: Rng + ?Sized>(rng: &mut R, arena_width: f32) -> Vec<Obstacle> {
    let spacing = (TRACK_START_Y - TRACK_END_Y) / TRACK_WALLS as f32;
    let gap_range = (arena_width - TRACK_GAP - 2.0 * TRACK_SIDE_MARGIN).max(0.0);

    let mut walls = Vec::with_capacity(TRACK_WALLS * 2);
    for i in 0..TRACK_WALLS {
        let y = TRACK_START_Y - (i + 1) as f32 * spacing;
        let gap_x = TRACK_SIDE_MARGIN + rng.random::<f32>() * gap_range;
        let right_x = gap_x + TRACK_GAP;
        walls.push(Obstacle::new(0.0, y, gap_x, TRACK_WALL_HEIGHT));
        walls.push(Obstacle::new(right_x, y, arena_width - right_x, TRACK_WALL_HEIGHT));
    }
    walls
}
