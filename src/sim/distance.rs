//! Obstacle-aware distance field
//!
//! A coarse grid laid over the arena where each cell holds the length of the
//! shortest 4-connected path (in cells) to the target's cell. A cell is
//! blocked when its center lies inside an obstacle. The field is only used
//! to score agents after the fact; agents never read it while flying.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// Value stored in cells that cannot reach the target
pub const UNREACHABLE: u32 = u32::MAX;

/// Largest grid the engine will allocate
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Grid shape and cell size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridDims {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f32,
}

impl GridDims {
    /// Cover a `width` x `height` arena, rounding partial cells up
    pub fn for_arena(width: f32, height: f32, cell_size: f32) -> Self {
        Self {
            cols: (width / cell_size).ceil() as usize,
            rows: (height / cell_size).ceil() as usize,
            cell_size,
        }
    }

    /// Like [`GridDims::for_arena`], but `None` for non-finite inputs or a
    /// grid larger than [`MAX_GRID_CELLS`]
    pub fn try_for_arena(width: f32, height: f32, cell_size: f32) -> Option<Self> {
        let cols = (width / cell_size).ceil();
        let rows = (height / cell_size).ceil();
        if !(cols.is_finite() && rows.is_finite() && cols >= 0.0 && rows >= 0.0) {
            return None;
        }
        let dims = Self::for_arena(width, height, cell_size);
        dims.cols
            .checked_mul(dims.rows)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .map(|_| dims)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell containing `p`, or `None` outside the grid
    pub fn cell_of(&self, p: Vec2) -> Option<(usize, usize)> {
        if !p.is_finite() {
            return None;
        }
        let col = (p.x / self.cell_size).floor();
        let row = (p.y / self.cell_size).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as usize, row as usize))
    }

    /// Arena-space center of a cell
    #[inline]
    pub fn center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            col as f32 * self.cell_size + self.cell_size / 2.0,
            row as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }
}

/// One reachable cell, for overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceSample {
    pub col: usize,
    pub row: usize,
    pub distance: u32,
}

/// Shortest-path distance (in cells) from every cell to the target cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceField {
    dims: GridDims,
    cells: Vec<u32>,
}

impl DistanceField {
    /// Breadth-first distance transform seeded at the target's cell
    ///
    /// A target outside the grid seeds nothing and every cell stays
    /// [`UNREACHABLE`]. The target cell itself is always seeded, even when an
    /// obstacle covers its center.
    pub fn compute(obstacles: &[Obstacle], target: Vec2, dims: GridDims) -> Self {
        let mut cells = vec![UNREACHABLE; dims.len()];
        let mut queue = VecDeque::new();

        if let Some((tc, tr)) = dims.cell_of(target) {
            cells[dims.index(tc, tr)] = 0;
            queue.push_back((tc, tr));
        }

        while let Some((col, row)) = queue.pop_front() {
            let dist = cells[dims.index(col, row)];
            let neighbors = [
                (col.checked_add(1), Some(row)),
                (col.checked_sub(1), Some(row)),
                (Some(col), row.checked_add(1)),
                (Some(col), row.checked_sub(1)),
            ];
            for (nc, nr) in neighbors {
                let (Some(nc), Some(nr)) = (nc, nr) else {
                    continue;
                };
                if nc >= dims.cols || nr >= dims.rows {
                    continue;
                }
                let idx = dims.index(nc, nr);
                if cells[idx] != UNREACHABLE {
                    continue;
                }
                let center = dims.center(nc, nr);
                if obstacles.iter().any(|o| o.contains(center)) {
                    continue;
                }
                cells[idx] = dist + 1;
                queue.push_back((nc, nr));
            }
        }

        let field = Self { dims, cells };
        log::debug!(
            "Distance field {}x{}: {} reachable cells",
            dims.cols,
            dims.rows,
            field.reachable_count()
        );
        field
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Raw cell value ([`UNREACHABLE`] included), `None` outside the grid
    pub fn cell(&self, col: usize, row: usize) -> Option<u32> {
        if col >= self.dims.cols || row >= self.dims.rows {
            return None;
        }
        Some(self.cells[self.dims.index(col, row)])
    }

    /// Distance of a reachable cell
    pub fn distance(&self, col: usize, row: usize) -> Option<u32> {
        self.cell(col, row).filter(|&d| d != UNREACHABLE)
    }

    /// Raw value of the cell under an arena point, `None` outside the grid
    pub fn sample(&self, p: Vec2) -> Option<u32> {
        let (col, row) = self.dims.cell_of(p)?;
        self.cell(col, row)
    }

    pub fn reachable_count(&self) -> usize {
        self.cells.iter().filter(|&&d| d != UNREACHABLE).count()
    }

    /// Every reachable cell with its distance, row-major
    pub fn samples(&self) -> impl Iterator<Item = DistanceSample> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, &distance)| {
            (distance != UNREACHABLE).then(|| DistanceSample {
                col: i % self.dims.cols,
                row: i / self.dims.cols,
                distance,
            })
        })
    }
}
