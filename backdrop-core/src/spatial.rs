//! Uniform grid for neighbour queries within a fixed radius.

use glam::Vec2;

use crate::types::Bounds;

/// Upper limit on columns and rows. Wider extents get larger cells instead.
pub const MAX_CELLS_PER_AXIS: usize = 64;

/// Buckets points into square cells of side `cell_size`.
///
/// Two points closer than `cell_size` always land in the same or adjacent
/// cells, so a radius query only needs the 3×3 neighbourhood. Points outside
/// the bounds are clamped into the border cells, which keeps that property.
#[derive(Debug, Default)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Point indices per cell, row-major.
    cells: Vec<Vec<usize>>,
    /// Cell of each point, by point index.
    point_cells: Vec<(usize, usize)>,
}

impl SpatialGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-buckets `points` for the given bounds and cell size.
    ///
    /// Cell storage is reused across calls. A non-positive or NaN
    /// `cell_size` leaves the grid empty.
    ///
    /// ### Parameters
    /// - `bounds` - Region to cover. A non-finite extent counts as zero, so
    ///   every point ends up clamped into the border cells.
    /// - `cell_size` - Minimum cell side, normally the query radius. It is
    ///   raised when the grid would need more than [`MAX_CELLS_PER_AXIS`]
    ///   cells along an axis; larger cells keep every close pair adjacent.
    /// - `points` - Positions to bucket, indexed in iteration order.
    pub fn rebuild(&mut self, bounds: Bounds, cell_size: f32, points: impl Iterator<Item = Vec2>) {
        self.point_cells.clear();
        for cell in &mut self.cells {
            cell.clear();
        }

        if !(cell_size > 0.0) {
            self.cols = 0;
            self.rows = 0;
            return;
        }

        let extent = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let (width, height) = (extent(bounds.width), extent(bounds.height));
        let cell_size = cell_size.max(width.max(height) / MAX_CELLS_PER_AXIS as f32);

        self.cell_size = cell_size;
        self.cols = Self::cells_along(width, cell_size);
        self.rows = Self::cells_along(height, cell_size);
        self.cells.resize_with(self.cols * self.rows, Vec::new);

        for (i, p) in points.enumerate() {
            let (cx, cy) = self.cell_of(p);
            self.cells[cy * self.cols + cx].push(i);
            self.point_cells.push((cx, cy));
        }
    }

    fn cells_along(extent: f32, cell_size: f32) -> usize {
        ((extent / cell_size).floor() as usize).min(MAX_CELLS_PER_AXIS - 1) + 1
    }

    fn cell_of(&self, p: Vec2) -> (usize, usize) {
        // `as usize` saturates negatives and NaN to 0.
        let cx = ((p.x / self.cell_size).floor() as usize).min(self.cols - 1);
        let cy = ((p.y / self.cell_size).floor() as usize).min(self.rows - 1);
        (cx, cy)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Side of one cell after the last rebuild.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Calls `f(a, b)` once for every pair `a < b` of points in the same or
    /// neighbouring cells.
    pub fn for_each_candidate_pair(&self, mut f: impl FnMut(usize, usize)) {
        for (a, &(cx, cy)) in self.point_cells.iter().enumerate() {
            let x0 = cx.saturating_sub(1);
            let y0 = cy.saturating_sub(1);
            let x1 = (cx + 1).min(self.cols - 1);
            let y1 = (cy + 1).min(self.rows - 1);

            for ny in y0..=y1 {
                for nx in x0..=x1 {
                    for &b in &self.cells[ny * self.cols + nx] {
                        if b > a {
                            f(a, b);
                        }
                    }
                }
            }
        }
    }
}
