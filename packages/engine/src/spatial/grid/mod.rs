//! Cell grid - rows × columns covering the viewport plus a margin
//!
//! The grid only knows geometry: how many cells, where each one sits, and the
//! deterministic seeds derived from its coordinates. It is rebuilt when the
//! column/row count changes and left alone otherwise.

use crate::domain::config::GridConfig;

mod cell;
mod indexing;

pub use cell::{Cell, SEED_A, SEED_B};

#[derive(Clone, Debug, PartialEq)]
pub struct CellGrid {
    cols: u32,
    rows: u32,
    count: usize,

    cell_size: f64,
    gap: f64,
    margin: u32,
    centered: bool,

    // Viewport in CSS pixels
    width: f64,
    height: f64,
    origin_x: f64,
    origin_y: f64,
}

impl CellGrid {
    /// Grid covering a `width × height` viewport.
    pub fn new(config: &GridConfig, width: f64, height: f64) -> Self {
        let mut grid = Self {
            cols: 0,
            rows: 0,
            count: 0,
            cell_size: config.cell_size,
            gap: config.gap,
            margin: config.margin_cells,
            centered: config.centered,
            width: 0.0,
            height: 0.0,
            origin_x: 0.0,
            origin_y: 0.0,
        };
        grid.layout(width, height);
        grid
    }

    /// Re-derive the layout for a new viewport size.
    ///
    /// Returns `true` when the column/row count changed, i.e. when anything
    /// keyed by cell (instance buffers, effect maps) has to be rebuilt.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let before = (self.cols, self.rows);
        self.layout(width, height);
        before != (self.cols, self.rows)
    }

    fn layout(&mut self, width: f64, height: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.width = width;
        self.height = height;

        if width == 0.0 || height == 0.0 {
            self.cols = 0;
            self.rows = 0;
            self.count = 0;
            self.origin_x = 0.0;
            self.origin_y = 0.0;
            return;
        }

        let pitch = self.pitch();
        self.cols = (width / pitch).ceil() as u32 + 2 * self.margin;
        self.rows = (height / pitch).ceil() as u32 + 2 * self.margin;
        self.count = (self.cols as usize) * (self.rows as usize);

        if self.centered {
            let grid_w = self.cols as f64 * pitch - self.gap;
            let grid_h = self.rows as f64 * pitch - self.gap;
            self.origin_x = (width - grid_w) * 0.5;
            self.origin_y = (height - grid_h) * 0.5;
        } else {
            self.origin_x = -(self.margin as f64) * pitch;
            self.origin_y = -(self.margin as f64) * pitch;
        }
    }

    /// Distance between neighbouring cell origins.
    #[inline]
    pub fn pitch(&self) -> f64 {
        self.cell_size + self.gap
    }

    #[inline]
    pub fn cols(&self) -> u32 { self.cols }

    #[inline]
    pub fn rows(&self) -> u32 { self.rows }

    #[inline]
    pub fn count(&self) -> usize { self.count }

    #[inline]
    pub fn cell_size(&self) -> f64 { self.cell_size }

    #[inline]
    pub fn width(&self) -> f64 { self.width }

    /// Top-left of cell (0, 0). Moves with the viewport when centered, even
    /// if the column/row count does not change.
    #[inline]
    pub fn origin(&self) -> (f64, f64) { (self.origin_x, self.origin_y) }

    #[inline]
    pub fn height(&self) -> f64 { self.height }

    /// Zero-size viewport: nothing can be drawn until a real size arrives.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Top-left corner of a cell in viewport pixels.
    #[inline]
    pub fn cell_origin(&self, col: u32, row: u32) -> (f64, f64) {
        let pitch = self.pitch();
        (
            self.origin_x + col as f64 * pitch,
            self.origin_y + row as f64 * pitch,
        )
    }

    /// Center of a cell in viewport pixels.
    #[inline]
    pub fn cell_center(&self, col: u32, row: u32) -> (f64, f64) {
        let (x, y) = self.cell_origin(col, row);
        let half = self.cell_size * 0.5;
        (x + half, y + half)
    }

    pub fn cell(&self, col: u32, row: u32) -> Cell {
        Cell::new(self, col, row)
    }

    /// Every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.cell(col, row)))
    }
}
