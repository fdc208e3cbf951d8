use super::*;

impl CellGrid {
    // === Index conversion ===
    #[inline]
    pub fn index(&self, col: u32, row: u32) -> usize {
        (row as usize) * (self.cols as usize) + col as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let cols = self.cols.max(1) as usize;
        ((idx % cols) as u32, (idx / cols) as u32)
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols as i32 && row >= 0 && row < self.rows as i32
    }

    /// Linear index scaled to `[0, 1]`.
    #[inline]
    pub fn normalized_index(&self, idx: usize) -> f64 {
        if self.count <= 1 {
            return 0.0;
        }
        idx as f64 / (self.count - 1) as f64
    }

    /// Cell containing a viewport point, if any.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        let pitch = self.pitch();
        let col = ((x - self.origin_x) / pitch).floor();
        let row = ((y - self.origin_y) / pitch).floor();
        if !col.is_finite() || !row.is_finite() {
            return None;
        }
        let (col, row) = (col as i32, row as i32);
        self.in_bounds(col, row).then_some((col as u32, row as u32))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::config::GridConfig;
    use crate::spatial::grid::CellGrid;

    #[test]
    fn index_and_coords_are_inverse() {
        let g = CellGrid::new(&GridConfig::default(), 333.0, 222.0);
        for idx in [0, 1, g.cols() as usize, g.count() - 1] {
            let (c, r) = g.coords(idx);
            assert_eq!(g.index(c, r), idx);
        }
        assert_eq!(g.normalized_index(0), 0.0);
        assert_eq!(g.normalized_index(g.count() - 1), 1.0);
    }

    #[test]
    fn cell_at_finds_the_cell_under_its_center() {
        let g = CellGrid::new(&GridConfig::default(), 400.0, 300.0);
        let (cx, cy) = g.cell_center(5, 3);
        assert_eq!(g.cell_at(cx, cy), Some((5, 3)));
        assert_eq!(g.cell_at(-10_000.0, 0.0), None);
    }
}
