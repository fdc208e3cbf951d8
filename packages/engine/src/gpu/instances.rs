use crate::spatial::CellGrid;

// Components per instance for each attribute
pub const OFFSET_COMPONENTS: usize = 2;
pub const INDEX_COMPONENTS: usize = 1;
pub const SEED_COMPONENTS: usize = 2;
pub const POSITION_COMPONENTS: usize = 2;

/// Per-instance attribute arrays, structure-of-arrays, row-major.
///
/// Built once per grid layout change and uploaded as instanced vertex
/// attributes; everything that varies per frame goes through uniforms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceBuffers {
    count: usize,
    /// Cell top-left in CSS pixels (x, y).
    pub offsets: Vec<f32>,
    /// Linear index normalized to [0, 1].
    pub indices: Vec<f32>,
    /// The two per-cell seeds, identical to the CPU `Cell` seeds.
    pub seeds: Vec<f32>,
    /// Grid coordinates (col, row).
    pub positions: Vec<f32>,
}

impl InstanceBuffers {
    pub fn build(grid: &CellGrid) -> Self {
        let count = grid.count();
        let mut buffers = Self {
            count,
            offsets: Vec::with_capacity(count * OFFSET_COMPONENTS),
            indices: Vec::with_capacity(count * INDEX_COMPONENTS),
            seeds: Vec::with_capacity(count * SEED_COMPONENTS),
            positions: Vec::with_capacity(count * POSITION_COMPONENTS),
        };

        for cell in grid.cells() {
            buffers.offsets.extend_from_slice(&[cell.x as f32, cell.y as f32]);
            buffers.indices.push(grid.normalized_index(cell.index) as f32);
            buffers.seeds.extend_from_slice(&[cell.seed_a as f32, cell.seed_b as f32]);
            buffers.positions.extend_from_slice(&[cell.col as f32, cell.row as f32]);
        }
        buffers
    }

    /// Instance count (`cols * rows`).
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `(col, row)` stored for instance `i`.
    pub fn grid_position(&self, i: usize) -> Option<(u32, u32)> {
        let base = i.checked_mul(POSITION_COMPONENTS)?;
        let p = self.positions.get(base..base + POSITION_COMPONENTS)?;
        Some((p[0] as u32, p[1] as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::GridConfig;
    use crate::noise::seeded_random;
    use crate::spatial::grid::{SEED_A, SEED_B};

    #[test]
    fn arrays_have_matching_lengths() {
        for &(w, h) in &[(1.0, 1.0), (640.0, 480.0), (1920.0, 1080.0)] {
            let grid = CellGrid::new(&GridConfig::default(), w, h);
            let b = InstanceBuffers::build(&grid);
            let n = grid.count();
            assert_eq!(b.len(), (grid.cols() * grid.rows()) as usize);
            assert_eq!(b.offsets.len(), n * OFFSET_COMPONENTS);
            assert_eq!(b.indices.len(), n * INDEX_COMPONENTS);
            assert_eq!(b.seeds.len(), n * SEED_COMPONENTS);
            assert_eq!(b.positions.len(), n * POSITION_COMPONENTS);
        }
    }

    #[test]
    fn positions_reconstruct_row_major_coordinates() {
        let grid = CellGrid::new(&GridConfig::default(), 300.0, 200.0);
        let b = InstanceBuffers::build(&grid);
        let mut i = 0;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                assert_eq!(b.grid_position(i), Some((col, row)));
                i += 1;
            }
        }
        assert_eq!(b.grid_position(i), None);
    }

    #[test]
    fn seeds_match_the_cpu_hash() {
        let grid = CellGrid::new(&GridConfig::default(), 300.0, 200.0);
        let b = InstanceBuffers::build(&grid);
        for i in [0usize, 7, b.len() - 1] {
            let (col, row) = b.grid_position(i).unwrap();
            let a = seeded_random(col as f64, row as f64, SEED_A) as f32;
            let s = seeded_random(col as f64, row as f64, SEED_B) as f32;
            assert_eq!(b.seeds[i * 2], a);
            assert_eq!(b.seeds[i * 2 + 1], s);
        }
    }

    #[test]
    fn empty_grid_builds_empty_buffers() {
        let grid = CellGrid::new(&GridConfig::default(), 0.0, 0.0);
        let b = InstanceBuffers::build(&grid);
        assert!(b.is_empty());
        assert!(b.offsets.is_empty());
    }
}
