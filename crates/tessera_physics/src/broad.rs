//! # Broad Phase
//!
//! Uniform grid over the simulation area. Each inserted box is listed in
//! every cell it touches; two boxes are candidates only when they share a
//! cell and their boxes actually intersect.
//!
//! The grid is rebuilt every step: [`UniformGrid::clear`] keeps the cell
//! allocations, so steady-state rebuilds do not allocate.

use crate::aabb::Aabb;
use crate::error::{PhysicsError, PhysicsResult};

/// Fixed-size grid of square cells starting at the origin.
///
/// Boxes reaching past the grid edge are folded into the border cells.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    cell_size: f64,
    cols: usize,
    rows: usize,
    /// Indices into `entries`, one list per cell, row-major.
    cells: Vec<Vec<usize>>,
    entries: Vec<(usize, Aabb)>,
}

impl UniformGrid {
    /// Largest number of cells a grid may have.
    pub const MAX_CELLS: usize = 1 << 20;

    /// Creates a `cols` × `rows` grid of `cell_size` cells.
    ///
    /// # Errors
    ///
    /// [`PhysicsError::EmptyGrid`] when either dimension is zero,
    /// [`PhysicsError::GridTooLarge`] when `cols * rows` exceeds
    /// [`UniformGrid::MAX_CELLS`] and [`PhysicsError::InvalidCellSize`] when
    /// the cell size is not a positive finite number.
    pub fn new(cell_size: f64, cols: usize, rows: usize) -> PhysicsResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(PhysicsError::InvalidCellSize(cell_size));
        }
        if cols == 0 || rows == 0 {
            return Err(PhysicsError::EmptyGrid { cols, rows });
        }
        let cell_count = match cols.checked_mul(rows) {
            Some(count) if count <= Self::MAX_CELLS => count,
            _ => return Err(PhysicsError::GridTooLarge { cols, rows }),
        };
        Ok(Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cell_count],
            entries: Vec::new(),
        })
    }

    /// Creates the smallest grid of `cell_size` cells covering
    /// `width` × `height`.
    ///
    /// # Errors
    ///
    /// Same as [`UniformGrid::new`].
    pub fn covering(width: f64, height: f64, cell_size: f64) -> PhysicsResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(PhysicsError::InvalidCellSize(cell_size));
        }
        let cols = (width / cell_size).ceil();
        let rows = (height / cell_size).ceil();
        let limit = Self::MAX_CELLS as f64;
        if cols > limit || rows > limit {
            // Float to int casts saturate.
            return Err(PhysicsError::GridTooLarge {
                cols: cols as usize,
                rows: rows as usize,
            });
        }
        Self::new(cell_size, cols.max(0.0) as usize, rows.max(0.0) as usize)
    }

    /// Side length of one cell.
    #[must_use]
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of boxes inserted since the last clear.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been inserted since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every box, keeping cell capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Adds `bounds` under `key`.
    pub fn insert(&mut self, key: usize, bounds: Aabb) {
        let entry = self.entries.len();
        self.entries.push((key, bounds));

        let (c0, r0) = self.cell_of(bounds.top_left.x, bounds.top_left.y);
        let (c1, r1) = self.cell_of(bounds.bottom_right.x, bounds.bottom_right.y);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.cells[row * self.cols + col].push(entry);
            }
        }
    }

    /// Unordered pairs of keys whose boxes share a cell and intersect.
    ///
    /// Each pair appears once as `(smaller, larger)`; the list is sorted.
    #[must_use]
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for cell in &self.cells {
            for (i, &first) in cell.iter().enumerate() {
                let (a, a_bounds) = self.entries[first];
                for &second in &cell[i + 1..] {
                    let (b, b_bounds) = self.entries[second];
                    if a != b && a_bounds.intersects(&b_bounds) {
                        pairs.push((a.min(b), a.max(b)));
                    }
                }
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    /// Keys whose boxes contain `(x, y)`.
    #[must_use]
    pub fn query_point(&self, x: f64, y: f64) -> Vec<usize> {
        let (col, row) = self.cell_of(x, y);
        self.cells[row * self.cols + col]
            .iter()
            .map(|&entry| self.entries[entry])
            .filter(|(_, bounds)| bounds.hit_test(x, y))
            .map(|(key, _)| key)
            .collect()
    }

    fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        let col = (x / self.cell_size).floor().max(0.0) as usize;
        let row = (y / self.cell_size).floor().max(0.0) as usize;
        (col.min(self.cols - 1), row.min(self.rows - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            UniformGrid::new(10.0, 0, 4).unwrap_err(),
            PhysicsError::EmptyGrid { cols: 0, rows: 4 }
        );
        assert!(matches!(
            UniformGrid::new(0.0, 4, 4),
            Err(PhysicsError::InvalidCellSize(_))
        ));
        assert!(matches!(
            UniformGrid::new(f64::NAN, 4, 4),
            Err(PhysicsError::InvalidCellSize(_))
        ));
        assert!(matches!(
            UniformGrid::covering(0.0, 100.0, 10.0),
            Err(PhysicsError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_oversized_grids_are_rejected() {
        assert_eq!(
            UniformGrid::new(1.0, usize::MAX, 2).unwrap_err(),
            PhysicsError::GridTooLarge { cols: usize::MAX, rows: 2 }
        );
        assert!(matches!(
            UniformGrid::new(1.0, 2048, 1024),
            Err(PhysicsError::GridTooLarge { .. })
        ));
        assert!(UniformGrid::new(1.0, 1024, 1024).is_ok());

        assert!(matches!(
            UniformGrid::covering(1e10, 1e10, 1.0),
            Err(PhysicsError::GridTooLarge { .. })
        ));
        assert!(matches!(
            UniformGrid::covering(f64::INFINITY, 10.0, 1.0),
            Err(PhysicsError::GridTooLarge { .. })
        ));
        assert!(matches!(
            UniformGrid::covering(f64::NAN, 10.0, 1.0),
            Err(PhysicsError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_covering_rounds_up() {
        let grid = UniformGrid::covering(95.0, 40.0, 10.0).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (10, 4));
    }

    #[test]
    fn test_pairs_deduplicated_across_cells() {
        let mut grid = UniformGrid::new(10.0, 4, 4).unwrap();
        // Both boxes straddle the same four cells.
        grid.insert(7, Aabb::from_center_size(10.0, 10.0, 6.0, 6.0));
        grid.insert(3, Aabb::from_center_size(11.0, 11.0, 6.0, 6.0));

        assert_eq!(grid.candidate_pairs(), vec![(3, 7)]);
    }

    #[test]
    fn test_sharing_a_cell_is_not_enough() {
        let mut grid = UniformGrid::new(100.0, 1, 1).unwrap();
        grid.insert(0, Aabb::from_center_size(10.0, 10.0, 2.0, 2.0));
        grid.insert(1, Aabb::from_center_size(50.0, 50.0, 2.0, 2.0));
        assert!(grid.candidate_pairs().is_empty());
    }

    #[test]
    fn test_out_of_range_boxes_fold_into_border() {
        let mut grid = UniformGrid::new(10.0, 2, 2).unwrap();
        grid.insert(0, Aabb::from_center_size(-5.0, -5.0, 4.0, 4.0));
        grid.insert(1, Aabb::from_center_size(-4.0, -4.0, 4.0, 4.0));
        grid.insert(2, Aabb::from_center_size(100.0, 100.0, 4.0, 4.0));
        assert_eq!(grid.candidate_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_clear_and_query_point() {
        let mut grid = UniformGrid::new(10.0, 3, 3).unwrap();
        grid.insert(4, Aabb::from_center_size(15.0, 15.0, 4.0, 4.0));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.query_point(15.0, 15.0), vec![4]);
        assert!(grid.query_point(5.0, 5.0).is_empty());

        grid.clear();
        assert!(grid.is_empty());
        assert!(grid.query_point(15.0, 15.0).is_empty());
    }
}
