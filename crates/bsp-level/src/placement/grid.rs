//! Occupancy grid over a room's footprint.

use nalgebra::Point3;

use crate::{Axis, BoundingVolume, ConfigError};

/// Upper bound on the cells of a single placement grid.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Cells closer than this (Chebyshev distance) to an occupied cell are
/// crowded.
pub const MIN_CELL_SPACING: usize = 2;

/// A `(column, row)` cell index. Columns run along X, rows along Z.
pub type Cell = (usize, usize);

/// A 2D boolean occupancy grid laid over the horizontal footprint of a room.
///
/// The grid has at least two cells per axis, so even a tiny room offers a
/// free cell for its first item.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementGrid {
    footprint: BoundingVolume,
    cols: usize,
    rows: usize,
    occupied: Vec<bool>,
}

impl PlacementGrid {
    /// Lays a grid of roughly `cell_size` square cells over `footprint`.
    ///
    /// Returns [`ConfigError::InvalidContentSettings`] if the grid would hold
    /// more than [`MAX_GRID_CELLS`] cells.
    pub fn new(footprint: BoundingVolume, cell_size: f32) -> Result<Self, ConfigError> {
        let (cols, rows) = grid_resolution(&footprint, cell_size)?;
        Ok(Self {
            footprint,
            cols,
            rows,
            occupied: vec![false; cols * rows],
        })
    }

    /// Number of cells along X.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells along Z.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells, occupied or not.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Number of cells holding an item.
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&taken| taken).count()
    }

    /// Returns `true` if `cell` holds an item. Cells outside the grid are
    /// never occupied.
    pub fn is_occupied(&self, (col, row): Cell) -> bool {
        col < self.cols && row < self.rows && self.occupied[col * self.rows + row]
    }

    /// Marks `cell` as holding an item.
    ///
    /// # Panics
    /// Panics if `cell` lies outside the grid.
    pub fn occupy(&mut self, (col, row): Cell) {
        assert!(col < self.cols && row < self.rows, "cell outside the grid");
        self.occupied[col * self.rows + row] = true;
    }

    /// Returns `true` if an occupied cell other than `cell` itself lies
    /// within [`MIN_CELL_SPACING`] of it.
    pub fn is_crowded(&self, (col, row): Cell) -> bool {
        let cols = col.saturating_sub(MIN_CELL_SPACING)..=col + MIN_CELL_SPACING;
        cols.flat_map(|c| {
            (row.saturating_sub(MIN_CELL_SPACING)..=row + MIN_CELL_SPACING).map(move |r| (c, r))
        })
        .any(|other| other != (col, row) && self.is_occupied(other))
    }

    /// Free cells far enough from every occupied cell, column-major.
    pub fn valid_cells(&self) -> Vec<Cell> {
        self.cells()
            .filter(|&cell| !self.is_occupied(cell) && !self.is_crowded(cell))
            .collect()
    }

    /// Every free cell, column-major, regardless of crowding.
    pub fn free_cells(&self) -> Vec<Cell> {
        self.cells().filter(|&cell| !self.is_occupied(cell)).collect()
    }

    /// Center of `cell` on the floor of the footprint.
    pub fn cell_center(&self, (col, row): Cell) -> Point3<f32> {
        let min = self.footprint.min();
        let width = self.footprint.extent(Axis::X) / self.cols as f32;
        let depth = self.footprint.extent(Axis::Z) / self.rows as f32;
        Point3::new(
            min.x + (col as f32 + 0.5) * width,
            min.y,
            min.z + (row as f32 + 0.5) * depth,
        )
    }

    fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cols).flat_map(move |col| (0..self.rows).map(move |row| (col, row)))
    }
}

/// Chebyshev distance between two cells.
pub fn cell_distance(a: Cell, b: Cell) -> usize {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}

/// Columns and rows of a grid of `cell_size` cells over `footprint`,
/// without allocating it.
///
/// Fails if `cell_size` is not positive or the grid would exceed
/// [`MAX_GRID_CELLS`].
pub fn grid_resolution(
    footprint: &BoundingVolume,
    cell_size: f32,
) -> Result<(usize, usize), ConfigError> {
    if cell_size.is_nan() || cell_size <= 0.0 {
        return Err(ConfigError::InvalidContentSettings(
            "placement cell size must be positive",
        ));
    }
    let cols = resolution(footprint.extent(Axis::X), cell_size);
    let rows = resolution(footprint.extent(Axis::Z), cell_size);
    match cols.checked_mul(rows) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok((cols, rows)),
        _ => Err(ConfigError::InvalidContentSettings(
            "placement grid is too fine for the room size",
        )),
    }
}

// Float to int casts saturate, so huge ratios land on usize::MAX.
fn resolution(extent: f32, cell_size: f32) -> usize {
    ((extent / cell_size).floor() as usize).max(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_grid(width: f32, depth: f32, cell_size: f32) -> PlacementGrid {
        let footprint = BoundingVolume::from_arrays([0.0; 3], [width, 3.0, depth]).unwrap();
        PlacementGrid::new(footprint, cell_size).unwrap()
    }

    #[test]
    fn resolution_has_a_floor_of_two() {
        let grid = make_grid(1.0, 20.0, 0.6);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.rows(), 33);
        assert_eq!(grid.cell_count(), 66);
    }

    #[test]
    fn occupied_cell_crowds_its_neighbourhood() {
        let mut grid = make_grid(6.0, 6.0, 1.0);
        grid.occupy((2, 2));
        assert!(grid.is_occupied((2, 2)));
        assert!(!grid.is_crowded((2, 2)));
        assert!(grid.is_crowded((0, 0)));
        assert!(grid.is_crowded((4, 4)));
        assert!(!grid.is_crowded((5, 2)));
        assert!(!grid.is_crowded((2, 5)));
    }

    #[test]
    fn valid_cells_exclude_crowded_ones() {
        let mut grid = make_grid(6.0, 6.0, 1.0);
        assert_eq!(grid.valid_cells().len(), 36);
        grid.occupy((0, 0));
        let valid = grid.valid_cells();
        assert!(!valid.contains(&(0, 0)));
        assert!(valid.iter().all(|&cell| cell_distance(cell, (0, 0)) > MIN_CELL_SPACING));
        assert_eq!(valid.len(), 36 - 9);
        assert_eq!(grid.free_cells().len(), 35);
    }

    #[test]
    fn small_grid_runs_out_of_valid_cells() {
        let mut grid = make_grid(1.0, 1.0, 1.0);
        grid.occupy((1, 1));
        assert!(grid.valid_cells().is_empty());
        assert_eq!(grid.free_cells(), vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn cell_center_sits_on_the_floor() {
        let footprint = BoundingVolume::from_arrays([2.0, 1.0, 4.0], [6.0, 4.0, 8.0]).unwrap();
        let grid = PlacementGrid::new(footprint, 2.0).unwrap();
        assert_eq!(grid.cell_center((0, 0)), Point3::new(3.0, 1.0, 5.0));
        assert_eq!(grid.cell_center((1, 1)), Point3::new(5.0, 1.0, 7.0));
    }

    #[test]
    fn overly_fine_grid_is_rejected() {
        let footprint = BoundingVolume::from_arrays([0.0; 3], [40.0, 3.0, 40.0]).unwrap();
        for cell_size in [6e-7, 1e-30, f32::MIN_POSITIVE] {
            assert_eq!(
                PlacementGrid::new(footprint, cell_size),
                Err(ConfigError::InvalidContentSettings(
                    "placement grid is too fine for the room size"
                ))
            );
        }
        // 1024 x 1024 is exactly at the limit.
        let footprint = BoundingVolume::from_arrays([0.0; 3], [1024.0, 3.0, 1024.0]).unwrap();
        assert_eq!(grid_resolution(&footprint, 1.0), Ok((1024, 1024)));
        assert!(grid_resolution(&footprint, 0.99).is_err());
    }

    #[test]
    fn cell_size_must_be_positive() {
        let footprint = BoundingVolume::from_arrays([0.0; 3], [4.0, 3.0, 4.0]).unwrap();
        for cell_size in [0.0, -1.0, f32::NAN] {
            assert!(matches!(
                PlacementGrid::new(footprint, cell_size),
                Err(ConfigError::InvalidContentSettings(_))
            ));
        }
        // An infinite cell size still yields the two-by-two floor.
        assert_eq!(grid_resolution(&footprint, f32::INFINITY), Ok((2, 2)));
    }
}
