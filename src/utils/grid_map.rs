// obstacle grid map definition
// 1 marks an obstacle cell, 0 marks floor

use std::collections::HashSet;
use std::ops::Deref;

use itertools::iproduct;
extern crate nalgebra as na;

use crate::common::{Cell, SimError, SimResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleMap {
    grid: na::DMatrix<i32>,
}

/// Cell coordinates are `i32`, so no dimension may exceed `i32::MAX`
fn check_dimensions(rows: usize, cols: usize) -> SimResult<()> {
    if rows == 0 || cols == 0 {
        return Err(SimError::Configuration(format!(
            "grid size must be positive, got {}x{}",
            rows, cols
        )));
    }
    let limit = i32::MAX as usize;
    if rows > limit || cols > limit {
        return Err(SimError::Configuration(format!(
            "grid size {}x{} exceeds {} cells per side",
            rows, cols, limit
        )));
    }
    Ok(())
}

impl ObstacleMap {
    pub fn new(matrix: na::DMatrix<i32>) -> SimResult<Self> {
        check_dimensions(matrix.nrows(), matrix.ncols())?;
        if let Some(bad) = matrix.iter().find(|&&v| v != 0 && v != 1) {
            return Err(SimError::Configuration(format!(
                "obstacle matrix entries must be 0 or 1, found {}",
                bad
            )));
        }
        Ok(Self { grid: matrix })
    }

    /// Build from nested rows, checking the declared shape against the data
    pub fn from_rows(rows: usize, cols: usize, matrix: &[Vec<i32>]) -> SimResult<Self> {
        check_dimensions(rows, cols)?;
        if matrix.len() != rows {
            return Err(SimError::Configuration(format!(
                "obstacle matrix has {} rows, expected {}",
                matrix.len(),
                rows
            )));
        }
        if let Some((r, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(SimError::Configuration(format!(
                "obstacle matrix row {} has {} columns, expected {}",
                r,
                row.len(),
                cols
            )));
        }
        Self::new(na::DMatrix::from_fn(rows, cols, |r, c| matrix[r][c]))
    }

    pub fn rows(&self) -> usize {
        self.grid.nrows()
    }

    pub fn cols(&self) -> usize {
        self.grid.ncols()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows()
            && (cell.col as usize) < self.cols()
    }

    /// Out-of-bounds cells are not obstacles; check `in_bounds` separately
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.grid[(cell.row as usize, cell.col as usize)] == 1
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_obstacle(cell)
    }

    pub fn obstacle_cells(&self) -> HashSet<Cell> {
        self.cells().filter(|&c| self.is_obstacle(c)).collect()
    }

    /// Free cells in row-major order
    pub fn free_cells(&self) -> Vec<Cell> {
        self.cells().filter(|&c| !self.is_obstacle(c)).collect()
    }

    fn cells(&self) -> impl Iterator<Item = Cell> {
        iproduct!(0..self.rows() as i32, 0..self.cols() as i32).map(|(r, c)| Cell::new(r, c))
    }
}

impl Deref for ObstacleMap {
    type Target = na::DMatrix<i32>;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}
