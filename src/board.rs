//! Flat N×N board and the index/row/column arithmetic around it.
//!
//! Cell `i` sits at row `i / size`, column `i % size`. Every coordinate
//! accessor validates with the same rule: `0 <= x < bound`.

use crate::error::{Axis, EngineError};
use crate::types::{Cell, Markers, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// N×N board stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty `size × size` board.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size²`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a degenerate zero-sized board.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks that `index` addresses a cell.
    pub fn check_index(&self, index: i64) -> Result<usize, EngineError> {
        check_bound(Axis::Index, index, self.cells.len())
    }

    /// Checks that `row` addresses a row.
    pub fn check_row(&self, row: i64) -> Result<usize, EngineError> {
        check_bound(Axis::Row, row, self.size)
    }

    /// Checks that `col` addresses a column.
    pub fn check_col(&self, col: i64) -> Result<usize, EngineError> {
        check_bound(Axis::Column, col, self.size)
    }

    /// Linear index of `(row, col)`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if either coordinate is negative or `>= size`.
    #[instrument(skip(self))]
    pub fn index_of(&self, row: i64, col: i64) -> Result<usize, EngineError> {
        let row = self.check_row(row)?;
        let col = self.check_col(col)?;
        Ok(row * self.size + col)
    }

    /// `(row, col)` of a cell index.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= size²`.
    pub fn locate(&self, index: usize) -> Result<(usize, usize), EngineError> {
        if index >= self.cells.len() {
            return Err(EngineError::out_of_range(
                Axis::Index,
                i64::try_from(index).unwrap_or(i64::MAX),
                self.cells.len(),
            ));
        }
        Ok((index / self.size, index % self.size))
    }

    /// Row containing `index`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index` is negative or `>= size²`.
    #[instrument(skip(self))]
    pub fn row_of(&self, index: i64) -> Result<usize, EngineError> {
        Ok(self.locate(self.check_index(index)?)?.0)
    }

    /// Column containing `index`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index` is negative or `>= size²`.
    #[instrument(skip(self))]
    pub fn col_of(&self, index: i64) -> Result<usize, EngineError> {
        Ok(self.locate(self.check_index(index)?)?.1)
    }

    /// Mirrors a row top-to-bottom (`size - 1 - row`).
    ///
    /// Row `r` of the anti-diagonal sits in column `flip_row(r)`.
    pub fn flip_row(&self, row: usize) -> Result<usize, EngineError> {
        self.ensure(Axis::Row, row)?;
        Ok(self.size - 1 - row)
    }

    /// Indexes of every cell in `row`, left to right.
    pub fn row_indexes(&self, row: usize) -> Result<Vec<usize>, EngineError> {
        self.ensure(Axis::Row, row)?;
        Ok((0..self.size).map(|col| row * self.size + col).collect())
    }

    /// Indexes of every cell in `col`, top to bottom.
    pub fn col_indexes(&self, col: usize) -> Result<Vec<usize>, EngineError> {
        self.ensure(Axis::Column, col)?;
        Ok((0..self.size).map(|row| row * self.size + col).collect())
    }

    /// Indexes of `(0,0), (1,1), …`.
    pub fn main_diagonal_indexes(&self) -> Vec<usize> {
        (0..self.size).map(|i| i * self.size + i).collect()
    }

    /// Indexes of `(0,size-1), (1,size-2), …`.
    pub fn anti_diagonal_indexes(&self) -> Vec<usize> {
        (0..self.size)
            .map(|row| row * self.size + (self.size - 1 - row))
            .collect()
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Number of cells owned by `player`.
    pub fn count(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(player))
            .count()
    }

    /// Board as marker values, `None` for empty cells.
    pub fn render<M: Clone>(&self, markers: &Markers<M>) -> Vec<Option<M>> {
        self.cells
            .iter()
            .map(|cell| markers.render(*cell).cloned())
            .collect()
    }

    /// Claims an empty cell. Callers validate `index` first.
    pub(crate) fn place(&mut self, index: usize, player: PlayerId) {
        debug_assert!(self.cells[index].is_empty(), "cell {index} overwritten");
        self.cells[index] = Cell::Occupied(player);
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    fn ensure(&self, axis: Axis, value: usize) -> Result<(), EngineError> {
        if value < self.size {
            Ok(())
        } else {
            Err(EngineError::out_of_range(
                axis,
                i64::try_from(value).unwrap_or(i64::MAX),
                self.size,
            ))
        }
    }
}

fn check_bound(axis: Axis, value: i64, bound: usize) -> Result<usize, EngineError> {
    match usize::try_from(value) {
        Ok(v) if v < bound => Ok(v),
        _ => Err(EngineError::out_of_range(axis, value, bound)),
    }
}
