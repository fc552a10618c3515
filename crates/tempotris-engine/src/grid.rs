use derive_more::IsVariant;
use serde::{Deserialize, Serialize};

use crate::piece::PieceKind;

/// A single cell: empty, or occupied by the kind of piece that locked
/// there. No other payload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, IsVariant, Deserialize, Serialize)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Locked piece of a specific type.
    Piece(PieceKind),
}

/// Fixed-size rectangular grid of cells, addressed by `(row, column)` with
/// row 0 topmost.
///
/// The running simulation mutates the grid only through [`Board`] methods;
/// [`Board::grid`] hands out shared references, so external readers cannot
/// touch the live state. Standalone grids are plain values and may be built
/// and edited freely (scenario setup, tests).
///
/// [`Board`]: crate::board::Board
/// [`Board::grid`]: crate::board::Board::grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates an empty `rows x cols` grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        let index = self.index(row, col);
        self.cells[index] = cell;
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        !self.cell(row, col).is_empty()
    }

    /// Returns one row of cells, leftmost column first.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..][..self.cols]
    }

    /// Empties every cell, keeping the allocation.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Indices of rows with zero empty cells, ascending.
    #[must_use]
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.rows)
            .filter(|&row| self.row(row).iter().all(|cell| !cell.is_empty()))
            .collect()
    }

    /// Removes the given rows and inserts that many empty rows at the top,
    /// preserving the order of the surviving rows.
    pub(crate) fn collapse_rows(&mut self, removed: &[usize]) {
        if removed.is_empty() {
            return;
        }
        let mut cells = vec![Cell::Empty; removed.len() * self.cols];
        for row in 0..self.rows {
            if removed.contains(&row) {
                continue;
            }
            cells.extend_from_slice(self.row(row));
        }
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }
}
