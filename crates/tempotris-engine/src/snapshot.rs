use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    grid::Cell,
    piece::{ActivePiece, PieceKind},
};

/// Read-only view of the board for the external renderer: the locked cells
/// with the active piece overlaid, consumed once per render frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cells, active piece already overlaid.
    pub cells: Vec<Cell>,
    pub active_kind: Option<PieceKind>,
    pub game_over: bool,
}

impl BoardSnapshot {
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }
}

impl Board {
    /// Captures a renderer-facing snapshot of the current state.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn snapshot(&self) -> BoardSnapshot {
        let grid = self.grid();
        let mut cells = Vec::with_capacity(grid.rows() * grid.cols());
        for row in 0..grid.rows() {
            cells.extend_from_slice(grid.row(row));
        }
        if let Some(piece) = self.active_piece() {
            let rows = grid.rows() as i32;
            let cols = grid.cols() as i32;
            for (dx, dy) in piece.shape().occupied_offsets() {
                let col = piece.x() + dx as i32;
                let row = piece.y() + dy as i32;
                if (0..rows).contains(&row) && (0..cols).contains(&col) {
                    cells[row as usize * grid.cols() + col as usize] = Cell::Piece(piece.kind());
                }
            }
        }
        BoardSnapshot {
            rows: grid.rows(),
            cols: grid.cols(),
            cells,
            active_kind: self.active_piece().map(ActivePiece::kind),
            game_over: self.is_game_over(),
        }
    }
}
