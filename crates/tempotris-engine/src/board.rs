use serde::{Deserialize, Serialize};

use crate::{
    bag::Bag,
    grid::{Cell, Grid},
    piece::{ActivePiece, PieceKind, Shape},
};

/// Initial configuration of a [`Board`], supplied by the external caller
/// (presets, CLI flags). Persistence of presets is not the engine's job;
/// the values only ever arrive through the constructor and
/// [`Board::reconfigure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// Full rows required before a clear actually happens.
    pub min_lines_to_clear: usize,
    pub line_clear_enabled: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 10,
            min_lines_to_clear: 1,
            line_clear_enabled: true,
        }
    }
}

/// Cumulative counters across the never-ending loop.
///
/// [`Board::reset`] keeps them (a game-over reset is part of normal
/// operation); [`Board::reconfigure`] zeroes them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardStats {
    pub pieces_locked: u64,
    pub rows_cleared: u64,
    pub resets: u64,
}

/// Owner of the grid, the active piece, the bag, and the placement rules.
///
/// One board exists per simulation run. All mutation happens through its
/// methods, synchronously, within a single driver tick.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    bag: Bag,
    active: Option<ActivePiece>,
    game_over: bool,
    min_lines_to_clear: usize,
    line_clear_enabled: bool,
    stats: BoardStats,
}

impl Board {
    /// Allocates an empty grid from `config` and spawns the first piece.
    ///
    /// A colliding first spawn leaves the board in the game-over state
    /// instead of panicking; the driver recovers through [`Board::reset`].
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_bag(config, Bag::new())
    }

    /// Like [`Board::new`] with a fixed bag seed, for reproducible runs.
    #[must_use]
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self::with_bag(config, Bag::with_seed(seed))
    }

    fn with_bag(config: BoardConfig, bag: Bag) -> Self {
        let mut board = Self {
            grid: Grid::new(config.rows, config.cols),
            bag,
            active: None,
            game_over: false,
            min_lines_to_clear: config.min_lines_to_clear,
            line_clear_enabled: config.line_clear_enabled,
            stats: BoardStats::default(),
        };
        board.spawn_piece();
        board
    }

    /// Clears the grid and the game-over flag, resets the bag, and spawns a
    /// new piece.
    ///
    /// Callers coupled to an executor must discard its in-flight decision;
    /// the board knows nothing about the executor.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.bag.reset();
        self.game_over = false;
        self.stats.resets += 1;
        self.spawn_piece();
    }

    /// Full reset with a new configuration.
    ///
    /// The grid is reallocated and cleared when the dimensions change, and
    /// the cumulative stats start over.
    pub fn reconfigure(&mut self, config: BoardConfig) {
        self.grid = Grid::new(config.rows, config.cols);
        self.min_lines_to_clear = config.min_lines_to_clear;
        self.line_clear_enabled = config.line_clear_enabled;
        self.bag.reset();
        self.game_over = false;
        self.stats = BoardStats::default();
        self.spawn_piece();
    }

    /// Returns true iff any occupied cell of `shape` placed with its
    /// top-left at `(x, y)` leaves the column bounds, reaches below the
    /// last row, or overlaps an occupied grid cell.
    ///
    /// Cells with `row < 0` are checked against the column bounds only, so
    /// spawn checks above the visible board work. Out-of-range coordinates
    /// are never an error, just a collision.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn collides(&self, shape: &Shape, x: i32, y: i32) -> bool {
        let rows = self.grid.rows() as i32;
        let cols = self.grid.cols() as i32;
        for (dx, dy) in shape.occupied_offsets() {
            let col = x + dx as i32;
            let row = y + dy as i32;
            if col < 0 || col >= cols || row >= rows {
                return true;
            }
            if row >= 0 && self.grid.is_occupied(row as usize, col as usize) {
                return true;
            }
        }
        false
    }

    /// Writes the active piece into the grid, runs line clears when
    /// enabled, then spawns the next piece.
    ///
    /// Occupied cells whose row falls outside `[0, rows)` are silently
    /// dropped, not written. No-op without an active piece.
    #[expect(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let rows = self.grid.rows() as i32;
        let cols = self.grid.cols() as i32;
        for (dx, dy) in piece.shape().occupied_offsets() {
            let col = piece.x() + dx as i32;
            let row = piece.y() + dy as i32;
            if (0..rows).contains(&row) && (0..cols).contains(&col) {
                self.grid
                    .set_cell(row as usize, col as usize, Cell::Piece(piece.kind()));
            }
        }
        self.stats.pieces_locked += 1;
        if self.line_clear_enabled {
            self.process_line_clears();
        }
        self.spawn_piece();
    }

    /// Removes every full row, but only when the count of full rows reaches
    /// the configured threshold.
    ///
    /// Below the threshold the grid is left untouched, so full rows can
    /// persist indefinitely (the stacking-mode contract). At or above it,
    /// all qualifying rows go at once, not just the threshold's worth.
    pub fn process_line_clears(&mut self) {
        let full = self.grid.full_rows();
        if full.is_empty() || full.len() < self.min_lines_to_clear {
            return;
        }
        self.stats.rows_cleared += full.len() as u64;
        self.grid.collapse_rows(&full);
    }

    /// Draws the next kind from the bag and installs it centered at the
    /// top. A collision at the spawn position sets the game-over flag and
    /// leaves no active piece.
    fn spawn_piece(&mut self) {
        let kind = self.bag.draw();
        self.spawn_kind(kind);
    }

    /// Installs a fresh spawn of `kind`, bypassing the bag. Intended for
    /// scripted scenarios and tests; the running loop spawns from the bag.
    #[expect(clippy::cast_possible_wrap)]
    pub fn spawn_kind(&mut self, kind: PieceKind) {
        let shape = kind.base_shape();
        let x = (self.grid.cols() as i32 - shape.width() as i32).div_euclid(2);
        if self.collides(&shape, x, 0) {
            self.game_over = true;
            self.active = None;
            return;
        }
        self.active = Some(ActivePiece::new(kind, shape, x, 0));
    }

    /// Applies one geometric rotation to the active piece, without
    /// collision checking. Legality is the caller's concern; see
    /// [`Shape::rotated`].
    pub fn rotate_active(&mut self) {
        if let Some(piece) = &mut self.active {
            piece.rotate();
        }
    }

    /// Shifts the active piece horizontally by `dx` columns, unchecked.
    pub fn shift_active(&mut self, dx: i32) {
        if let Some(piece) = &mut self.active {
            piece.shift(dx);
        }
    }

    /// Moves the active piece down one row if the position below is free.
    ///
    /// Returns `false` when the piece is resting (or absent) and should be
    /// locked.
    pub fn descend_active(&mut self) -> bool {
        let can_descend = match &self.active {
            Some(piece) => !self.collides(piece.shape(), piece.x(), piece.y() + 1),
            None => return false,
        };
        if can_descend
            && let Some(piece) = &mut self.active
        {
            piece.descend();
        }
        can_descend
    }

    /// Takes effect at the next lock.
    pub fn set_min_lines_to_clear(&mut self, min_lines: usize) {
        self.min_lines_to_clear = min_lines;
    }

    /// Takes effect at the next lock.
    pub fn set_line_clear_enabled(&mut self, enabled: bool) {
        self.line_clear_enabled = enabled;
    }

    #[must_use]
    pub fn min_lines_to_clear(&self) -> usize {
        self.min_lines_to_clear
    }

    #[must_use]
    pub fn line_clear_enabled(&self) -> bool {
        self.line_clear_enabled
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn stats(&self) -> BoardStats {
        self.stats
    }

    /// Fills one grid cell directly. Scenario setup for tools and tests;
    /// the running loop only writes cells through [`Board::lock_piece`].
    pub fn fill_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.grid.set_cell(row, col, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> Board {
        Board::with_seed(
            BoardConfig {
                rows: 10,
                cols: 6,
                min_lines_to_clear: 1,
                line_clear_enabled: true,
            },
            99,
        )
    }

    fn fill_row(board: &mut Board, row: usize) {
        for col in 0..board.grid().cols() {
            board.fill_cell(row, col, Cell::Piece(PieceKind::I));
        }
    }

    #[test]
    fn first_spawn_never_game_overs_on_an_adequate_board() {
        for seed in 0..20 {
            let board = Board::with_seed(BoardConfig::default(), seed);
            assert!(!board.is_game_over(), "seed {seed}");
            assert!(board.active_piece().is_some(), "seed {seed}");
        }
    }

    #[test]
    fn spawn_centers_the_piece() {
        let mut board = small_board();
        board.spawn_kind(PieceKind::O);
        let piece = board.active_piece().unwrap();
        // cols = 6, width = 2 -> x = 2.
        assert_eq!(piece.x(), 2);
        assert_eq!(piece.y(), 0);
    }

    #[test]
    fn collides_at_column_bounds() {
        let board = small_board();
        let shape = PieceKind::O.base_shape();
        assert!(board.collides(&shape, -1, 0));
        assert!(board.collides(&shape, 5, 0));
        assert!(!board.collides(&shape, 0, 0));
        assert!(!board.collides(&shape, 4, 0));
    }

    #[test]
    fn collides_below_the_last_row_but_not_above_row_zero() {
        let board = small_board();
        let shape = PieceKind::O.base_shape();
        // rows = 10, height = 2 -> deepest valid y is 8.
        assert!(!board.collides(&shape, 0, 8));
        assert!(board.collides(&shape, 0, 9));
        // Above the visible board only column bounds apply.
        assert!(!board.collides(&shape, 0, -5));
        assert!(board.collides(&shape, -1, -5));
    }

    #[test]
    fn collides_with_occupied_cells() {
        let mut board = small_board();
        board.fill_cell(1, 0, Cell::Piece(PieceKind::T));
        let shape = PieceKind::O.base_shape();
        assert!(board.collides(&shape, 0, 0));
        assert!(!board.collides(&shape, 1, 0));
    }

    #[test]
    fn lock_writes_cells_and_spawns_the_next_piece() {
        let mut board = small_board();
        board.spawn_kind(PieceKind::O);
        // Walk the O piece to the floor.
        while board.descend_active() {}
        board.lock_piece();

        assert_eq!(board.grid().cell(8, 2), Cell::Piece(PieceKind::O));
        assert_eq!(board.grid().cell(9, 3), Cell::Piece(PieceKind::O));
        assert_eq!(board.stats().pieces_locked, 1);
        assert!(board.active_piece().is_some());
    }

    #[test]
    fn lock_without_active_piece_is_a_no_op() {
        let mut board = small_board();
        // Force game over: no active piece remains.
        for col in 0..6 {
            for row in 0..3 {
                board.fill_cell(row, col, Cell::Piece(PieceKind::J));
            }
        }
        board.spawn_kind(PieceKind::T);
        assert!(board.is_game_over());
        assert!(board.active_piece().is_none());
        let locked_before = board.stats().pieces_locked;
        board.lock_piece();
        assert_eq!(board.stats().pieces_locked, locked_before);
    }

    #[test]
    fn lock_drops_rows_above_the_board() {
        let mut board = small_board();
        board.spawn_kind(PieceKind::I);
        board.rotate_active();
        // Vertical I anchored above the top: rows -2..2.
        if let Some(piece) = &mut board.active {
            piece.x = 0;
            piece.y = -2;
        }
        board.lock_piece();
        // Only the two in-range cells were written.
        assert_eq!(board.grid().cell(0, 0), Cell::Piece(PieceKind::I));
        assert_eq!(board.grid().cell(1, 0), Cell::Piece(PieceKind::I));
        assert!(board.grid().cell(2, 0).is_empty());
    }

    #[test]
    fn line_clear_removes_all_qualifying_rows_at_threshold_two() {
        let mut board = small_board();
        board.set_min_lines_to_clear(2);
        fill_row(&mut board, 2);
        fill_row(&mut board, 5);
        fill_row(&mut board, 7);
        board.fill_cell(6, 1, Cell::Piece(PieceKind::S));

        board.process_line_clears();

        assert!(board.grid().full_rows().is_empty());
        // Three empty rows enter at the top; two of the removed rows were
        // above the marker, so it lands one row lower.
        assert_eq!(board.grid().cell(7, 1), Cell::Piece(PieceKind::S));
        assert_eq!(board.stats().rows_cleared, 3);
    }

    #[test]
    fn below_threshold_line_clear_leaves_the_grid_identical() {
        let mut board = small_board();
        board.set_min_lines_to_clear(3);
        fill_row(&mut board, 4);
        fill_row(&mut board, 9);
        let before = board.grid().clone();

        board.process_line_clears();

        assert_eq!(*board.grid(), before);
        assert_eq!(board.stats().rows_cleared, 0);
    }

    #[test]
    fn lock_skips_line_clears_when_disabled() {
        let mut board = small_board();
        board.set_line_clear_enabled(false);
        fill_row(&mut board, 9);
        board.spawn_kind(PieceKind::O);
        while board.descend_active() {}
        board.lock_piece();
        // The full bottom row persists.
        assert!(board.grid().full_rows().contains(&9));
    }

    #[test]
    fn spawn_collision_sets_game_over_and_reset_recovers() {
        let mut board = small_board();
        for col in 0..6 {
            for row in 0..2 {
                board.fill_cell(row, col, Cell::Piece(PieceKind::Z));
            }
        }
        board.spawn_kind(PieceKind::T);
        assert!(board.is_game_over());
        assert!(board.active_piece().is_none());

        board.reset();
        assert!(!board.is_game_over());
        assert!(board.active_piece().is_some());
        assert!(board.grid().cell(0, 0).is_empty());
        assert_eq!(board.stats().resets, 1);
    }

    #[test]
    fn config_serializes_round_trip() {
        let config = BoardConfig {
            rows: 14,
            cols: 7,
            min_lines_to_clear: 2,
            line_clear_enabled: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: BoardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn reconfigure_resizes_and_zeroes_stats() {
        let mut board = small_board();
        while board.descend_active() {}
        board.lock_piece();
        assert_eq!(board.stats().pieces_locked, 1);

        board.reconfigure(BoardConfig {
            rows: 8,
            cols: 12,
            min_lines_to_clear: 2,
            line_clear_enabled: false,
        });
        assert_eq!(board.grid().rows(), 8);
        assert_eq!(board.grid().cols(), 12);
        assert_eq!(board.stats(), BoardStats::default());
        assert!(!board.line_clear_enabled());
        assert!(board.active_piece().is_some());
    }
}
