use tempotris_engine::{Grid, Shape};

/// Owned occupancy copy of the live grid, used to score one candidate
/// placement. The search only ever writes to these copies, never to the
/// board it reads.
#[derive(Debug, Clone)]
pub(crate) struct ScratchGrid {
    rows: usize,
    cols: usize,
    filled: Vec<bool>,
}

impl ScratchGrid {
    pub(crate) fn from_grid(grid: &Grid) -> Self {
        let mut filled = Vec::with_capacity(grid.rows() * grid.cols());
        for row in 0..grid.rows() {
            filled.extend(grid.row(row).iter().map(|cell| !cell.is_empty()));
        }
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            filled,
        }
    }

    /// Stamps the shape's occupied cells at `(x, y)`. Source cells that
    /// fall outside the grid are ignored, never written.
    #[expect(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub(crate) fn stamp(&mut self, shape: &Shape, x: i32, y: i32) {
        let rows = self.rows as i32;
        let cols = self.cols as i32;
        for (dx, dy) in shape.occupied_offsets() {
            let col = x + dx as i32;
            let row = y + dy as i32;
            if (0..rows).contains(&row) && (0..cols).contains(&col) {
                self.filled[row as usize * self.cols + col as usize] = true;
            }
        }
    }

    fn is_filled(&self, row: usize, col: usize) -> bool {
        self.filled[row * self.cols + col]
    }
}

/// The four features of the placement heuristic, measured on a simulated
/// post-placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoardFeatures {
    pub aggregate_height: u32,
    pub complete_lines: u32,
    pub holes: u32,
    pub bumpiness: u32,
}

impl BoardFeatures {
    pub(crate) fn measure(grid: &ScratchGrid) -> Self {
        let heights = column_heights(grid);
        let aggregate_height = heights.iter().sum();
        let bumpiness = heights.windows(2).map(|pair| pair[0].abs_diff(pair[1])).sum();
        Self {
            aggregate_height,
            complete_lines: complete_lines(grid),
            holes: holes(grid),
            bumpiness,
        }
    }
}

// Column height counts from the bottom of the grid up to the first
// occupied cell; an empty column measures 0.
#[expect(clippy::cast_possible_truncation)]
fn column_heights(grid: &ScratchGrid) -> Vec<u32> {
    (0..grid.cols)
        .map(|col| {
            (0..grid.rows)
                .find(|&row| grid.is_filled(row, col))
                .map_or(0, |row| (grid.rows - row) as u32)
        })
        .collect()
}

// A hole is an empty cell with at least one occupied cell somewhere above
// it in the same column.
fn holes(grid: &ScratchGrid) -> u32 {
    let mut holes = 0;
    for col in 0..grid.cols {
        let mut covered = false;
        for row in 0..grid.rows {
            if grid.is_filled(row, col) {
                covered = true;
            } else if covered {
                holes += 1;
            }
        }
    }
    holes
}

// Counted regardless of the board's clear threshold: the heuristic always
// rewards rows that would be full.
#[expect(clippy::cast_possible_truncation)]
fn complete_lines(grid: &ScratchGrid) -> u32 {
    (0..grid.rows)
        .filter(|&row| (0..grid.cols).all(|col| grid.is_filled(row, col)))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use tempotris_engine::{Cell, PieceKind};

    use super::*;

    // Builds a scratch grid from an ASCII diagram, '#' for filled cells.
    fn scratch(diagram: &[&str]) -> ScratchGrid {
        let rows = diagram.len();
        let cols = diagram[0].len();
        let mut grid = Grid::new(rows, cols);
        for (row, line) in diagram.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                if c == '#' {
                    grid.set_cell(row, col, Cell::Piece(PieceKind::I));
                }
            }
        }
        ScratchGrid::from_grid(&grid)
    }

    #[test]
    fn empty_grid_measures_zero_everywhere() {
        let features = BoardFeatures::measure(&scratch(&["....", "....", "...."]));
        assert_eq!(
            features,
            BoardFeatures {
                aggregate_height: 0,
                complete_lines: 0,
                holes: 0,
                bumpiness: 0,
            }
        );
    }

    #[test]
    fn heights_count_from_the_bottom() {
        let features = BoardFeatures::measure(&scratch(&[
            "#...", //
            "#...", //
            "##..", //
            "##.#", //
        ]));
        // Heights: 4, 2, 0, 1.
        assert_eq!(features.aggregate_height, 7);
        assert_eq!(features.bumpiness, 2 + 2 + 1);
    }

    #[test]
    fn holes_require_cover_above() {
        let features = BoardFeatures::measure(&scratch(&[
            "#...", //
            "....", //
            "#...", //
            "..#.", //
        ]));
        // Column 0 has two empty cells under cover: rows 1 and 3. The cell
        // at (3, 2) has nothing above it and is not a hole.
        assert_eq!(features.holes, 2);
    }

    #[test]
    fn complete_lines_ignore_the_clear_threshold() {
        let features = BoardFeatures::measure(&scratch(&[
            "....", //
            "####", //
            "#.##", //
            "####", //
        ]));
        assert_eq!(features.complete_lines, 2);
    }

    #[test]
    fn stamp_ignores_out_of_range_cells() {
        let mut grid = scratch(&["...", "...", "..."]);
        let shape = PieceKind::I.base_shape().rotated();
        // Vertical I stamped with one cell above the grid.
        grid.stamp(&shape, 0, -1);
        let features = BoardFeatures::measure(&grid);
        assert_eq!(features.aggregate_height, 3);
        assert_eq!(features.holes, 0);
    }
}
