use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tempotris_engine::{Board, Shape};

use crate::{
    features::{BoardFeatures, ScratchGrid},
    weights::HeuristicWeights,
};

/// One chosen placement: how often to rotate the freshly spawned piece and
/// which column to carry it to before dropping.
///
/// `landing_row` records where the search expects the piece to rest. The
/// executor does not steer by it; the board's own collision answer decides
/// the actual lock row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MoveDecision {
    pub rotations: u8,
    pub target_column: i32,
    pub landing_row: i32,
}

/// Exhaustive placement search over the board's active piece.
///
/// Every rotation of the piece is tried in every column, dropped straight
/// down, and scored on an owned scratch copy of the grid. The best-scoring
/// placement wins; on ties the first one found (fewest rotations, then
/// leftmost column) is kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot {}

impl Autopilot {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Picks the best placement for the current active piece.
    ///
    /// Returns the degenerate default decision when the board has no
    /// active piece; executing it is a harmless no-op.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn decide(&self, board: &Board) -> MoveDecision {
        let Some(piece) = board.active_piece() else {
            return MoveDecision::default();
        };

        let mut shapes = ArrayVec::<Shape, 4>::new();
        shapes.push(piece.shape().clone());
        for _ in 1..4 {
            let next = shapes[shapes.len() - 1].rotated();
            shapes.push(next);
        }

        let cols = board.grid().cols() as i32;
        let mut best: Option<(f32, MoveDecision)> = None;
        for (rotations, shape) in shapes.iter().enumerate() {
            // Wide pieces can rest with a negative anchor once rotated, so
            // the column scan starts left of the board.
            for x in -2..=cols + 1 {
                if board.collides(shape, x, 0) {
                    continue;
                }
                let mut y = 0;
                while !board.collides(shape, x, y + 1) {
                    y += 1;
                }
                let score = self.evaluate_placement(board, shape, x, y);
                if best.is_none_or(|(top, _)| score > top) {
                    best = Some((
                        score,
                        MoveDecision {
                            rotations: rotations as u8,
                            target_column: x,
                            landing_row: y,
                        },
                    ));
                }
            }
        }
        best.map_or_else(MoveDecision::default, |(_, decision)| decision)
    }

    /// Scores one resting placement of `shape` at `(x, y)`.
    ///
    /// The placement is stamped onto a scratch copy of the grid; the live
    /// board is never written. The weight profile follows the board's
    /// line-clear mode.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn evaluate_placement(&self, board: &Board, shape: &Shape, x: i32, y: i32) -> f32 {
        let mut scratch = ScratchGrid::from_grid(board.grid());
        scratch.stamp(shape, x, y);
        let features = BoardFeatures::measure(&scratch);
        let weights = HeuristicWeights::for_mode(board.line_clear_enabled());
        weights.aggregate_height * features.aggregate_height as f32
            + weights.complete_lines * features.complete_lines as f32
            + weights.holes * features.holes as f32
            + weights.bumpiness * features.bumpiness as f32
    }
}
