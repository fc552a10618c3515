use tempotris_engine::{Board, BoardConfig, BoardSnapshot, BoardStats};

use crate::{
    autopilot::Autopilot,
    executor::{ExecutorPhase, MoveExecutor},
};

/// The never-ending autoplay loop: a board, the search, and the executor
/// behind a single per-frame entry point.
///
/// The driver owns nothing but a `Simulation` and calls
/// [`Simulation::tick`] with the frame's elapsed time and the current
/// tempo, then renders [`Simulation::snapshot`]. Game over is not a
/// terminal state here; the board resets itself and play continues.
#[derive(Debug, Clone)]
pub struct Simulation {
    board: Board,
    autopilot: Autopilot,
    executor: MoveExecutor,
}

impl Simulation {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::from_board(Board::new(config))
    }

    /// Fixed-seed variant for reproducible runs.
    #[must_use]
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self::from_board(Board::with_seed(config, seed))
    }

    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            autopilot: Autopilot::new(),
            executor: MoveExecutor::new(),
        }
    }

    /// Advances the loop by one frame.
    ///
    /// A game-over board is reset before anything else runs, with the
    /// executor's stale decision discarded; the tick then proceeds
    /// normally on the fresh board.
    pub fn tick(&mut self, elapsed_seconds: f32, tempo_bpm: f32) {
        if self.board.is_game_over() {
            self.board.reset();
            self.executor.abort();
        }
        let autopilot = self.autopilot;
        self.executor
            .tick(&mut self.board, elapsed_seconds, tempo_bpm, |board| {
                autopilot.decide(board)
            });
    }

    /// Manual restart, keeping the configuration and the stats.
    pub fn reset(&mut self) {
        self.board.reset();
        self.executor.abort();
    }

    /// Restart with a new configuration; stats start over.
    pub fn reconfigure(&mut self, config: BoardConfig) {
        self.board.reconfigure(config);
        self.executor.abort();
    }

    /// Takes effect at the next lock.
    pub fn set_min_lines_to_clear(&mut self, min_lines: usize) {
        self.board.set_min_lines_to_clear(min_lines);
    }

    /// Takes effect at the next lock, and switches the weight profile for
    /// every decision after it.
    pub fn set_line_clear_enabled(&mut self, enabled: bool) {
        self.board.set_line_clear_enabled(enabled);
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn executor_phase(&self) -> ExecutorPhase {
        self.executor.phase()
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    #[must_use]
    pub fn stats(&self) -> BoardStats {
        self.board.stats()
    }
}
