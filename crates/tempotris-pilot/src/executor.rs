use derive_more::IsVariant;
use tempotris_engine::Board;

use crate::autopilot::MoveDecision;

/// Fraction of the decision interval between individual movement steps.
const SUB_STEP_FRACTION: f32 = 0.15;

/// Floor applied to the tempo signal so intervals stay finite.
const MIN_TEMPO_BPM: f32 = 10.0;

/// Where the executor is in carrying out the current decision.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum ExecutorPhase {
    /// No decision in flight; waiting out the decision interval.
    #[default]
    Idle,
    /// Applying the decision's rotations.
    Rotating,
    /// Stepping one column per sub-step toward the target column.
    Translating,
    /// Stepping one row down per sub-step until the piece rests.
    Descending,
}

/// Plays one [`MoveDecision`] on the board as discrete, visible steps.
///
/// [`MoveExecutor::tick`] is the only entry point the running loop uses.
/// While idle it accumulates elapsed time and asks `decide` for the next
/// move once per decision interval (`60 / bpm` seconds, bpm floored at
/// [`MIN_TEMPO_BPM`]). While executing, it performs one movement step every
/// sub-step interval. Rotations are applied all at once in the first
/// execution step, so an observer never sees an intermediate orientation.
///
/// Movements go through the board's unchecked `rotate_active` and
/// `shift_active`. The search only emits placements it verified, and the
/// board tolerates transient overlap until the next lock, so re-checking
/// here would only mask a search bug.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveExecutor {
    phase: ExecutorPhase,
    decision: Option<MoveDecision>,
    decision_timer: f32,
    step_timer: f32,
}

impl MoveExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> ExecutorPhase {
        self.phase
    }

    /// Discards the in-flight decision and returns to idle.
    ///
    /// The accumulated timers are cleared too, so the next decision waits
    /// a full interval. Callers use this after a board reset, when the
    /// piece the decision referred to no longer exists.
    pub fn abort(&mut self) {
        self.phase = ExecutorPhase::Idle;
        self.decision = None;
        self.decision_timer = 0.0;
        self.step_timer = 0.0;
    }

    /// Starts executing `decision` immediately, skipping the idle wait.
    pub fn begin(&mut self, decision: MoveDecision) {
        self.phase = ExecutorPhase::Rotating;
        self.decision = Some(decision);
        self.decision_timer = 0.0;
        self.step_timer = 0.0;
    }

    /// Advances the executor by `elapsed_seconds` at the given tempo,
    /// taking fresh decisions from `decide`.
    ///
    /// At most one decision is taken and at most one movement step is
    /// performed per call; a tick longer than an interval does not fast
    /// forward through multiple steps.
    pub fn tick(
        &mut self,
        board: &mut Board,
        elapsed_seconds: f32,
        tempo_bpm: f32,
        decide: impl FnOnce(&Board) -> MoveDecision,
    ) {
        let interval = decision_interval(tempo_bpm);
        if self.phase.is_idle() {
            self.decision_timer += elapsed_seconds;
            if self.decision_timer >= interval && board.active_piece().is_some() {
                self.begin(decide(board));
            }
            return;
        }
        self.step_timer += elapsed_seconds;
        if self.step_timer >= interval * SUB_STEP_FRACTION {
            self.step_timer = 0.0;
            self.advance_sub_step(board);
        }
    }

    /// Performs one movement step of the in-flight decision.
    ///
    /// A phase that finds nothing left to do falls through to the next
    /// phase within the same step, so a decision never burns a sub-step on
    /// an empty transition. The board still moves at most one cell per
    /// call.
    fn advance_sub_step(&mut self, board: &mut Board) {
        let Some(decision) = self.decision else {
            self.abort();
            return;
        };
        if board.active_piece().is_none() {
            self.abort();
            return;
        }

        if self.phase.is_rotating() {
            for _ in 0..decision.rotations {
                board.rotate_active();
            }
            self.phase = ExecutorPhase::Translating;
            if decision.rotations > 0 {
                return;
            }
        }

        if self.phase.is_translating() {
            if let Some(piece) = board.active_piece() {
                match decision.target_column - piece.x() {
                    0 => self.phase = ExecutorPhase::Descending,
                    dx => {
                        board.shift_active(dx.signum());
                        return;
                    }
                }
            }
        }

        if self.phase.is_descending() && !board.descend_active() {
            board.lock_piece();
            self.abort();
        }
    }
}

/// Seconds between decisions at `tempo_bpm`, one decision per beat.
#[must_use]
pub fn decision_interval(tempo_bpm: f32) -> f32 {
    60.0 / tempo_bpm.max(MIN_TEMPO_BPM)
}
