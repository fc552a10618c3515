//! Autopilot move search and the tick-driven executor that plays chosen
//! moves on the board as discrete, visible steps.
//!
//! [`Autopilot`] scores every reachable placement of the current piece with
//! a fixed weighted heuristic and returns a [`MoveDecision`].
//! [`MoveExecutor`] then applies that decision to the board one sub-step at
//! a time, paced by a tempo signal. [`Simulation`] composes both with a
//! board behind the single `tick(elapsed_seconds, tempo_bpm)` entry point
//! the external driver calls once per animation frame.

pub use self::{
    autopilot::{Autopilot, MoveDecision},
    executor::{ExecutorPhase, MoveExecutor},
    simulation::Simulation,
    weights::HeuristicWeights,
};

pub mod autopilot;
pub mod executor;
mod features;
pub mod simulation;
pub mod weights;
