//! Core simulation engine for the autonomous block-stacking loop.
//!
//! The [`Board`] owns the grid, the active piece, the bag randomizer, and
//! the spawn/lock/line-clear rules. Everything here is synchronous and
//! tick-driven; the board never performs I/O and never blocks. The external
//! renderer reads state through [`Board::snapshot`] and never mutates the
//! simulation directly.

pub use self::{
    bag::Bag,
    board::{Board, BoardConfig, BoardStats},
    grid::{Cell, Grid},
    piece::{ActivePiece, PieceKind, Shape},
    snapshot::BoardSnapshot,
};

pub mod bag;
pub mod board;
pub mod grid;
pub mod piece;
pub mod snapshot;
