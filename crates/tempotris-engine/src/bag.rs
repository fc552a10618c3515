use std::collections::VecDeque;

use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::piece::PieceKind;

/// Multiset-draw piece randomizer.
///
/// An empty bag is refilled with two copies of every kind in
/// Fisher-Yates-shuffled order before the next draw, so no kind is skipped
/// for more than `2 * PieceKind::LEN - 1` draws.
#[derive(Debug, Clone)]
pub struct Bag {
    rng: Pcg64Mcg,
    queue: VecDeque<PieceKind>,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Creates a bag seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(Pcg64Mcg::from_os_rng())
    }

    /// Creates a bag with a fixed seed for a reproducible piece order.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_rng(rng: Pcg64Mcg) -> Self {
        Self {
            rng,
            queue: VecDeque::with_capacity(PieceKind::LEN * 2),
        }
    }

    /// Draws the next kind, refilling the bag first when it is empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.queue.is_empty() {
            self.refill();
        }
        self.queue
            .pop_front()
            .expect("bag is non-empty after refill")
    }

    fn refill(&mut self) {
        let mut set = [PieceKind::ALL, PieceKind::ALL].concat();
        set.shuffle(&mut self.rng);
        self.queue.extend(set);
    }

    /// Discards the queued pieces; the next draw starts from a fresh fill.
    pub fn reset(&mut self) {
        self.queue.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
