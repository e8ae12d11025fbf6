//! Per-cell transition rule
//!
//! The rule reads only from the pre-step grid and writes only into a separate
//! next-step buffer, so no cell's new state can leak into another cell's
//! neighbor check within the same step.

use crate::config::AutomatonConfig;
use crate::grid::{Cell, CellGrid};
use crate::random::chance;
use rand::Rng;

/// One of the eight neighbor directions, with its grid offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

impl Neighbor {
    /// Fixed scan order. The first Fire neighbor whose draw succeeds ignites
    /// the cell, so this order is the tie-break between directions.
    pub const SCAN_ORDER: [Neighbor; 8] = [
        Neighbor::UpLeft,
        Neighbor::Up,
        Neighbor::UpRight,
        Neighbor::Left,
        Neighbor::Right,
        Neighbor::DownLeft,
        Neighbor::Down,
        Neighbor::DownRight,
    ];

    /// (dx, dy) offset; "up" is y - 1.
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Neighbor::UpLeft => (-1, -1),
            Neighbor::Up => (0, -1),
            Neighbor::UpRight => (1, -1),
            Neighbor::Left => (-1, 0),
            Neighbor::Right => (1, 0),
            Neighbor::DownLeft => (-1, 1),
            Neighbor::Down => (0, 1),
            Neighbor::DownRight => (1, 1),
        }
    }

    /// Corner-adjacent directions use the diagonal spread probability.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Neighbor::UpLeft | Neighbor::UpRight | Neighbor::DownLeft | Neighbor::DownRight
        )
    }
}

/// Probabilities driving the transition rule, copied out of a validated config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRule {
    pub direct_spread: f64,
    pub diagonal_spread: f64,
    pub spontaneous_ignition: f64,
    pub regrowth: f64,
}

impl TransitionRule {
    pub fn from_config(config: &AutomatonConfig) -> Self {
        Self {
            direct_spread: config.direct_spread_probability,
            diagonal_spread: config.diagonal_spread_probability,
            spontaneous_ignition: config.spontaneous_ignition_probability,
            regrowth: config.regrowth_probability,
        }
    }

    /// Spread probability for fire arriving from `neighbor`.
    #[inline]
    pub fn spread_probability(&self, neighbor: Neighbor) -> f64 {
        if neighbor.is_diagonal() {
            self.diagonal_spread
        } else {
            self.direct_spread
        }
    }

    /// Next state of the cell at (x, y), read from `grid`.
    ///
    /// Every Fire neighbor visited in scan order costs one draw; the first
    /// success ignites the cell and ends the scan. Out-of-range neighbors are
    /// absent, never Fire.
    pub fn next_state<R: Rng + ?Sized>(
        &self,
        grid: &CellGrid,
        x: usize,
        y: usize,
        current: Cell,
        rng: &mut R,
    ) -> Cell {
        match current {
            Cell::Tree => {
                let caught = Neighbor::SCAN_ORDER.iter().any(|&neighbor| {
                    let (dx, dy) = neighbor.offset();
                    grid.offset(x, y, dx, dy) == Some(Cell::Fire)
                        && chance(rng, self.spread_probability(neighbor))
                });
                if caught || chance(rng, self.spontaneous_ignition) {
                    Cell::Fire
                } else {
                    Cell::Tree
                }
            }
            Cell::Fire => Cell::Empty,
            Cell::Empty => {
                if chance(rng, self.regrowth) {
                    Cell::Tree
                } else {
                    Cell::Empty
                }
            }
        }
    }

    /// Write the successor of every cell of `current` into `next`.
    ///
    /// Cells are visited in row-major order (y outer, x inner), which fixes
    /// the order of random draws for a given seed. A column-major sweep would
    /// consume the same draws in a different order, so per-seed grids are only
    /// reproducible by this crate's own traversal. `next` must have the same
    /// dimensions as `current`; its previous contents are ignored.
    pub fn apply<R: Rng + ?Sized>(&self, current: &CellGrid, next: &mut CellGrid, rng: &mut R) {
        debug_assert_eq!(
            (current.width(), current.height()),
            (next.width(), next.height())
        );
        let width = current.width();
        for (idx, (slot, &cell)) in next
            .cells_mut()
            .iter_mut()
            .zip(current.cells())
            .enumerate()
        {
            *slot = self.next_state(current, idx % width, idx / width, cell, rng);
        }
    }
}
