//! Lattice state: the cell enumeration and the grid that stores it

pub mod cell;
pub mod cell_grid;

// Re-export main types
pub use cell::Cell;
pub use cell_grid::{CellCounts, CellGrid};
