//! 2D lattice of cell states
//!
//! Stores a fixed W×H grid as a flat row-major `Vec<Cell>` (`y * width + x`).
//! Dimensions are immutable after construction, and every in-range coordinate
//! always holds exactly one state.

use super::cell::Cell;
use crate::config::{validate_dimensions, validate_probability};
use crate::error::{FireSimError, Result};
use crate::random::chance;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-state cell tallies over a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub trees: usize,
    pub burning: usize,
    pub empty: usize,
}

impl CellCounts {
    /// Total number of cells tallied.
    pub fn total(&self) -> usize {
        self.trees + self.burning + self.empty
    }

    fn add(&mut self, cell: Cell) {
        match cell {
            Cell::Tree => self.trees += 1,
            Cell::Fire => self.burning += 1,
            Cell::Empty => self.empty += 1,
        }
    }
}

/// Reserve room for `len` cells, reporting allocation failure as a
/// configuration error instead of aborting.
fn allocate(len: usize) -> Result<Vec<Cell>> {
    let mut cells = Vec::new();
    cells.try_reserve_exact(len).map_err(|e| {
        FireSimError::configuration("width", format!("cannot allocate {len} cells: {e}"))
    })?;
    Ok(cells)
}

/// Fixed-size rectangular grid of [`Cell`] states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    /// Cells in row-major order (y * width + x)
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl CellGrid {
    /// Create a randomly populated grid.
    ///
    /// Each cell draws independently: it is Empty with probability
    /// `1 - forest_density`; a forested cell then draws again and is Fire with
    /// probability `ignition_density`, else Tree. Cells are drawn in row-major
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Configuration`] for a zero dimension or a
    /// density outside [0, 1].
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        forest_density: f64,
        ignition_density: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let len = validate_dimensions(width, height)?;
        validate_probability("forest_density", forest_density)?;
        validate_probability("ignition_density", ignition_density)?;

        let mut cells = allocate(len)?;
        cells.extend((0..len).map(|_| {
            if !chance(rng, forest_density) {
                Cell::Empty
            } else if chance(rng, ignition_density) {
                Cell::Fire
            } else {
                Cell::Tree
            }
        }));

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Create a grid with every cell set to `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Configuration`] for a zero dimension.
    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self> {
        let len = validate_dimensions(width, height)?;
        let mut cells = allocate(len)?;
        cells.resize(len, cell);
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Build a grid from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Configuration`] for a zero dimension or if
    /// `cells.len()` is not `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        let len = validate_dimensions(width, height)?;
        if cells.len() != len {
            return Err(FireSimError::configuration(
                "cells",
                format!(
                    "expected {len} cells for a {width}x{height} grid, got {}",
                    cells.len()
                ),
            ));
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: dimensions are validated positive at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if (x, y) lies inside the grid.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn bounds_error(&self, x: usize, y: usize) -> FireSimError {
        FireSimError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Get the cell at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        if self.contains(x, y) {
            Ok(self.cells[self.index(x, y)])
        } else {
            Err(self.bounds_error(x, y))
        }
    }

    /// Overwrite the cell at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        if self.contains(x, y) {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
            Ok(())
        } else {
            Err(self.bounds_error(x, y))
        }
    }

    /// Cell at (x + dx, y + dy), or `None` when that lies outside the grid.
    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<Cell> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        if self.contains(nx, ny) {
            Some(self.cells[self.index(nx, ny)])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Iterate over rows, top (y = 0) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Tally trees, burning and empty cells.
    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &cell in &self.cells {
            counts.add(cell);
        }
        counts
    }
}
