//! Automaton configuration
//!
//! All construction parameters live in one plain struct with sensible defaults,
//! so callers override only what they need:
//!
//! ```rust
//! use forest_fire_core::AutomatonConfig;
//!
//! let config = AutomatonConfig {
//!     width: 64,
//!     height: 48,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{FireSimError, Result};
use serde::{Deserialize, Serialize};

/// Fraction of cells that start as forest.
pub const DEFAULT_FOREST_DENSITY: f64 = 0.55;
/// Fraction of forest cells that start burning.
pub const DEFAULT_IGNITION_DENSITY: f64 = 0.0004;
/// Spread probability to an orthogonal neighbor.
pub const DEFAULT_DIRECT_SPREAD_PROBABILITY: f64 = 0.92;
/// Spread probability to a diagonal neighbor (smaller contact area).
pub const DEFAULT_DIAGONAL_SPREAD_PROBABILITY: f64 = 0.82;
/// Default grid edge length in cells.
pub const DEFAULT_GRID_SIZE: usize = 120;
/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;
/// Largest grid, in cells, that can be constructed.
///
/// One byte per cell, so this is the largest allocation a `Vec` can address
/// (`isize::MAX` bytes).
pub const MAX_CELLS: usize = usize::MAX >> 1;

/// Construction parameters for a [`FireAutomaton`](crate::FireAutomaton).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Grid width in cells (must be > 0)
    pub width: usize,
    /// Grid height in cells (must be > 0)
    pub height: usize,
    /// Probability that a cell starts as forest rather than empty
    pub forest_density: f64,
    /// Probability that an initially forested cell starts burning
    pub ignition_density: f64,
    /// Probability that fire spreads from an orthogonal neighbor
    pub direct_spread_probability: f64,
    /// Probability that fire spreads from a diagonal neighbor
    pub diagonal_spread_probability: f64,
    /// Per-step probability that a tree with no igniting neighbor catches fire
    pub spontaneous_ignition_probability: f64,
    /// Per-step probability that an empty cell grows a tree
    pub regrowth_probability: f64,
    /// Seed for the automaton's random stream
    pub seed: u64,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            forest_density: DEFAULT_FOREST_DENSITY,
            ignition_density: DEFAULT_IGNITION_DENSITY,
            direct_spread_probability: DEFAULT_DIRECT_SPREAD_PROBABILITY,
            diagonal_spread_probability: DEFAULT_DIAGONAL_SPREAD_PROBABILITY,
            spontaneous_ignition_probability: 0.0,
            regrowth_probability: 0.0,
            seed: DEFAULT_SEED,
        }
    }
}

impl AutomatonConfig {
    /// Same configuration with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Same configuration with different grid dimensions.
    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Same configuration with both spread probabilities replaced.
    pub fn with_spread(mut self, direct: f64, diagonal: f64) -> Self {
        self.direct_spread_probability = direct;
        self.diagonal_spread_probability = diagonal;
        self
    }

    /// Number of cells in the configured grid.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Configuration`] if either dimension is zero or
    /// the cell count exceeds [`MAX_CELLS`].
    pub fn cell_count(&self) -> Result<usize> {
        validate_dimensions(self.width, self.height)
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Configuration`] naming the first parameter that
    /// is out of range: a zero dimension, a grid larger than [`MAX_CELLS`], or
    /// a probability that is not finite or lies outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;
        validate_probability("forest_density", self.forest_density)?;
        validate_probability("ignition_density", self.ignition_density)?;
        validate_probability("direct_spread_probability", self.direct_spread_probability)?;
        validate_probability(
            "diagonal_spread_probability",
            self.diagonal_spread_probability,
        )?;
        validate_probability(
            "spontaneous_ignition_probability",
            self.spontaneous_ignition_probability,
        )?;
        validate_probability("regrowth_probability", self.regrowth_probability)?;
        Ok(())
    }
}

/// Validate grid dimensions and return the cell count.
pub(crate) fn validate_dimensions(width: usize, height: usize) -> Result<usize> {
    if width == 0 {
        return Err(FireSimError::configuration("width", "must be positive, got 0"));
    }
    if height == 0 {
        return Err(FireSimError::configuration("height", "must be positive, got 0"));
    }
    width
        .checked_mul(height)
        .filter(|&len| len <= MAX_CELLS)
        .ok_or_else(|| {
            FireSimError::configuration(
                "width",
                format!("{width}x{height} grid exceeds the {MAX_CELLS} cell limit"),
            )
        })
}

pub(crate) fn validate_probability(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FireSimError::invalid_probability(parameter, value))
    }
}
