//! Forest fire cellular automaton
//!
//! `FireAutomaton` owns the current grid, a next-step buffer, its random stream
//! and the statistics log. Each `step()` builds the next grid from the current
//! one into the back buffer, swaps the two, and appends a statistics record.
//!
//! # Example
//!
//! ```rust
//! use forest_fire_core::{AutomatonConfig, FireAutomaton};
//!
//! let config = AutomatonConfig {
//!     width: 32,
//!     height: 32,
//!     ignition_density: 0.01,
//!     ..Default::default()
//! };
//! let mut automaton = FireAutomaton::new(config).unwrap();
//! let record = automaton.step();
//! assert_eq!(record.frame, 1);
//! assert_eq!(automaton.history().len(), 2);
//! ```

mod rule;

pub use rule::{Neighbor, TransitionRule};

use crate::config::AutomatonConfig;
use crate::error::{FireSimError, Result};
use crate::grid::{Cell, CellGrid};
use crate::random::{seeded_rng, SimRng};
use crate::statistics::{StatisticsLog, StatisticsRecord};
use tracing::{debug, info};

/// Probabilistic forest fire automaton on a fixed W×H lattice.
#[derive(Debug, Clone)]
pub struct FireAutomaton {
    config: AutomatonConfig,
    rule: TransitionRule,

    // Double buffer: `step()` reads `grid`, writes `back`, then swaps
    grid: CellGrid,
    back: CellGrid,

    rng: SimRng,
    log: StatisticsLog,
}

impl FireAutomaton {
    /// Create an automaton with a randomly initialized grid.
    ///
    /// The grid is drawn from the config's seed using `forest_density` and
    /// `ignition_density`, and frame 0 is recorded immediately.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Configuration`] if any parameter is invalid.
    pub fn new(config: AutomatonConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let grid = CellGrid::new(
            config.width,
            config.height,
            config.forest_density,
            config.ignition_density,
            &mut rng,
        )?;
        Ok(Self::assemble(config, grid, rng))
    }

    /// Create an automaton around a hand-placed grid.
    ///
    /// The densities in `config` are ignored; the seed still drives every
    /// subsequent step.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Configuration`] if any parameter is invalid or
    /// the grid's dimensions differ from the config's.
    pub fn from_grid(config: AutomatonConfig, grid: CellGrid) -> Result<Self> {
        config.validate()?;
        if (grid.width(), grid.height()) != (config.width, config.height) {
            return Err(FireSimError::configuration(
                "width",
                format!(
                    "grid is {}x{} but configuration expects {}x{}",
                    grid.width(),
                    grid.height(),
                    config.width,
                    config.height
                ),
            ));
        }
        let rng = seeded_rng(config.seed);
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: AutomatonConfig, grid: CellGrid, rng: SimRng) -> Self {
        let log = StatisticsLog::new(grid.counts());
        let initial = log.latest();
        info!(
            "Forest fire automaton initialized: {}x{} grid, seed={}, trees={}, burning={}, empty={}",
            config.width, config.height, config.seed, initial.trees, initial.burning, initial.empty
        );

        Self {
            rule: TransitionRule::from_config(&config),
            back: grid.clone(),
            grid,
            rng,
            log,
            config,
        }
    }

    /// Advance one frame and return its statistics record.
    pub fn step(&mut self) -> StatisticsRecord {
        self.rule.apply(&self.grid, &mut self.back, &mut self.rng);
        std::mem::swap(&mut self.grid, &mut self.back);

        let record = self.log.record(self.grid.counts());
        debug!(
            "Frame {}: trees={}, burning={}, empty={}, burned={}",
            record.frame, record.trees, record.burning, record.empty, record.burned
        );
        record
    }

    /// Advance `steps` frames and return the last record (the current one if
    /// `steps` is 0).
    pub fn run(&mut self, steps: u64) -> StatisticsRecord {
        for _ in 0..steps {
            self.step();
        }
        self.current_statistics()
    }

    /// Step until no cell is burning or `max_steps` frames have been taken.
    ///
    /// Returns the number of steps taken. With regrowth or spontaneous
    /// ignition enabled a fire may never die out, so the cap always applies.
    pub fn run_until_extinguished(&mut self, max_steps: u64) -> u64 {
        let mut taken = 0;
        while taken < max_steps && !self.is_extinguished() {
            self.step();
            taken += 1;
        }
        debug!(
            "Stopped after {} steps at frame {} (extinguished={})",
            taken,
            self.frame(),
            self.is_extinguished()
        );
        taken
    }

    /// Most recent statistics record.
    pub fn current_statistics(&self) -> StatisticsRecord {
        self.log.latest()
    }

    /// All records so far, frame 0 first.
    pub fn history(&self) -> &[StatisticsRecord] {
        self.log.records()
    }

    /// Largest burning count over all frames so far.
    pub fn peak_burning(&self) -> usize {
        self.log.peak_burning()
    }

    /// State of the cell at (x, y) in the current frame.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn cell_state(&self, x: usize, y: usize) -> Result<Cell> {
        self.grid.get(x, y)
    }

    /// Current frame index.
    pub fn frame(&self) -> u64 {
        self.log.latest().frame
    }

    /// True when nothing is burning in the current frame.
    pub fn is_extinguished(&self) -> bool {
        self.log.latest().burning == 0
    }

    /// Current grid, for renderers that draw whole rows.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest_with_fire(width: usize, height: usize, fires: &[(usize, usize)]) -> CellGrid {
        let mut grid = CellGrid::filled(width, height, Cell::Tree).unwrap();
        for &(x, y) in fires {
            grid.set(x, y, Cell::Fire).unwrap();
        }
        grid
    }

    #[test]
    fn test_new_records_frame_zero() {
        let automaton = FireAutomaton::new(AutomatonConfig::default()).unwrap();
        let stats = automaton.current_statistics();
        assert_eq!(stats.frame, 0);
        assert_eq!(stats.total_cells(), 120 * 120);
        assert_eq!(stats.burned, stats.burning as u64);
        assert_eq!(automaton.history(), &[stats]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AutomatonConfig {
            regrowth_probability: 2.0,
            ..Default::default()
        };
        let err = FireAutomaton::new(config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_grid_dimension_mismatch() {
        let grid = CellGrid::filled(4, 4, Cell::Tree).unwrap();
        let config = AutomatonConfig::default().with_dimensions(5, 4);
        assert!(FireAutomaton::from_grid(config, grid).is_err());
    }

    #[test]
    fn test_step_appends_and_swaps() {
        let config = AutomatonConfig::default()
            .with_dimensions(5, 1)
            .with_spread(1.0, 1.0);
        let mut automaton =
            FireAutomaton::from_grid(config, forest_with_fire(5, 1, &[(0, 0)])).unwrap();

        let r1 = automaton.step();
        assert_eq!(r1.frame, 1);
        assert_eq!((r1.trees, r1.burning, r1.empty), (3, 1, 1));
        assert_eq!(automaton.cell_state(1, 0), Ok(Cell::Fire));

        let r2 = automaton.step();
        assert_eq!(automaton.cell_state(2, 0), Ok(Cell::Fire));
        assert_eq!(r2.burned, 3);
        assert_eq!(automaton.history().len(), 3);
        assert_eq!(automaton.current_statistics(), r2);
    }

    #[test]
    fn test_run_until_extinguished() {
        let config = AutomatonConfig::default()
            .with_dimensions(6, 1)
            .with_spread(1.0, 1.0);
        let mut automaton =
            FireAutomaton::from_grid(config, forest_with_fire(6, 1, &[(0, 0)])).unwrap();

        let taken = automaton.run_until_extinguished(100);
        assert_eq!(taken, 6);
        assert!(automaton.is_extinguished());
        assert_eq!(automaton.current_statistics().empty, 6);
        assert_eq!(automaton.current_statistics().burned, 6);
        assert_eq!(automaton.peak_burning(), 1);
    }

    #[test]
    fn test_run_until_extinguished_respects_cap() {
        let config = AutomatonConfig::default()
            .with_dimensions(50, 1)
            .with_spread(1.0, 1.0);
        let mut automaton =
            FireAutomaton::from_grid(config, forest_with_fire(50, 1, &[(0, 0)])).unwrap();
        assert_eq!(automaton.run_until_extinguished(10), 10);
        assert!(!automaton.is_extinguished());
        assert_eq!(automaton.frame(), 10);
    }

    #[test]
    fn test_run_zero_steps() {
        let mut automaton =
            FireAutomaton::new(AutomatonConfig::default().with_dimensions(8, 8)).unwrap();
        let before = automaton.current_statistics();
        assert_eq!(automaton.run(0), before);
        assert_eq!(automaton.run(3).frame, 3);
    }

    #[test]
    fn test_cell_state_out_of_bounds() {
        let automaton =
            FireAutomaton::new(AutomatonConfig::default().with_dimensions(3, 2)).unwrap();
        assert!(matches!(
            automaton.cell_state(3, 0),
            Err(FireSimError::OutOfBounds { .. })
        ));
        assert_eq!((automaton.width(), automaton.height()), (3, 2));
        assert_eq!(automaton.config().width, 3);
        assert_eq!(automaton.grid().len(), 6);
    }
}
