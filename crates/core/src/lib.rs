//! Forest Fire Automaton Core Library
//!
//! A probabilistic cellular automaton for wildfire spread on a 2D lattice.
//! Each cell is forest, fire or empty; fire reaches neighboring forest with a
//! direction-dependent probability every step and burns out after one step.
//!
//! ## Components
//!
//! - [`CellGrid`]: the W×H lattice of [`Cell`] states
//! - [`FireAutomaton`]: the double-buffered transition rule and per-frame
//!   [`StatisticsRecord`] history
//! - [`run_ensemble`]: many independently seeded automata in parallel

pub mod automaton;
pub mod config;
pub mod error;
pub mod ensemble;
pub mod grid;
pub mod random;
pub mod statistics;

// Re-export core types
pub use automaton::{FireAutomaton, Neighbor, TransitionRule};
pub use config::AutomatonConfig;
pub use ensemble::{run_ensemble, EnsembleRun, EnsembleSummary};
pub use error::FireSimError;
pub use grid::{Cell, CellCounts, CellGrid};
pub use statistics::{StatisticsLog, StatisticsRecord};
