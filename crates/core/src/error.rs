//! Error type for automaton construction and grid access

use std::fmt;

/// Errors produced by the forest fire automaton.
///
/// Construction errors are fatal to that construction attempt. Bounds errors
/// indicate a caller defect; `FireAutomaton::step` never produces one.
#[derive(Debug, Clone, PartialEq)]
pub enum FireSimError {
    /// A construction parameter was rejected.
    Configuration {
        /// Name of the offending parameter (e.g. `"width"`, `"regrowth_probability"`)
        parameter: &'static str,
        /// Description of the constraint that was violated
        reason: String,
    },
    /// A coordinate outside `[0, width) x [0, height)` was queried.
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl FireSimError {
    /// Create a configuration error for `parameter`.
    pub fn configuration(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            parameter,
            reason: reason.into(),
        }
    }

    /// Create an error for a probability outside [0, 1] or non-finite.
    pub fn invalid_probability(parameter: &'static str, value: f64) -> Self {
        Self::configuration(
            parameter,
            format!("must be a finite probability in [0, 1], got {value}"),
        )
    }

    /// Returns true if this is a construction-time configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl fmt::Display for FireSimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { parameter, reason } => {
                write!(f, "invalid configuration parameter {parameter}: {reason}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "coordinate ({x}, {y}) is outside the {width}x{height} grid"
            ),
        }
    }
}

impl std::error::Error for FireSimError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FireSimError>;
