//! Monte Carlo ensembles of independent automata
//!
//! Each run is a separate [`FireAutomaton`] with its own seed and random stream,
//! so running them on the rayon pool yields exactly the histories a sequential
//! loop would.

use crate::automaton::FireAutomaton;
use crate::config::AutomatonConfig;
use crate::error::Result;
use crate::statistics::StatisticsRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// History of one ensemble member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleRun {
    /// Seed this member was run with
    pub seed: u64,
    /// Statistics for frames 0..=final
    pub history: Vec<StatisticsRecord>,
}

impl EnsembleRun {
    /// Last record of the run.
    pub fn final_record(&self) -> Option<&StatisticsRecord> {
        self.history.last()
    }

    /// Largest burning count over the run.
    pub fn peak_burning(&self) -> usize {
        self.history.iter().map(|r| r.burning).max().unwrap_or(0)
    }

    /// True if the run ended with nothing burning.
    pub fn extinguished(&self) -> bool {
        self.final_record().is_some_and(|r| r.burning == 0)
    }
}

/// Run `runs` automata that share `config` but use seeds
/// `config.seed, config.seed + 1, ...` (wrapping).
///
/// Each member steps until extinguished or until `max_steps` steps. Results
/// are ordered by member index.
///
/// # Errors
///
/// Returns [`FireSimError::Configuration`](crate::FireSimError::Configuration)
/// if `config` is invalid.
pub fn run_ensemble(
    config: &AutomatonConfig,
    runs: usize,
    max_steps: u64,
) -> Result<Vec<EnsembleRun>> {
    config.validate()?;
    info!(
        "Running ensemble of {} members on a {}x{} grid (base seed {}, max {} steps)",
        runs, config.width, config.height, config.seed, max_steps
    );

    let results = (0..runs)
        .into_par_iter()
        .map(|i| -> Result<EnsembleRun> {
            let seed = config.seed.wrapping_add(i as u64);
            let mut automaton = FireAutomaton::new(config.clone().with_seed(seed))?;
            automaton.run_until_extinguished(max_steps);
            Ok(EnsembleRun {
                seed,
                history: automaton.history().to_vec(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Ensemble finished: {} runs", results.len());
    Ok(results)
}

/// Aggregate figures over an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub runs: usize,
    /// Mean final cumulative burned count
    pub mean_burned: f64,
    pub min_burned: u64,
    pub max_burned: u64,
    /// Mean of each run's peak burning count
    pub mean_peak_burning: f64,
    /// Mean final frame index
    pub mean_frames: f64,
    /// Runs that ended with nothing burning
    pub extinguished_runs: usize,
}

impl EnsembleSummary {
    /// Summarize `runs`; `None` for an empty ensemble.
    pub fn from_runs(runs: &[EnsembleRun]) -> Option<Self> {
        let finals: Vec<&StatisticsRecord> =
            runs.iter().filter_map(EnsembleRun::final_record).collect();
        if finals.is_empty() {
            return None;
        }
        let n = finals.len() as f64;

        Some(Self {
            runs: runs.len(),
            mean_burned: finals.iter().map(|r| r.burned as f64).sum::<f64>() / n,
            min_burned: finals.iter().map(|r| r.burned).min().unwrap_or(0),
            max_burned: finals.iter().map(|r| r.burned).max().unwrap_or(0),
            mean_peak_burning: runs.iter().map(|r| r.peak_burning() as f64).sum::<f64>() / n,
            mean_frames: finals.iter().map(|r| r.frame as f64).sum::<f64>() / n,
            extinguished_runs: runs.iter().filter(|r| r.extinguished()).count(),
        })
    }
}
