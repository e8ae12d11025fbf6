//! Per-frame aggregate statistics

use crate::grid::CellCounts;
use serde::{Deserialize, Serialize};

/// Snapshot of the grid's aggregate state after one frame.
///
/// Frame 0 describes the initial grid; each `step()` appends one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatisticsRecord {
    /// Frame index, starting at 0
    pub frame: u64,
    /// Cells holding unburned forest
    pub trees: usize,
    /// Cells burning this frame
    pub burning: usize,
    /// Empty cells (bare or burned out)
    pub empty: usize,
    /// Running sum of `burning` over frames 0..=frame
    pub burned: u64,
}

impl StatisticsRecord {
    /// Record for the initial grid.
    pub fn initial(counts: CellCounts) -> Self {
        Self {
            frame: 0,
            trees: counts.trees,
            burning: counts.burning,
            empty: counts.empty,
            burned: counts.burning as u64,
        }
    }

    /// Record for the frame after `self`, given the new grid's counts.
    pub fn next(&self, counts: CellCounts) -> Self {
        Self {
            frame: self.frame + 1,
            trees: counts.trees,
            burning: counts.burning,
            empty: counts.empty,
            burned: self.burned + counts.burning as u64,
        }
    }

    /// Total cells tallied in this record.
    pub fn total_cells(&self) -> usize {
        self.trees + self.burning + self.empty
    }
}

/// Append-only sequence of statistics records.
///
/// Always holds at least the frame 0 record. Records are never modified once
/// pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsLog {
    records: Vec<StatisticsRecord>,
}

impl StatisticsLog {
    pub fn new(initial: CellCounts) -> Self {
        Self {
            records: vec![StatisticsRecord::initial(initial)],
        }
    }

    /// Append the record for a newly completed frame and return it.
    pub fn record(&mut self, counts: CellCounts) -> StatisticsRecord {
        let next = self.latest().next(counts);
        self.records.push(next);
        next
    }

    /// Most recent record.
    pub fn latest(&self) -> StatisticsRecord {
        // Non-empty from construction onward
        self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[StatisticsRecord] {
        &self.records
    }

    /// Largest burning count seen so far.
    pub fn peak_burning(&self) -> usize {
        self.records.iter().map(|r| r.burning).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(trees: usize, burning: usize, empty: usize) -> CellCounts {
        CellCounts {
            trees,
            burning,
            empty,
        }
    }

    #[test]
    fn test_initial_record_counts_burning_once() {
        let record = StatisticsRecord::initial(counts(5, 2, 3));
        assert_eq!(record.frame, 0);
        assert_eq!(record.burned, 2);
        assert_eq!(record.total_cells(), 10);
    }

    #[test]
    fn test_log_accumulates_burned() {
        let mut log = StatisticsLog::new(counts(8, 1, 1));
        let r1 = log.record(counts(5, 3, 2));
        let r2 = log.record(counts(5, 0, 5));

        assert_eq!(r1.frame, 1);
        assert_eq!(r1.burned, 4);
        assert_eq!(r2.frame, 2);
        assert_eq!(r2.burned, 4);
        assert_eq!(log.latest(), r2);
        assert_eq!(log.records().len(), 3);
        assert_eq!(log.peak_burning(), 3);
    }
}
