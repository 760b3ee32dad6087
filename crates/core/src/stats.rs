//! Per-operation timing statistics.
//!
//! Every timed operation folds its elapsed wall-clock time into one
//! [`TimeStat`]; an index exposes the five records as [`IndexStats`].
//! Stats accumulate monotonically and reset only with index recreation.

use serde::{Deserialize, Serialize};

/// Timing record for one operation kind. All durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeStat {
    /// Number of recorded operations.
    pub count: u64,
    /// Sum of all recorded durations.
    pub total_ms: f64,
    /// Duration of the most recent operation.
    pub last_ms: f64,
    /// Smallest recorded duration (0 while count is 0).
    pub min_ms: f64,
    /// Largest recorded duration.
    pub max_ms: f64,
}

impl TimeStat {
    /// Fold one elapsed duration into this record.
    pub fn observe(&mut self, elapsed_ms: f64) {
        if self.count == 0 {
            self.min_ms = elapsed_ms;
            self.max_ms = elapsed_ms;
        } else {
            self.min_ms = self.min_ms.min(elapsed_ms);
            self.max_ms = self.max_ms.max(elapsed_ms);
        }
        self.count += 1;
        self.total_ms += elapsed_ms;
        self.last_ms = elapsed_ms;
    }

    /// Mean duration, or 0 while nothing has been recorded.
    pub fn mean_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }
}

/// Aggregated timing stats for one index, one record per operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Insert timings.
    pub insert: TimeStat,
    /// Delete timings.
    pub delete: TimeStat,
    /// Dump timings.
    pub dump: TimeStat,
    /// Single-result search timings.
    pub search: TimeStat,
    /// Top-N search timings.
    pub search_n: TimeStat,
}
