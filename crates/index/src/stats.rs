//! StatsRecorder: per-operation wall-clock timing aggregation.
//!
//! The recorder never alters a wrapped operation's outcome; callers time
//! the call and record the elapsed duration whether it succeeded or not.

use proxima_core::{IndexStats, TimeStat};
use std::time::Duration;

/// Operation kinds with a timing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Vector insert.
    Insert,
    /// Vector delete.
    Delete,
    /// Binary dump to file.
    Dump,
    /// Single-result search.
    Search,
    /// Top-N search.
    SearchN,
}

/// Accumulates one [`TimeStat`] per operation kind.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    stats: IndexStats,
}

impl StatsRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        StatsRecorder::default()
    }

    /// Fold one elapsed duration into the record for `kind`.
    pub fn record(&mut self, kind: OpKind, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.stat_mut(kind).observe(ms);
    }

    /// Copy of the accumulated stats.
    pub fn snapshot(&self) -> IndexStats {
        self.stats
    }

    fn stat_mut(&mut self, kind: OpKind) -> &mut TimeStat {
        match kind {
            OpKind::Insert => &mut self.stats.insert,
            OpKind::Delete => &mut self.stats.delete,
            OpKind::Dump => &mut self.stats.dump,
            OpKind::Search => &mut self.stats.search,
            OpKind::SearchN => &mut self.stats.search_n,
        }
    }
}
