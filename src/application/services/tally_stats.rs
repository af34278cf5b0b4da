use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide tally counters, surfaced on the health endpoint.
#[derive(Debug, Default)]
pub struct TallyStats {
    tallies_served: AtomicU64,
    rows_skipped: AtomicU64,
}

impl TallyStats {
    pub fn record(&self, skipped: u64) {
        self.tallies_served.fetch_add(1, Ordering::Relaxed);
        if skipped > 0 {
            self.rows_skipped.fetch_add(skipped, Ordering::Relaxed);
        }
    }

    pub fn tallies_served(&self) -> u64 {
        self.tallies_served.load(Ordering::Relaxed)
    }

    pub fn rows_skipped(&self) -> u64 {
        self.rows_skipped.load(Ordering::Relaxed)
    }
}
