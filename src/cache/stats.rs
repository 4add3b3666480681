//! Cache Statistics Module
//!
//! Tracks interception metrics: hits, misses, background refreshes and
//! offline fallbacks. Diagnostic only.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache and interception metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Requests served from the cache
    pub hits: u64,
    /// Requests with no stored entry
    pub misses: u64,
    /// Completed background revalidations
    pub refreshes: u64,
    /// Navigation requests that fell back to the cached app shell
    pub shell_fallbacks: u64,
    /// Requests answered with the synthetic offline response
    pub offline_fallbacks: u64,
    /// Current number of entries in the current generation
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Refresh ==
    /// Increments the background-refresh counter.
    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    // == Record Shell Fallback ==
    /// Increments the shell-fallback counter.
    pub fn record_shell_fallback(&mut self) {
        self.shell_fallbacks += 1;
    }

    // == Record Offline Fallback ==
    /// Increments the offline-fallback counter.
    pub fn record_offline_fallback(&mut self) {
        self.offline_fallbacks += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
