//! Cache Statistics Module
//!
//! Tracks request, hit and miss counters alongside the configured TTL.

use std::fmt;

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of cache performance counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Time to live applied to new entries, in milliseconds
    pub ttl_ms: u64,
    /// Number of lookups
    pub requests: u64,
    /// Number of lookups that found a live entry
    pub hits: u64,
    /// Number of lookups that found nothing or an expired entry
    pub misses: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / requests, or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.requests as f64
        }
    }

    // == Record Hit ==
    /// Counts a lookup that was served from the cache.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.hits += 1;
    }

    // == Record Miss ==
    /// Counts a lookup that was not served from the cache.
    pub fn record_miss(&mut self) {
        self.requests += 1;
        self.misses += 1;
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{time_to_live='{}', requests='{}', hits='{}', misses='{}'}}",
            self.ttl_ms, self.requests, self.hits, self.misses
        )
    }
}
