//! TTL Cache Module
//!
//! Key-value store whose entries stop being servable a fixed time after insertion.
//! Expired entries are dropped lazily, on lookup or when the cache is sized.

use std::collections::HashMap;
use std::fmt;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL_SECS};

// == TTL Cache ==
/// Time-bounded cache keyed by opaque strings.
///
/// Every entry expires `ttl` after it was last added. Reads never refresh an
/// entry. All operations are total: a missing key and an expired key are
/// both plain misses.
#[derive(Debug)]
pub struct TtlCache<T, C = SystemClock> {
    /// Key to (value, expiry) storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Counters and the TTL applied to new entries
    stats: CacheStats,
    /// Time source
    clock: C,
}

impl<T> TtlCache<T, SystemClock> {
    // == Constructor ==
    /// Creates an empty cache with the default TTL of 100 seconds.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL_SECS)
    }

    /// Creates an empty cache whose entries live for `ttl_secs` seconds.
    pub fn with_ttl(ttl_secs: u64) -> Self {
        Self::with_clock(ttl_secs, SystemClock)
    }
}

impl<T> Default for TtlCache<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> TtlCache<T, C> {
    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(ttl_secs: u64, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(ttl_secs.saturating_mul(1000)),
            clock,
        }
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The expiry is always reset to now + TTL, even if the previous entry
    /// was still live.
    pub fn add(&mut self, key: impl Into<String>, value: T) {
        let entry = CacheEntry::new(value, self.clock.now_ms(), self.stats.ttl_ms);
        self.entries.insert(key.into(), entry);
    }

    // == Get ==
    /// Returns a copy of the live value for `key`.
    ///
    /// Counts one request per call. An expired entry is removed and counted
    /// as a miss, exactly like an absent key.
    pub fn get(&mut self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove(key);
        }

        self.stats.record_miss();
        None
    }

    // == Remove ==
    /// Removes the entry for `key`.
    ///
    /// Returns `true` if an entry (live or expired) was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry. Counters are left untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Size ==
    /// Removes expired entries, then returns how many remain.
    pub fn size(&mut self) -> usize {
        self.evict_expired();
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no live entries remain. Sweeps like [`size`](Self::size).
    pub fn is_empty(&mut self) -> bool {
        self.size() == 0
    }

    // == Evict Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove(&key);
        }
        count
    }

    // == Accessors ==
    /// TTL applied to new entries, in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.stats.ttl_ms
    }

    /// Changes the TTL for entries added from now on.
    ///
    /// Entries already stored keep the expiry they were given.
    pub fn set_ttl_ms(&mut self, ttl_ms: u64) {
        self.stats.ttl_ms = ttl_ms;
    }

    pub fn requests(&self) -> u64 {
        self.stats.requests
    }

    pub fn hits(&self) -> u64 {
        self.stats.hits
    }

    pub fn misses(&self) -> u64 {
        self.stats.misses
    }

    // == Stats ==
    /// Returns a copy of the current counters and TTL.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }
}

impl<T, C> fmt::Display for TtlCache<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.stats, f)
    }
}
