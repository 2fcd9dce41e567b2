//! Cache Entry Module
//!
//! Defines a stored value paired with its expiry timestamp.

// == Cache Entry ==
/// A single cached value and the instant it stops being servable.
///
/// Value and expiry live in the same record, so an entry can never exist
/// without its expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry inserted at `now_ms` that lives for `ttl_ms`.
    pub fn new(value: T, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// Boundary condition: an entry is expired once `now_ms >= expires_at`,
    /// so it is live only while `now_ms < expires_at`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}
