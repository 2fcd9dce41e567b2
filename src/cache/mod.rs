//! Cache Module
//!
//! Provides an in-memory, time-bounded cache with lazy expiry.

mod clock;
mod entry;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// TTL used when none is configured, in seconds
pub const DEFAULT_TTL_SECS: u64 = 100;

/// A cache shared between request handlers.
///
/// Lookups and sizing evict, so they need the write lock; counters and TTL
/// can be read under the read lock.
pub type SharedCache<T, C = SystemClock> = Arc<RwLock<TtlCache<T, C>>>;
