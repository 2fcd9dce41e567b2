//! Response DTOs for the reports API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! upstream reports passed through as-is.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the cache diagnostics endpoint (GET /api/cache)
#[derive(Debug, Clone, Serialize)]
pub struct CacheDetailsResponse {
    /// Human-readable snapshot of TTL and counters
    pub details: String,
    /// TTL applied to new entries, in milliseconds
    pub time_to_live_ms: u64,
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    /// Live entries after expired ones were dropped
    pub entries: usize,
    /// hits / requests
    pub hit_rate: f64,
}

impl CacheDetailsResponse {
    /// Creates a new CacheDetailsResponse from a stats snapshot
    pub fn new(stats: &CacheStats, entries: usize) -> Self {
        Self {
            details: stats.to_string(),
            time_to_live_ms: stats.ttl_ms,
            requests: stats.requests,
            hits: stats.hits,
            misses: stats.misses,
            entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the ISO lookup (GET /api/iso/:country)
#[derive(Debug, Clone, Serialize)]
pub struct IsoResponse {
    pub country: String,
    pub iso: String,
}

impl IsoResponse {
    pub fn new(country: impl Into<String>, iso: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            iso: iso.into(),
        }
    }
}

/// Response body for the country name lookup (GET /api/countries/:iso/name)
#[derive(Debug, Clone, Serialize)]
pub struct CountryNameResponse {
    pub iso: String,
    pub country: String,
}

impl CountryNameResponse {
    pub fn new(iso: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            iso: iso.into(),
            country: country.into(),
        }
    }
}

/// Response body for cache invalidation (DELETE /api/cache, DELETE /api/cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
}

impl InvalidateResponse {
    /// Response for a single removed key
    pub fn removed(key: &str) -> Self {
        Self {
            message: format!("Key '{}' removed from cache", key),
        }
    }

    /// Response for a full clear
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
