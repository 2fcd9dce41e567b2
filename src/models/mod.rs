//! Data models for the reports service
//!
//! Upstream report payloads plus the DTOs used for HTTP response bodies.

pub mod report;
pub mod responses;

// Re-export commonly used types
pub use report::{CachedReport, Country, CountryName, IsoMap, LastSixMonths};
pub use responses::{
    CacheDetailsResponse, CountryNameResponse, ErrorResponse, HealthResponse, InvalidateResponse,
    IsoResponse,
};
