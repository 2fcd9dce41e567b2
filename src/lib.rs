//! COVID Reports - A REST facade over an upstream COVID statistics API
//!
//! Upstream responses are memoized in a time-bounded cache with lazy expiry.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod upstream;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use service::ReportsService;
