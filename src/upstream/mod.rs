//! Upstream Module
//!
//! HTTP client for the COVID statistics API the service fronts.

mod client;

pub use client::UpstreamClient;
