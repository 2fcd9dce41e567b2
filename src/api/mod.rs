//! API Module
//!
//! HTTP handlers and routing for the reports REST API.
//!
//! # Endpoints
//! - `GET /api/world` - Worldwide figures for today
//! - `GET /api/countries` - ISO code to country name map
//! - `GET /api/countries/:iso` - Today's figures for one country
//! - `GET /api/countries/:iso/name` - Country name for an ISO code
//! - `GET /api/countries/:iso/six-months` - Last six months for one country
//! - `GET /api/iso/:country` - ISO code for a country name
//! - `GET /api/top10` - The ten countries with the most cases
//! - `GET /api/cache` - Cache counters and TTL
//! - `DELETE /api/cache` - Drop every cached response
//! - `DELETE /api/cache/:key` - Drop one cached response
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
