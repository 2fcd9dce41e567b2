//! API Routes
//!
//! Configures the Axum router with all reports endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_details_handler, clear_cache_handler, countries_handler, country_name_handler,
    country_today_handler, health_handler, invalidate_handler, iso_handler, six_months_handler,
    top10_handler, world_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/world", get(world_handler))
        .route("/api/countries", get(countries_handler))
        .route("/api/countries/:iso", get(country_today_handler))
        .route("/api/countries/:iso/name", get(country_name_handler))
        .route("/api/countries/:iso/six-months", get(six_months_handler))
        .route("/api/iso/:country", get(iso_handler))
        .route("/api/top10", get(top10_handler))
        .route("/api/cache", get(cache_details_handler).delete(clear_cache_handler))
        .route("/api/cache/:key", delete(invalidate_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
