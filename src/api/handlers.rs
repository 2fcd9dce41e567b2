//! API Handlers
//!
//! HTTP request handlers for each reports endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::Config;
use crate::error::{ReportsError, Result};
use crate::models::{
    CacheDetailsResponse, Country, CountryNameResponse, HealthResponse, InvalidateResponse,
    IsoMap, IsoResponse, LastSixMonths,
};
use crate::service::ReportsService;
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Reports facade, owning the shared cache
    pub reports: Arc<ReportsService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(reports: ReportsService) -> Self {
        Self {
            reports: Arc::new(reports),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the upstream client and a cache with the configured TTL.
    pub fn from_config(config: &Config) -> Result<Self> {
        let upstream = UpstreamClient::from_config(config)?;
        Ok(Self::new(ReportsService::new(upstream, config.cache_ttl)))
    }
}

/// Handler for GET /api/world
pub async fn world_handler(State(state): State<AppState>) -> Result<Json<Country>> {
    Ok(Json(state.reports.world().await?))
}

/// Handler for GET /api/countries
///
/// Returns the ISO code to country name map.
pub async fn countries_handler(State(state): State<AppState>) -> Result<Json<IsoMap>> {
    Ok(Json(state.reports.iso_map().await?))
}

/// Handler for GET /api/countries/:iso
pub async fn country_today_handler(
    State(state): State<AppState>,
    Path(iso): Path<String>,
) -> Result<Json<Country>> {
    Ok(Json(state.reports.country_today(&iso).await?))
}

/// Handler for GET /api/countries/:iso/name
pub async fn country_name_handler(
    State(state): State<AppState>,
    Path(iso): Path<String>,
) -> Result<Json<CountryNameResponse>> {
    let country = state
        .reports
        .country_from_iso(&iso)
        .await?
        .ok_or_else(|| ReportsError::NotFound(format!("country with ISO '{}'", iso)))?;

    Ok(Json(CountryNameResponse::new(iso.to_lowercase(), country)))
}

/// Handler for GET /api/countries/:iso/six-months
pub async fn six_months_handler(
    State(state): State<AppState>,
    Path(iso): Path<String>,
) -> Result<Json<Vec<LastSixMonths>>> {
    Ok(Json(state.reports.last_six_months(&iso).await?))
}

/// Handler for GET /api/iso/:country
pub async fn iso_handler(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<IsoResponse>> {
    let iso = state
        .reports
        .iso_from_country(&country)
        .await?
        .ok_or_else(|| ReportsError::NotFound(format!("country '{}'", country)))?;

    Ok(Json(IsoResponse::new(country, iso)))
}

/// Handler for GET /api/top10
pub async fn top10_handler(State(state): State<AppState>) -> Result<Json<Vec<Country>>> {
    Ok(Json(state.reports.top10().await?))
}

/// Handler for GET /api/cache
pub async fn cache_details_handler(State(state): State<AppState>) -> Json<CacheDetailsResponse> {
    Json(state.reports.cache_details().await)
}

/// Handler for DELETE /api/cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    state.reports.clear_cache().await;
    Json(InvalidateResponse::cleared())
}

/// Handler for DELETE /api/cache/:key
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    state.reports.invalidate(&key).await?;
    Ok(Json(InvalidateResponse::removed(&key)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
