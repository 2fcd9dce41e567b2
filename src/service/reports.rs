//! Reports Service
//!
//! Answers report queries from the shared TTL cache and falls back to the
//! upstream API on a miss, storing what it fetched.
//!
//! The cache lock is only held for the cache operation itself, never across
//! an upstream request. Two concurrent misses on the same key may both fetch;
//! the later `add` wins.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{SharedCache, TtlCache};
use crate::error::{ReportsError, Result};
use crate::models::{CacheDetailsResponse, CachedReport, Country, IsoMap, LastSixMonths};
use crate::upstream::UpstreamClient;

/// Number of countries returned by the most-affected ranking
pub const TOP_COUNT: usize = 10;

const WORLD_KEY: &str = "world";
const ISO_MAP_KEY: &str = "createMapCountryIso";
const TOP10_KEY: &str = "top10";

fn country_key(iso: &str, name: &str) -> String {
    format!("{}_{}", iso, name)
}

fn six_months_key(iso: &str) -> String {
    format!("sixmonth_{}", iso)
}

/// Reports facade over the upstream API.
#[derive(Debug, Clone)]
pub struct ReportsService {
    upstream: UpstreamClient,
    cache: SharedCache<CachedReport>,
}

impl ReportsService {
    /// Creates a service with its own cache whose entries live `cache_ttl_secs`.
    pub fn new(upstream: UpstreamClient, cache_ttl_secs: u64) -> Self {
        Self::with_cache(
            upstream,
            Arc::new(RwLock::new(TtlCache::with_ttl(cache_ttl_secs))),
        )
    }

    /// Creates a service over an existing shared cache.
    pub fn with_cache(upstream: UpstreamClient, cache: SharedCache<CachedReport>) -> Self {
        Self { upstream, cache }
    }

    /// The cache backing this service.
    pub fn cache(&self) -> &SharedCache<CachedReport> {
        &self.cache
    }

    async fn cached(&self, key: &str) -> Option<CachedReport> {
        self.cache.write().await.get(key)
    }

    async fn store(&self, key: &str, report: CachedReport) {
        self.cache.write().await.add(key, report);
    }

    // == World ==
    /// Worldwide figures for today.
    pub async fn world(&self) -> Result<Country> {
        if let Some(CachedReport::World(world)) = self.cached(WORLD_KEY).await {
            info!("[CACHE] world data");
            return Ok(world);
        }

        info!("[REQUEST] world data");
        let world = self.upstream.world().await?;
        self.store(WORLD_KEY, CachedReport::World(world.clone())).await;

        Ok(world)
    }

    // == ISO Map ==
    /// Lowercase three-letter ISO code to country name, for every country.
    pub async fn iso_map(&self) -> Result<IsoMap> {
        if let Some(CachedReport::IsoMap(map)) = self.cached(ISO_MAP_KEY).await {
            info!("[CACHE] ISO to country map");
            return Ok(map);
        }

        info!("[REQUEST] ISO to country map");
        let map: IsoMap = self
            .upstream
            .country_names()
            .await?
            .into_iter()
            .map(|entry| (entry.iso.to_lowercase(), entry.country))
            .collect();
        self.store(ISO_MAP_KEY, CachedReport::IsoMap(map.clone())).await;

        Ok(map)
    }

    /// Country name for an ISO code, ignoring case.
    pub async fn country_from_iso(&self, iso: &str) -> Result<Option<String>> {
        let iso = normalize_iso(iso)?;
        Ok(self.iso_map().await?.remove(&iso))
    }

    /// ISO code for a country name, ignoring case.
    pub async fn iso_from_country(&self, country: &str) -> Result<Option<String>> {
        let country = country.trim();
        if country.is_empty() {
            return Err(ReportsError::InvalidRequest(
                "Country name cannot be empty".to_string(),
            ));
        }

        let wanted = country.to_lowercase();
        Ok(self
            .iso_map()
            .await?
            .into_iter()
            .find(|(_, name)| name.to_lowercase() == wanted)
            .map(|(iso, _)| iso))
    }

    // == Country Today ==
    /// Today's figures for the country with the given ISO code.
    pub async fn country_today(&self, iso: &str) -> Result<Country> {
        let iso = normalize_iso(iso)?;
        let name = self
            .iso_map()
            .await?
            .remove(&iso)
            .ok_or_else(|| ReportsError::NotFound(format!("country with ISO '{}'", iso)))?;

        let key = country_key(&iso, &name);
        if let Some(CachedReport::CountryToday(country)) = self.cached(&key).await {
            info!("[CACHE] country data for {}", name);
            return Ok(country);
        }

        info!("[REQUEST] country data for {}", name);
        let country = self.upstream.country_report(&name, &iso).await?;
        self.store(&key, CachedReport::CountryToday(country.clone())).await;

        Ok(country)
    }

    // == Last Six Months ==
    /// Daily figures for the last six months of one country.
    pub async fn last_six_months(&self, iso: &str) -> Result<Vec<LastSixMonths>> {
        let iso = normalize_iso(iso)?;
        let key = six_months_key(&iso);

        if let Some(CachedReport::SixMonths(days)) = self.cached(&key).await {
            info!("[CACHE] last six months for {}", iso);
            return Ok(days);
        }

        info!("[REQUEST] last six months for {}", iso);
        let days = self.upstream.six_months(&iso).await?;
        self.store(&key, CachedReport::SixMonths(days.clone())).await;

        Ok(days)
    }

    // == Top 10 ==
    /// The countries with the most total cases, highest first.
    pub async fn top10(&self) -> Result<Vec<Country>> {
        if let Some(CachedReport::Top10(top)) = self.cached(TOP10_KEY).await {
            info!("[CACHE] top {} most affected", TOP_COUNT);
            return Ok(top);
        }

        info!("[REQUEST] top {} most affected", TOP_COUNT);
        let top = rank_most_affected(self.upstream.all_countries().await?);
        self.store(TOP10_KEY, CachedReport::Top10(top.clone())).await;

        Ok(top)
    }

    // == Cache Maintenance ==
    /// Human-readable snapshot of the cache TTL and counters.
    pub async fn cache_summary(&self) -> String {
        self.cache.read().await.to_string()
    }

    /// Counters, TTL and live entry count. Drops expired entries.
    pub async fn cache_details(&self) -> CacheDetailsResponse {
        let mut cache = self.cache.write().await;
        let entries = cache.size();
        CacheDetailsResponse::new(&cache.stats(), entries)
    }

    /// Drops one cached response by key.
    pub async fn invalidate(&self, key: &str) -> Result<()> {
        if self.cache.write().await.remove(key) {
            info!("Invalidated cache key {}", key);
            Ok(())
        } else {
            Err(ReportsError::NotFound(format!("cache key '{}'", key)))
        }
    }

    /// Drops every cached response. Counters are kept.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        info!("Cache cleared");
    }
}

fn normalize_iso(iso: &str) -> Result<String> {
    let iso = iso.trim();
    if iso.is_empty() || !iso.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ReportsError::InvalidRequest(format!(
            "ISO code must be alphabetic, got '{}'",
            iso
        )));
    }
    Ok(iso.to_lowercase())
}

fn rank_most_affected(countries: Vec<Country>) -> Vec<Country> {
    let mut ranked: Vec<Country> = countries
        .into_iter()
        .filter(|country| !country.is_aggregate())
        .collect();
    ranked.sort_by(|a, b| b.total_cases.cmp(&a.total_cases));
    ranked.truncate(TOP_COUNT);
    ranked
}
