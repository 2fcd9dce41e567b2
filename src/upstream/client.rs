//! Upstream API client
//!
//! Fetches raw report payloads from the VACCOVID tracker API (or anything
//! serving the same routes).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{ReportsError, Result};
use crate::models::{Country, CountryName, LastSixMonths};

const WORLD_PATH: &[&str] = &["npm-covid-data", "world"];
const COUNTRY_NAMES_PATH: &[&str] = &["npm-covid-data", "countries-name-ordered"];
// The empty segment keeps the trailing slash the upstream route expects.
const ALL_COUNTRIES_PATH: &[&str] = &["npm-covid-data", ""];

/// Client for the upstream statistics API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Creates a client that sends requests to `base_url` using `http`.
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client with the RapidAPI headers and timeout from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("x-rapidapi-host", header_value(&config.upstream_host)?);
        if let Some(key) = &config.upstream_api_key {
            let mut value = header_value(key)?;
            value.set_sensitive(true);
            headers.insert("x-rapidapi-key", value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.upstream_timeout))
            .build()?;

        Ok(Self::new(config.upstream_base_url.clone(), http))
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Worldwide aggregate for today.
    pub async fn world(&self) -> Result<Country> {
        let rows: Vec<Country> = self.fetch(WORLD_PATH).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ReportsError::NotFound("world data".to_string()))
    }

    /// Every country with its three-letter ISO code, ordered by name.
    pub async fn country_names(&self) -> Result<Vec<CountryName>> {
        self.fetch(COUNTRY_NAMES_PATH).await
    }

    /// Today's figures for one country.
    pub async fn country_report(&self, name: &str, iso: &str) -> Result<Country> {
        let path = ["npm-covid-data", "country-report-iso-based", name, iso];
        let rows: Vec<Country> = self.fetch(&path).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ReportsError::NotFound(format!("report for '{}'", name)))
    }

    /// Daily figures of the last six months for one country.
    pub async fn six_months(&self, iso: &str) -> Result<Vec<LastSixMonths>> {
        self.fetch(&["covid-ovid-data", "sixmonth", iso]).await
    }

    /// Today's figures for every country, including aggregate rows.
    pub async fn all_countries(&self) -> Result<Vec<Country>> {
        self.fetch(ALL_COUNTRIES_PATH).await
    }

    /// Resolves `segments` against the base URL, percent-encoding each one.
    fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let invalid_base = |reason: String| {
            ReportsError::Internal(format!("bad upstream base URL '{}': {}", self.base_url, reason))
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid_base(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid_base("cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url_for(segments)?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ReportsError::NotFound(segments.join("/")));
        }

        Ok(response.error_for_status()?.json::<T>().await?)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ReportsError::Internal(format!("invalid upstream header value: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap as AxumHeaders, StatusCode as AxumStatus},
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_world_takes_first_row() {
        let router = Router::new().route(
            "/npm-covid-data/world",
            get(|| async { Json(json!([{"Country": "World", "TotalCases": 42}])) }),
        );
        let client = UpstreamClient::new(spawn_upstream(router).await, Client::new());

        let world = client.world().await.unwrap();
        assert_eq!(world.name, "World");
        assert_eq!(world.total_cases, 42);
    }

    #[tokio::test]
    async fn test_world_empty_is_not_found() {
        let router = Router::new().route(
            "/npm-covid-data/world",
            get(|| async { Json(json!([])) }),
        );
        let client = UpstreamClient::new(spawn_upstream(router).await, Client::new());

        let result = client.world().await;
        assert!(matches!(result, Err(ReportsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_upstream_404_is_not_found() {
        let client = UpstreamClient::new(spawn_upstream(Router::new()).await, Client::new());

        let result = client.six_months("xyz").await;
        assert!(matches!(result, Err(ReportsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_upstream_500_is_upstream_error() {
        let router = Router::new().route(
            "/npm-covid-data/",
            get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        );
        let client = UpstreamClient::new(spawn_upstream(router).await, Client::new());

        let result = client.all_countries().await;
        assert!(matches!(result, Err(ReportsError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_upstream_error() {
        let router = Router::new().route(
            "/npm-covid-data/countries-name-ordered",
            get(|| async { "not json" }),
        );
        let client = UpstreamClient::new(spawn_upstream(router).await, Client::new());

        let result = client.country_names().await;
        assert!(matches!(result, Err(ReportsError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_from_config_sends_rapidapi_headers() {
        let router = Router::new().route(
            "/npm-covid-data/world",
            get(|headers: AxumHeaders| async move {
                let key = headers
                    .get("x-rapidapi-key")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let host = headers
                    .get("x-rapidapi-host")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!([{"Country": key, "Continent": host}]))
            }),
        );
        let config = Config {
            upstream_base_url: spawn_upstream(router).await,
            upstream_host: "example.test".to_string(),
            upstream_api_key: Some("secret".to_string()),
            ..Config::default()
        };
        let client = UpstreamClient::from_config(&config).unwrap();

        let world = client.world().await.unwrap();
        assert_eq!(world.name, "secret");
        assert_eq!(world.continent, "example.test");
    }

    #[tokio::test]
    async fn test_country_report_path() {
        let router = Router::new().route(
            "/npm-covid-data/country-report-iso-based/:name/:iso",
            get(
                |axum::extract::Path((name, iso)): axum::extract::Path<(String, String)>| async move {
                    Json(json!([{"Country": name, "ThreeLetterSymbol": iso}]))
                },
            ),
        );
        let client = UpstreamClient::new(spawn_upstream(router).await, Client::new());

        let report = client.country_report("Portugal", "prt").await.unwrap();
        assert_eq!(report.name, "Portugal");
        assert_eq!(report.iso3, "prt");
    }

    #[tokio::test]
    async fn test_country_report_name_is_percent_encoded() {
        let router = Router::new().route(
            "/npm-covid-data/country-report-iso-based/:name/:iso",
            get(
                |axum::extract::Path((name, iso)): axum::extract::Path<(String, String)>| async move {
                    Json(json!([{"Country": name, "ThreeLetterSymbol": iso}]))
                },
            ),
        );
        let client = UpstreamClient::new(spawn_upstream(router).await, Client::new());

        let report = client
            .country_report("Bosnia/Herzegovina? #1", "bih")
            .await
            .unwrap();
        assert_eq!(report.name, "Bosnia/Herzegovina? #1");
        assert_eq!(report.iso3, "bih");
    }

    #[test]
    fn test_url_for_keeps_base_path_and_trailing_slash() {
        let client = UpstreamClient::new("http://localhost:1/api/", Client::new());

        let url = client.url_for(ALL_COUNTRIES_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1/api/npm-covid-data/");

        let url = client
            .url_for(&["npm-covid-data", "country-report-iso-based", "South Korea", "kor"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:1/api/npm-covid-data/country-report-iso-based/South%20Korea/kor"
        );
    }

    #[test]
    fn test_url_for_rejects_unparseable_base() {
        let client = UpstreamClient::new("not a url", Client::new());
        let result = client.url_for(WORLD_PATH);
        assert!(matches!(result, Err(ReportsError::Internal(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = UpstreamClient::new("http://localhost:1/api/", Client::new());
        assert_eq!(client.base_url(), "http://localhost:1/api");
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let config = Config {
            upstream_api_key: Some("bad\nkey".to_string()),
            ..Config::default()
        };
        let result = UpstreamClient::from_config(&config);
        assert!(matches!(result, Err(ReportsError::Internal(_))));
    }
}
