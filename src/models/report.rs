//! Report models parsed from the upstream COVID statistics API
//!
//! Field names follow the upstream JSON. Every numeric field defaults when
//! the upstream omits it or sends `null`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// Today's figures for one country, or for the world aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "Country", default)]
    pub name: String,
    #[serde(rename = "Continent", default)]
    pub continent: String,
    #[serde(rename = "TwoLetterSymbol", default, deserialize_with = "null_as_default")]
    pub iso2: String,
    #[serde(rename = "ThreeLetterSymbol", default, deserialize_with = "null_as_default")]
    pub iso3: String,
    #[serde(rename = "TotalCases", default, deserialize_with = "number_as_u64")]
    pub total_cases: u64,
    #[serde(rename = "NewCases", default, deserialize_with = "number_as_i64")]
    pub new_cases: i64,
    #[serde(rename = "TotalDeaths", default, deserialize_with = "number_as_u64")]
    pub total_deaths: u64,
    #[serde(rename = "NewDeaths", default, deserialize_with = "number_as_i64")]
    pub new_deaths: i64,
    #[serde(rename = "TotalRecovered", default, deserialize_with = "number_as_u64")]
    pub total_recovered: u64,
    #[serde(rename = "NewRecovered", default, deserialize_with = "number_as_i64")]
    pub new_recovered: i64,
    #[serde(rename = "ActiveCases", default, deserialize_with = "number_as_u64")]
    pub active_cases: u64,
    #[serde(rename = "TotalTests", default, deserialize_with = "number_as_u64")]
    pub total_tests: u64,
    #[serde(rename = "Population", default, deserialize_with = "number_as_u64")]
    pub population: u64,
    #[serde(rename = "Infection_Risk", default, deserialize_with = "null_as_default")]
    pub infection_risk: f64,
    #[serde(rename = "Case_Fatality_Rate", default, deserialize_with = "null_as_default")]
    pub case_fatality_rate: f64,
    #[serde(rename = "Test_Percentage", default, deserialize_with = "null_as_default")]
    pub test_percentage: f64,
    #[serde(rename = "Recovery_Proporation", default, deserialize_with = "null_as_default")]
    pub recovery_proportion: f64,
}

impl Country {
    /// Rows in the all-countries listing that are aggregates, not countries.
    pub fn is_aggregate(&self) -> bool {
        self.name == "World" || self.name == "Total:"
    }
}

/// One day of a country's recent history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastSixMonths {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "number_as_u64")]
    pub total_cases: u64,
    #[serde(default, deserialize_with = "number_as_i64")]
    pub new_cases: i64,
    #[serde(default, deserialize_with = "number_as_u64")]
    pub total_deaths: u64,
    #[serde(default, deserialize_with = "number_as_i64")]
    pub new_deaths: i64,
}

/// An entry of the ordered country name list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "ThreeLetterSymbol")]
    pub iso: String,
}

/// Lowercase ISO code to country name.
pub type IsoMap = BTreeMap<String, String>;

/// Every payload shape the reports service keeps in its cache.
///
/// The cache itself is payload-agnostic; callers match on the variant they
/// stored under a given key.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedReport {
    World(Country),
    IsoMap(IsoMap),
    CountryToday(Country),
    SixMonths(Vec<LastSixMonths>),
    Top10(Vec<Country>),
}

/// Signed count that may arrive as an integer, a float or `null`.
///
/// Data-correction rows carry negative deltas.
fn number_as_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Number>::deserialize(deserializer)?
        .and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)))
        .unwrap_or_default())
}

/// Running total that may arrive as an integer, a float or `null`.
///
/// A negative total is read as zero.
fn number_as_u64<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_as_i64(deserializer)?.max(0) as u64)
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
