//! Data models for the country information API.
//!
//! Field names follow the upstream JSON (camelCase) so records can be passed
//! through to clients without reshaping. None of these types outlive the
//! request that produced them.

use serde::{Deserialize, Serialize};

/// One entry of the primary provider's country listing.
///
/// Entries are forwarded as received: a missing `name` stays missing and any
/// field beyond `countryCode` and `name` is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    pub country_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A neighbouring country as listed in a primary detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRef {
    #[serde(default)]
    pub common_name: String,

    #[serde(default)]
    pub country_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Primary provider detail record for one country.
///
/// Missing string fields decode as empty; the key translator rejects empty
/// keys before any secondary call is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetail {
    #[serde(default)]
    pub country_code: String,

    #[serde(default)]
    pub common_name: String,

    #[serde(default)]
    pub official_name: String,

    #[serde(default)]
    pub region: String,

    /// `null` and absent both decode as `None`.
    #[serde(default)]
    pub borders: Option<Vec<BorderRef>>,
}

/// Request body for the secondary flag lookup.
#[derive(Debug, Serialize)]
pub struct FlagRequest<'a> {
    pub iso2: &'a str,
}

/// Request body for the secondary population lookup.
#[derive(Debug, Serialize)]
pub struct PopulationRequest<'a> {
    pub country: &'a str,
}

/// Response envelope shared by the secondary provider's endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub error: bool,

    #[serde(default)]
    pub msg: String,

    pub data: Option<T>,
}

/// `data` payload of the flag endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlagData {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub flag: Option<String>,

    #[serde(default)]
    pub iso2: String,

    #[serde(default)]
    pub iso3: String,
}

/// `data` payload of the population endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationData {
    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub population_counts: Option<Vec<PopulationCount>>,
}

/// One point of a population series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCount {
    pub year: i32,
    pub value: i64,
}

/// Outcome of the flag lookup. `None` when the provider had no flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagResult {
    pub flag_url: Option<String>,
}

/// Population series in upstream order. Empty when the provider had none.
pub type PopulationSeries = Vec<PopulationCount>;

/// Merged record returned by `GET /countries/{code}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedCountryRecord {
    pub country_code: String,
    pub common_name: String,
    pub official_name: String,
    pub region: String,

    /// Always present, possibly empty.
    pub borders: Vec<BorderRef>,

    /// Serialized as `null` when no flag is known.
    pub flag_url: Option<String>,

    /// Always present, possibly empty.
    pub population_counts: PopulationSeries,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
