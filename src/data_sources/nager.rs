//! Nager.Date client, the primary provider.
//!
//! Supplies the country listing and per-country detail records, including
//! bordering countries.
//!
//! # API Reference
//!
//! See: <https://date.nager.at/swagger/index.html>

use tracing::debug;

use crate::config::DEFAULT_NAGER_BASE_URL;
use crate::error::{Error, UpstreamCall};
use crate::model::{CountryDetail, CountrySummary};

/// Client for the primary provider.
#[derive(Clone)]
pub struct NagerClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for NagerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NagerClient {
    /// Create a client against the public endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_NAGER_BASE_URL)
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: crate::config::normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every country the provider knows about.
    ///
    /// `GET /AvailableCountries`
    pub async fn available_countries(&self) -> Result<Vec<CountrySummary>, Error> {
        let url = format!("{}/AvailableCountries", self.base_url);
        let call = UpstreamCall::AvailableCountries;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(Error::transport(call))?;

        let countries = response
            .json::<Vec<CountrySummary>>()
            .await
            .map_err(Error::transport(call))?;

        debug!(count = countries.len(), "Fetched available countries");
        Ok(countries)
    }

    /// Fetch the detail record for one country.
    ///
    /// `GET /CountryInfo/{countryCode}`
    ///
    /// # Arguments
    ///
    /// * `country_code` - code as supplied by the caller, forwarded unchanged
    pub async fn country_info(&self, country_code: &str) -> Result<CountryDetail, Error> {
        let url = format!(
            "{}/CountryInfo/{}",
            self.base_url,
            urlencoding::encode(country_code)
        );
        let call = UpstreamCall::CountryInfo;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(Error::transport(call))?;

        let detail = response
            .json::<CountryDetail>()
            .await
            .map_err(Error::transport(call))?;

        debug!(
            country_code = %detail.country_code,
            borders = detail.borders.as_ref().map_or(0, Vec::len),
            "Fetched country info"
        );
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = NagerClient::with_base_url("http://localhost:1234/api/v3/");
        assert_eq!(client.base_url(), "http://localhost:1234/api/v3");
    }

    #[test]
    fn test_default_points_at_public_api() {
        assert_eq!(NagerClient::default().base_url(), DEFAULT_NAGER_BASE_URL);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let client = NagerClient::with_base_url("http://127.0.0.1:9");

        let err = client.available_countries().await.unwrap_err();
        assert!(matches!(
            err,
            Error::UpstreamTransport {
                call: UpstreamCall::AvailableCountries,
                ..
            }
        ));
    }
}
