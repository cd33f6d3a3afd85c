//! CountriesNow client, the secondary provider.
//!
//! Flags are keyed by ISO2 code, population series by common country name.
//! Both endpoints take a JSON body via POST and wrap their payload in an
//! `{error, msg, data}` envelope.
//!
//! # API Reference
//!
//! See: <https://documenter.getpostman.com/view/1134062/T1LJjU52>

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DEFAULT_COUNTRIES_NOW_BASE_URL;
use crate::error::{Error, UpstreamCall};
use crate::model::{
    Envelope, FlagData, FlagRequest, FlagResult, PopulationData, PopulationRequest,
    PopulationSeries,
};

/// Client for the secondary provider.
#[derive(Clone)]
pub struct CountriesNowClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for CountriesNowClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CountriesNowClient {
    /// Create a client against the public endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_COUNTRIES_NOW_BASE_URL)
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

    /// POST a JSON body and decode the enveloped response.
    ///
    /// When the envelope has `error: true` its `data` is discarded.
    async fn post_envelope<B, T>(
        &self,
        path: &str,
        body: &B,
        call: UpstreamCall,
    ) -> Result<Envelope<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(Error::transport(call))?;

        let mut envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(Error::transport(call))?;

        // An envelope flagged as an error carries no usable data.
        if envelope.error {
            debug!(%call, msg = %envelope.msg, "Provider flagged an error in a 2xx response");
            envelope.data = None;
        }

        Ok(envelope)
    }

    /// Look up the flag image for an ISO2 code.
    ///
    /// `POST /countries/flag/images` with `{"iso2": ...}`
    ///
    /// A response without `data` or without `data.flag` yields an empty
    /// [`FlagResult`], not an error.
    pub async fn flag(&self, iso2: &str) -> Result<FlagResult, Error> {
        let envelope: Envelope<FlagData> = self
            .post_envelope(
                "/countries/flag/images",
                &FlagRequest { iso2 },
                UpstreamCall::FlagImage,
            )
            .await?;

        Ok(FlagResult {
            flag_url: envelope.data.and_then(|d| d.flag),
        })
    }

    /// Look up the historical population series for a country name.
    ///
    /// `POST /countries/population` with `{"country": ...}`
    ///
    /// The series is returned in upstream order. Missing data yields an
    /// empty series.
    pub async fn population(&self, common_name: &str) -> Result<PopulationSeries, Error> {
        let envelope: Envelope<PopulationData> = self
            .post_envelope(
                "/countries/population",
                &PopulationRequest {
                    country: common_name,
                },
                UpstreamCall::Population,
            )
            .await?;

        Ok(envelope
            .data
            .and_then(|d| d.population_counts)
            .unwrap_or_default())
    }
}
