//! Aggregation of primary and secondary provider data.
//!
//! A detail request runs in three steps:
//! 1. Fetch the primary detail record for the requested code
//! 2. Translate it into the secondary lookup keys
//! 3. Fetch flag and population concurrently, then merge
//!
//! The primary call always precedes the secondary ones since it supplies
//! their keys. The two secondary calls have no ordering between them.
//!
//! No state is kept between requests. Every call builds its own record.

use tracing::{info, instrument, warn};

use crate::config::{Config, SecondaryFailurePolicy};
use crate::data_sources::{CountriesNowClient, NagerClient};
use crate::error::{AggregationAborted, Error, UpstreamCall};
use crate::model::{
    AggregatedCountryRecord, CountryDetail, CountrySummary, FlagResult, PopulationSeries,
};
use crate::translate::translate;

/// Orchestrates the upstream calls behind the country endpoints.
#[derive(Clone)]
pub struct Aggregator {
    primary: NagerClient,
    secondary: CountriesNowClient,
    policy: SecondaryFailurePolicy,
}

impl Aggregator {
    /// Build an aggregator from configuration.
    ///
    /// Both provider clients share one connection pool with the configured
    /// per-request timeout.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self::with_clients(
            NagerClient::with_client(client.clone(), &config.nager_base_url),
            CountriesNowClient::with_client(client, &config.countries_now_base_url),
            config.secondary_policy,
        ))
    }

    /// Build an aggregator from ready-made provider clients.
    pub fn with_clients(
        primary: NagerClient,
        secondary: CountriesNowClient,
        policy: SecondaryFailurePolicy,
    ) -> Self {
        Self {
            primary,
            secondary,
            policy,
        }
    }

    pub fn policy(&self) -> SecondaryFailurePolicy {
        self.policy
    }

    /// Return the primary provider's country listing unchanged.
    pub async fn list_countries(&self) -> Result<Vec<CountrySummary>, Error> {
        self.primary.available_countries().await
    }

    /// Build the merged record for one country.
    ///
    /// A primary failure, or a primary record lacking its keys, aborts before
    /// any secondary call is issued. Secondary failures abort as well under
    /// [`SecondaryFailurePolicy::FailFast`]; the first one to fail cancels
    /// its sibling. Under [`SecondaryFailurePolicy::Partial`] they degrade to
    /// an absent flag or an empty series.
    #[instrument(skip(self))]
    pub async fn get_country_detail(
        &self,
        code: &str,
    ) -> Result<AggregatedCountryRecord, AggregationAborted> {
        let detail = self
            .primary
            .country_info(code)
            .await
            .map_err(AggregationAborted::at(UpstreamCall::CountryInfo))?;

        let keys = translate(&detail).map_err(AggregationAborted::at(UpstreamCall::CountryInfo))?;

        let (flag, population) = match self.policy {
            SecondaryFailurePolicy::FailFast => tokio::try_join!(
                async {
                    self.secondary
                        .flag(keys.iso2)
                        .await
                        .map_err(AggregationAborted::at(UpstreamCall::FlagImage))
                },
                async {
                    self.secondary
                        .population(keys.common_name)
                        .await
                        .map_err(AggregationAborted::at(UpstreamCall::Population))
                },
            )?,
            SecondaryFailurePolicy::Partial => {
                let (flag, population) = tokio::join!(
                    self.secondary.flag(keys.iso2),
                    self.secondary.population(keys.common_name),
                );

                let flag = flag.unwrap_or_else(|e| {
                    warn!(iso2 = %keys.iso2, error = %e, "Flag lookup failed, continuing without flag");
                    FlagResult::default()
                });
                let population = population.unwrap_or_else(|e| {
                    warn!(
                        country = %keys.common_name,
                        error = %e,
                        "Population lookup failed, continuing with empty series"
                    );
                    PopulationSeries::new()
                });
                (flag, population)
            }
        };

        let record = merge(detail, flag, population);

        info!(
            country_code = %record.country_code,
            borders = record.borders.len(),
            has_flag = record.flag_url.is_some(),
            population_points = record.population_counts.len(),
            "Country detail aggregated"
        );

        Ok(record)
    }
}

/// Assemble the output record from the three upstream results.
///
/// Missing borders become an empty list. Flag and population are taken as
/// given; the population order is left as the provider returned it.
pub fn merge(
    detail: CountryDetail,
    flag: FlagResult,
    population: PopulationSeries,
) -> AggregatedCountryRecord {
    AggregatedCountryRecord {
        country_code: detail.country_code,
        common_name: detail.common_name,
        official_name: detail.official_name,
        region: detail.region,
        borders: detail.borders.unwrap_or_default(),
        flag_url: flag.flag_url,
        population_counts: population,
    }
}
