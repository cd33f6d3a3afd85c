//! Error types for upstream calls and detail aggregation.

use std::fmt;

use thiserror::Error;

/// The upstream request an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamCall {
    /// Primary provider country listing.
    AvailableCountries,
    /// Primary provider detail record.
    CountryInfo,
    /// Secondary provider flag lookup by ISO2 code.
    FlagImage,
    /// Secondary provider population lookup by common name.
    Population,
}

impl UpstreamCall {
    pub fn label(&self) -> &'static str {
        match self {
            UpstreamCall::AvailableCountries => "available countries",
            UpstreamCall::CountryInfo => "country info",
            UpstreamCall::FlagImage => "flag image",
            UpstreamCall::Population => "population",
        }
    }
}

impl fmt::Display for UpstreamCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while talking to the upstream providers.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure, timeout, non-2xx status or undecodable body.
    #[error("{call} request failed: {source}")]
    UpstreamTransport {
        call: UpstreamCall,
        #[source]
        source: reqwest::Error,
    },

    /// A key needed for the secondary lookups is missing from the primary record.
    #[error("primary provider record has no {field}")]
    MalformedUpstreamData { field: &'static str },
}

impl Error {
    /// Build a closure that tags a `reqwest` error with the call it came from.
    pub(crate) fn transport(call: UpstreamCall) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Error::UpstreamTransport { call, source }
    }

    /// Whether the error came from an exceeded request timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::UpstreamTransport { source, .. } => source.is_timeout(),
            Error::MalformedUpstreamData { .. } => false,
        }
    }
}

/// Umbrella failure of a detail aggregation.
///
/// Carries the failing call and the underlying cause for logging. Callers of
/// the HTTP API only ever see a generic message.
#[derive(Debug, Error)]
#[error("country aggregation aborted at {call}")]
pub struct AggregationAborted {
    pub call: UpstreamCall,
    #[source]
    pub cause: Error,
}

impl AggregationAborted {
    pub(crate) fn at(call: UpstreamCall) -> impl FnOnce(Error) -> Self {
        move |cause| AggregationAborted { call, cause }
    }
}
