//! Key translation between the primary and secondary providers.
//!
//! The secondary provider wants an ISO2 code for flags and a common name for
//! population. Both come straight from the primary detail record, forwarded
//! exactly as received.

use crate::error::Error;
use crate::model::CountryDetail;

/// Identifiers for the two secondary lookups, borrowed from a detail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKeys<'a> {
    pub iso2: &'a str,
    pub common_name: &'a str,
}

/// Extract the secondary lookup keys from a primary detail record.
///
/// Values are not trimmed or case-folded. An empty `countryCode` or
/// `commonName` is a [`Error::MalformedUpstreamData`].
pub fn translate(detail: &CountryDetail) -> Result<QueryKeys<'_>, Error> {
    if detail.country_code.is_empty() {
        return Err(Error::MalformedUpstreamData {
            field: "countryCode",
        });
    }
    if detail.common_name.is_empty() {
        return Err(Error::MalformedUpstreamData {
            field: "commonName",
        });
    }

    Ok(QueryKeys {
        iso2: &detail.country_code,
        common_name: &detail.common_name,
    })
}
