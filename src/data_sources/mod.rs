//! Upstream country data providers.
//!
//! The two providers key their resources differently: the primary one by
//! country code, the secondary one by ISO2 code for flags and by common name
//! for population. Reconciling the two is the job of [`crate::translate`].
//!
//! # Data Sources
//!
//! - [`nager`]: Nager.Date - country listing, names, region and borders
//! - [`countries_now`]: CountriesNow - flag images and population history

pub mod countries_now;
pub mod nager;

pub use countries_now::CountriesNowClient;
pub use nager::NagerClient;
