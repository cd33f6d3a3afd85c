//! Countryinfo - a unified country information API.
//!
//! # Overview
//!
//! Countryinfo composes two independent upstream providers into one read API:
//!
//! - a primary provider with the country listing, names, region and borders
//! - a secondary provider with flag images (keyed by ISO2 code) and historical
//!   population series (keyed by common name)
//!
//! A detail request fetches the primary record, derives the keys each
//! secondary lookup needs, fetches flag and population concurrently and
//! merges everything into one [`model::AggregatedCountryRecord`].
//!
//! # Modules
//!
//! - [`config`]: Startup configuration (base URLs, port, timeout, failure policy)
//! - [`error`]: Upstream and aggregation error types
//! - [`model`]: Wire and output types
//! - [`data_sources`]: Clients for the two upstream providers
//! - [`translate`]: Key translation between the providers
//! - [`aggregation`]: Detail aggregation and listing
//! - [`api`]: HTTP API handlers and router

pub mod aggregation;
pub mod api;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod model;
pub mod translate;
