//! HTTP API handlers for the country information service.
//!
//! # Endpoints
//!
//! - **GET /countries**: the primary provider's country listing, unchanged.
//! - **GET /countries/:country_code**: one merged record built from both providers.
//! - **GET /health**: liveness check.
//!
//! The country routes are also mounted under `/api`.
//!
//! Upstream failures are logged with their cause and reported to the client as
//! a generic `500` with an `{"error": ...}` body. Nothing about which upstream
//! failed is exposed.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use crate::aggregation::Aggregator;
use crate::model::{AggregatedCountryRecord, CountrySummary, ErrorBody};

/// Client-facing message when the listing fails.
pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch countries";

/// Client-facing message when a detail aggregation fails.
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to fetch country info";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
}

/// Error response with a generic message and server-error status.
pub type ApiError = (StatusCode, Json<ErrorBody>);

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// GET /countries - List all available countries.
///
/// # Response
///
/// ```json
/// [
///     { "countryCode": "AD", "name": "Andorra" }
/// ]
/// ```
#[instrument(skip(state))]
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountrySummary>>, ApiError> {
    match state.aggregator.list_countries().await {
        Ok(countries) => {
            info!(count = countries.len(), "Countries listed");
            Ok(Json(countries))
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch countries");
            Err(internal_error(LIST_FAILED_MESSAGE))
        }
    }
}

/// GET /countries/:country_code - Merged information for one country.
///
/// # Response
///
/// ```json
/// {
///     "countryCode": "NG",
///     "commonName": "Nigeria",
///     "officialName": "Federal Republic of Nigeria",
///     "region": "Africa",
///     "borders": [{ "commonName": "Benin", "countryCode": "BJ" }],
///     "flagUrl": "https://example/ng.svg",
///     "populationCounts": [{ "year": 1960, "value": 45138458 }]
/// }
/// ```
///
/// `flagUrl` is `null` when no flag is known; `borders` and
/// `populationCounts` are never absent.
#[instrument(skip(state))]
pub async fn get_country(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<AggregatedCountryRecord>, ApiError> {
    match state.aggregator.get_country_detail(&country_code).await {
        Ok(record) => Ok(Json(record)),
        Err(e) => {
            warn!(
                country_code = %country_code,
                call = %e.call,
                timeout = e.cause.is_timeout(),
                error = %e.cause,
                "Failed to fetch country info"
            );
            Err(internal_error(DETAIL_FAILED_MESSAGE))
        }
    }
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Routes for the country resources, without state.
fn country_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/:country_code", get(get_country))
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(country_routes())
        .nest("/api", country_routes())
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
