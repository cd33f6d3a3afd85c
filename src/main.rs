//! Countryinfo - a unified country information API.
//!
//! # API Endpoints
//!
//! - `GET /countries` - List available countries
//! - `GET /countries/:country_code` - Merged info for one country
//! - `GET /health` - Health check
//!
//! The country endpoints are also served under `/api`.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use countryinfo::aggregation::Aggregator;
use countryinfo::api::{AppState, router};
use countryinfo::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("countryinfo=info".parse()?))
        .init();

    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "Loaded environment file");
    }

    let config = Config::from_env();

    info!(
        port = config.port,
        nager_base_url = %config.nager_base_url,
        countries_now_base_url = %config.countries_now_base_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        policy = config.secondary_policy.label(),
        "Starting countryinfo server"
    );

    let aggregator = Aggregator::new(&config)?;
    let app = router(AppState { aggregator });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Countryinfo is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
