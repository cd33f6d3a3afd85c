//! In-process mock of both upstream providers.
//!
//! One axum server answers the primary and secondary endpoints on a random
//! local port. Replies and delays are fixed per scenario; every call is
//! counted and every request key recorded.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use countryinfo::aggregation::Aggregator;
use countryinfo::config::{Config, SecondaryFailurePolicy};

/// What a mock endpoint answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(StatusCode),
    /// 200 with a body that is not JSON.
    Garbage,
}

impl Reply {
    fn respond(&self) -> Response {
        match self {
            Reply::Json(value) => Json(value.clone()).into_response(),
            Reply::Status(status) => (*status, "upstream unavailable").into_response(),
            Reply::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
        }
    }
}

/// Fixed behaviour of the mock providers for one test.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub listing: Reply,
    pub country_info: Reply,
    pub flag: Reply,
    pub population: Reply,
    pub flag_delay: Duration,
    pub population_delay: Duration,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            listing: Reply::Json(json!([{ "countryCode": "AD", "name": "Andorra" }])),
            country_info: Reply::Json(nigeria_info()),
            flag: Reply::Json(nigeria_flag()),
            population: Reply::Json(nigeria_population()),
            flag_delay: Duration::ZERO,
            population_delay: Duration::ZERO,
        }
    }
}

#[derive(Default)]
pub struct Calls {
    pub listing: AtomicUsize,
    pub country_info: AtomicUsize,
    pub flag: AtomicUsize,
    pub population: AtomicUsize,
}

#[derive(Default)]
pub struct Received {
    pub country_codes: Mutex<Vec<String>>,
    pub flag_bodies: Mutex<Vec<Value>>,
    pub population_bodies: Mutex<Vec<Value>>,
}

#[derive(Clone)]
struct MockState {
    scenario: Arc<Scenario>,
    calls: Arc<Calls>,
    received: Arc<Received>,
}

/// A running mock provider.
pub struct MockUpstream {
    pub base_url: String,
    pub calls: Arc<Calls>,
    pub received: Arc<Received>,
}

impl MockUpstream {
    pub async fn spawn(scenario: Scenario) -> Self {
        let state = MockState {
            scenario: Arc::new(scenario),
            calls: Arc::new(Calls::default()),
            received: Arc::new(Received::default()),
        };

        let app = Router::new()
            .route("/AvailableCountries", get(listing))
            .route("/CountryInfo/:code", get(country_info))
            .route("/countries/flag/images", post(flag))
            .route("/countries/population", post(population))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            calls: state.calls,
            received: state.received,
        }
    }

    /// Config pointing both providers at this mock.
    pub fn config(&self, policy: SecondaryFailurePolicy) -> Config {
        Config {
            nager_base_url: self.base_url.clone(),
            countries_now_base_url: self.base_url.clone(),
            secondary_policy: policy,
            ..Config::default()
        }
    }

    pub fn aggregator(&self, policy: SecondaryFailurePolicy) -> Aggregator {
        Aggregator::new(&self.config(policy)).unwrap()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn secondary_calls(&self) -> usize {
        Self::count(&self.calls.flag) + Self::count(&self.calls.population)
    }
}

async fn listing(State(state): State<MockState>) -> Response {
    state.calls.listing.fetch_add(1, Ordering::SeqCst);
    state.scenario.listing.respond()
}

async fn country_info(State(state): State<MockState>, Path(code): Path<String>) -> Response {
    state.calls.country_info.fetch_add(1, Ordering::SeqCst);
    state.received.country_codes.lock().unwrap().push(code);
    state.scenario.country_info.respond()
}

async fn flag(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.calls.flag.fetch_add(1, Ordering::SeqCst);
    state.received.flag_bodies.lock().unwrap().push(body);
    tokio::time::sleep(state.scenario.flag_delay).await;
    state.scenario.flag.respond()
}

async fn population(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.calls.population.fetch_add(1, Ordering::SeqCst);
    state.received.population_bodies.lock().unwrap().push(body);
    tokio::time::sleep(state.scenario.population_delay).await;
    state.scenario.population.respond()
}

pub fn nigeria_info() -> Value {
    json!({
        "commonName": "Nigeria",
        "officialName": "Federal Republic of Nigeria",
        "countryCode": "NG",
        "region": "Africa",
        "borders": [{ "commonName": "Benin", "countryCode": "BJ" }]
    })
}

pub fn nigeria_flag() -> Value {
    json!({
        "error": false,
        "msg": "Nigeria and flag retrieved",
        "data": {
            "name": "Nigeria",
            "flag": "https://example/ng.svg",
            "iso2": "NG",
            "iso3": "NGA"
        }
    })
}

pub fn nigeria_population() -> Value {
    json!({
        "error": false,
        "msg": "Nigeria with population",
        "data": {
            "country": "Nigeria",
            "populationCounts": [{ "year": 1960, "value": 45138458 }]
        }
    })
}

pub fn nigeria_record() -> Value {
    json!({
        "countryCode": "NG",
        "commonName": "Nigeria",
        "officialName": "Federal Republic of Nigeria",
        "region": "Africa",
        "borders": [{ "commonName": "Benin", "countryCode": "BJ" }],
        "flagUrl": "https://example/ng.svg",
        "populationCounts": [{ "year": 1960, "value": 45138458 }]
    })
}
