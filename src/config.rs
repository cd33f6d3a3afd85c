//! Process configuration.
//!
//! All settings are read once at startup into a [`Config`] and handed to the
//! components that need them. Nothing below the binary reads the environment.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 4000;

/// Default base URL of the primary provider (country listing and borders).
pub const DEFAULT_NAGER_BASE_URL: &str = "https://date.nager.at/api/v3";

/// Default base URL of the secondary provider (flags and population).
pub const DEFAULT_COUNTRIES_NOW_BASE_URL: &str = "https://countriesnow.space/api/v0.1";

/// Default per-call upstream timeout in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// What to do when a flag or population call fails after the primary
/// record has been fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecondaryFailurePolicy {
    /// Any failure aborts the whole request.
    #[default]
    FailFast,
    /// A failed flag call yields no flag, a failed population call yields an
    /// empty series.
    Partial,
}

impl SecondaryFailurePolicy {
    /// Parse a policy name as used in `SECONDARY_FAILURE_POLICY`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Some(Self::FailFast),
            "partial" => Some(Self::Partial),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FailFast => "fail-fast",
            Self::Partial => "partial",
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on.
    pub port: u16,

    /// Primary provider base URL, without trailing slash.
    pub nager_base_url: String,

    /// Secondary provider base URL, without trailing slash.
    pub countries_now_base_url: String,

    /// Timeout applied to every upstream request.
    pub upstream_timeout: Duration,

    /// Handling of secondary call failures.
    pub secondary_policy: SecondaryFailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            nager_base_url: DEFAULT_NAGER_BASE_URL.to_string(),
            countries_now_base_url: DEFAULT_COUNTRIES_NOW_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            secondary_policy: SecondaryFailurePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing keys take their defaults. Values that fail to parse are
    /// logged and replaced by the default as well.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_PORT, "Invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let nager_base_url = lookup("NAGER_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| normalize_base_url(&url))
            .unwrap_or(defaults.nager_base_url);

        let countries_now_base_url = lookup("COUNTRIESNOW_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| normalize_base_url(&url))
            .unwrap_or(defaults.countries_now_base_url);

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        value = %raw,
                        default = DEFAULT_UPSTREAM_TIMEOUT_SECS,
                        "Invalid UPSTREAM_TIMEOUT_SECS, using default"
                    );
                    defaults.upstream_timeout
                }
            },
            None => defaults.upstream_timeout,
        };

        let secondary_policy = match lookup("SECONDARY_FAILURE_POLICY") {
            Some(raw) => SecondaryFailurePolicy::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unknown SECONDARY_FAILURE_POLICY, using fail-fast");
                SecondaryFailurePolicy::FailFast
            }),
            None => defaults.secondary_policy,
        };

        Self {
            port,
            nager_base_url,
            countries_now_base_url,
            upstream_timeout,
            secondary_policy,
        }
    }
}

/// Strip surrounding whitespace and trailing slashes from a base URL.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
