//! Runtime configuration read from the environment.

use std::time::Duration;

use legiscan_api::DEFAULT_BASE_URL;

pub const API_KEY_VAR: &str = "LEGISCAN_API_KEY";
pub const BASE_URL_VAR: &str = "LEGISCAN_BASE_URL";
pub const CACHE_TTL_VAR: &str = "BILLTRACKER_CACHE_TTL_SECS";
pub const TIMEOUT_VAR: &str = "BILLTRACKER_TIMEOUT_SECS";

/// Used when no key is configured. The API rejects it, which surfaces as
/// "not found" results rather than a crash.
pub const FALLBACK_API_KEY: &str = "demo-key";

const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the bills API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: FALLBACK_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl ApiConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = match non_empty(API_KEY_VAR) {
            Some(key) => key.trim().to_string(),
            None => {
                tracing::warn!("{} is not set, using the fallback key", API_KEY_VAR);
                FALLBACK_API_KEY.to_string()
            }
        };

        Self {
            api_key,
            base_url: non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(parse_u64(
                non_empty(TIMEOUT_VAR),
                DEFAULT_TIMEOUT_SECS,
            )),
            cache_ttl: Duration::from_secs(parse_u64(
                non_empty(CACHE_TTL_VAR),
                DEFAULT_CACHE_TTL_SECS,
            )),
        }
    }
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
