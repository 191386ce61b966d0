//! Caching wrapper around the API client.

use legiscan_api::types::{BillResponse, SearchResponse};
use legiscan_api::{BillQuery, Client, SearchQuery};

use crate::cache::MemoryCache;
use crate::config::ApiConfig;
use crate::error::BillTrackerError;

/// API client wrapper that adds an in-memory response cache.
///
/// Only successful responses are cached; every cache miss is exactly one
/// HTTP call with no retry.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
}

impl CachedClient {
    pub fn new(inner: Client, cache: MemoryCache) -> Self {
        Self { inner, cache }
    }

    /// Builds the underlying client and cache from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, BillTrackerError> {
        let inner = Client::with_timeout(&config.base_url, &config.api_key, config.timeout)?;
        Ok(Self::new(inner, MemoryCache::new(config.cache_ttl)))
    }

    /// Uncached client pointed at a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, BillTrackerError> {
        Ok(Self::new(
            Client::with_base_url(base_url, api_key)?,
            MemoryCache::disabled(),
        ))
    }

    /// Runs `getSearch`, returning cached results when available.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, BillTrackerError> {
        let cache_key = search_cache_key(query);
        if let Some(cached) = self.cache.get::<SearchResponse>(&cache_key)? {
            tracing::debug!("search cache hit for {:?}", query.query);
            return Ok(cached);
        }

        let resp = self.inner.get_search(query).await?;
        self.cache.set(cache_key, &resp)?;
        Ok(resp)
    }

    /// Runs `getBill`, returning cached results when available.
    pub async fn get_bill(&self, bill_id: i64) -> Result<BillResponse, BillTrackerError> {
        let cache_key = format!("bill:{}", bill_id);
        if let Some(cached) = self.cache.get::<BillResponse>(&cache_key)? {
            tracing::debug!("bill cache hit for {}", bill_id);
            return Ok(cached);
        }

        let resp = self.inner.get_bill(&BillQuery::new(bill_id)).await?;
        self.cache.set(cache_key, &resp)?;
        Ok(resp)
    }

    /// Drops every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

fn search_cache_key(query: &SearchQuery) -> String {
    format!(
        "search:st{:?}:y{}:q{:?}",
        query.state, query.year, query.query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_distinguishes_parameters() {
        let a = search_cache_key(&SearchQuery::new("HB 7").with_state("TX"));
        let b = search_cache_key(&SearchQuery::new("HB 7").with_state("OK"));
        let c = search_cache_key(&SearchQuery::new("HB 7").with_state("TX").with_year(2024));
        let d = search_cache_key(&SearchQuery::new("HB 7"));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a, search_cache_key(&SearchQuery::new("HB 7").with_state("TX")));
    }
}
