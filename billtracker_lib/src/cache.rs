//! In-memory TTL cache for API responses, backed by `DashMap`.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::BillTrackerError;

struct CacheEntry {
    json: String,
    expires_at: Instant,
}

/// Response cache keyed by request parameters.
///
/// Values are stored as serialized JSON. Expired entries are evicted on
/// lookup and swept on every insert. A zero TTL disables caching entirely.
pub struct MemoryCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Returns the cached value for `key`, or `None` if missing or expired.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BillTrackerError> {
        let Some(entry) = self.store.get(key) else {
            return Ok(None);
        };
        if Instant::now() >= entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&entry.json)?))
    }

    /// Stores `value` under `key` until the TTL elapses.
    pub fn set<T: Serialize>(&self, key: String, value: &T) -> Result<(), BillTrackerError> {
        if !self.is_enabled() {
            return Ok(());
        }
        let json = serde_json::to_string(value)?;
        let now = Instant::now();
        self.store.retain(|_, entry| entry.expires_at > now);
        self.store.insert(
            key,
            CacheEntry {
                json,
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legiscan_api::types::BillDetail;

    fn bill(id: i64) -> BillDetail {
        BillDetail {
            bill_id: Some(id),
            bill_number: Some(format!("HB{}", id)),
            ..Default::default()
        }
    }

    #[test]
    fn set_and_get_round_trips_value() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("bill:7".to_string(), &bill(7)).unwrap();
        let cached: Option<BillDetail> = cache.get("bill:7").unwrap();
        assert_eq!(cached, Some(bill(7)));
    }

    #[test]
    fn miss_is_none() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        let cached: Option<BillDetail> = cache.get("bill:1").unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn expired_entries_are_evicted() {
        let cache = MemoryCache::new(Duration::from_millis(1));
        cache.set("bill:7".to_string(), &bill(7)).unwrap();
        std::thread::sleep(Duration::from_millis(10));
        let cached: Option<BillDetail> = cache.get("bill:7").unwrap();
        assert!(cached.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_sweeps_other_expired_entries() {
        let cache = MemoryCache::new(Duration::from_millis(5));
        cache.set("bill:1".to_string(), &bill(1)).unwrap();
        cache.set("bill:2".to_string(), &bill(2)).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        cache.set("bill:3".to_string(), &bill(3)).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let cache = MemoryCache::disabled();
        cache.set("bill:7".to_string(), &bill(7)).unwrap();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn type_mismatch_is_serialization_error() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("k".to_string(), &"just a string").unwrap();
        let result = cache.get::<BillDetail>("k");
        assert!(matches!(result, Err(BillTrackerError::Serialization(_))));
    }

    #[test]
    fn clear_empties_cache() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("a".to_string(), &bill(1)).unwrap();
        cache.set("b".to_string(), &bill(2)).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
