//! Response caching keyed by request path.
//!
//! The pipeline consults the cache before every GET and stores the raw
//! `data` of successful responses whose envelope has no `next_page`. A
//! client without a cache behaves exactly as if every lookup missed.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Storage for previously fetched response payloads.
///
/// Keys are request paths relative to the base URL, including the query
/// string. Implementations must be shareable between clones of a
/// [`Client`](crate::Client).
///
/// Errors returned by a backend never fail a call. The client logs them at
/// `warn` and continues: a failed `get` counts as a miss, and a failed
/// `put` or `clear` is skipped.
///
/// # Examples
///
/// ```
/// use asana_client::cache::{Cache, MapCache};
/// use std::time::Duration;
///
/// let cache = MapCache::new(Duration::from_secs(60));
/// cache.put("/tasks/1", br#"{"gid":"1"}"#.to_vec()).unwrap();
/// assert!(cache.get("/tasks/1").unwrap().is_some());
/// ```
pub trait Cache: Send + Sync {
    /// Stores `value` under `key`, replacing any existing entry.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Returns the value stored under `key` if present and not expired.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Removes the entry stored under `key`, if any.
    fn clear(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    expires: Instant,
    value: Vec<u8>,
}

/// An in-memory [`Cache`] with a fixed time to live.
///
/// The expiry is set when an entry is stored; expired entries are evicted
/// lazily by [`Cache::get`]. Entries are replaced wholesale, never mutated.
#[derive(Debug)]
pub struct MapCache {
    expiry: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MapCache {
    /// Creates an empty cache whose entries live for `expiry`.
    pub fn new(expiry: Duration) -> Self {
        Self {
            expiry,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The time to live applied to new entries.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// The number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, CacheEntry>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Storage("cache lock poisoned".to_string()))
    }
}

impl Cache for MapCache {
    fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let entry = CacheEntry {
            expires: Instant::now() + self.expiry,
            value,
        };
        self.entries()?.insert(key.to_string(), entry);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries()?;
        let expired = match entries.get(key) {
            None => return Ok(None),
            Some(entry) => entry.expires <= Instant::now(),
        };

        if expired {
            tracing::trace!(key = key, "Evicting expired cache entry");
            entries.remove(key);
            return Ok(None);
        }

        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let cache = MapCache::new(Duration::from_secs(60));
        cache.put("/tasks/1", b"{\"gid\":\"1\"}".to_vec()).unwrap();

        assert_eq!(
            cache.get("/tasks/1").unwrap(),
            Some(b"{\"gid\":\"1\"}".to_vec())
        );
        assert_eq!(cache.get("/tasks/2").unwrap(), None);
    }

    #[test]
    fn test_put_replaces() {
        let cache = MapCache::new(Duration::from_secs(60));
        cache.put("k", b"one".to_vec()).unwrap();
        cache.put("k", b"two".to_vec()).unwrap();
        assert_eq!(cache.get("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = MapCache::new(Duration::from_millis(20));
        cache.put("k", b"value".to_vec()).unwrap();
        assert_eq!(cache.len(), 1);

        std::thread::sleep(Duration::from_millis(40));

        assert_eq!(cache.get("k").unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_expiry_never_hits() {
        let cache = MapCache::new(Duration::ZERO);
        cache.put("k", b"value".to_vec()).unwrap();
        assert_eq!(cache.get("k").unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let cache = MapCache::new(Duration::from_secs(60));
        cache.put("k", b"value".to_vec()).unwrap();
        cache.clear("k").unwrap();
        cache.clear("missing").unwrap();
        assert_eq!(cache.get("k").unwrap(), None);
    }
}
