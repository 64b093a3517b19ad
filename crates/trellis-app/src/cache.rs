//! TTL cache for fetched records.
//!
//! A small dashmap-backed cache with per-cache TTL and a soft capacity.
//! Entries expire lazily on read; inserts past capacity evict expired
//! entries first, then an arbitrary one.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use web_time::Instant;

struct Stored<V> {
    value: V,
    inserted: Instant,
}

pub struct CacheInner<K, V> {
    map: DashMap<K, Stored<V>>,
    ttl: Duration,
    capacity: usize,
}

/// Shared cache handle.
pub type Cache<K, V> = Arc<CacheInner<K, V>>;

pub fn new_cache<K: Eq + Hash, V>(capacity: usize, ttl: Duration) -> Cache<K, V> {
    Arc::new(CacheInner {
        map: DashMap::new(),
        ttl,
        capacity,
    })
}

pub fn get<K: Eq + Hash, V: Clone>(cache: &Cache<K, V>, key: &K) -> Option<V> {
    let expired = match cache.map.get(key) {
        Some(entry) => {
            if entry.inserted.elapsed() < cache.ttl {
                return Some(entry.value.clone());
            }
            true
        }
        None => false,
    };
    if expired {
        cache.map.remove(key);
    }
    None
}

pub fn insert<K: Eq + Hash + Clone, V>(cache: &Cache<K, V>, key: K, value: V) {
    if cache.map.len() >= cache.capacity {
        evict_one(cache);
    }
    cache.map.insert(
        key,
        Stored {
            value,
            inserted: Instant::now(),
        },
    );
}

pub fn iter<K: Eq + Hash + Clone, V: Clone>(cache: &Cache<K, V>) -> Vec<V> {
    cache
        .map
        .iter()
        .filter(|entry| entry.inserted.elapsed() < cache.ttl)
        .map(|entry| entry.value.clone())
        .collect()
}

fn evict_one<K: Eq + Hash + Clone, V>(cache: &Cache<K, V>) {
    // Prefer an expired entry; otherwise drop an arbitrary one.
    let victim = cache
        .map
        .iter()
        .find(|entry| entry.inserted.elapsed() >= cache.ttl)
        .or_else(|| cache.map.iter().next())
        .map(|entry| entry.key().clone());
    if let Some(key) = victim {
        cache.map.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_round_trip() {
        let cache: Cache<&'static str, u32> = new_cache(8, Duration::from_secs(60));
        assert_eq!(get(&cache, &"a"), None);
        insert(&cache, "a", 1);
        assert_eq!(get(&cache, &"a"), Some(1));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache: Cache<&'static str, u32> = new_cache(8, Duration::ZERO);
        insert(&cache, "a", 1);
        assert_eq!(get(&cache, &"a"), None);
        assert!(iter(&cache).is_empty());
    }

    #[test]
    fn test_capacity_evicts() {
        let cache: Cache<u32, u32> = new_cache(2, Duration::from_secs(60));
        insert(&cache, 1, 1);
        insert(&cache, 2, 2);
        insert(&cache, 3, 3);
        let live = iter(&cache).len();
        assert_eq!(live, 2);
        assert_eq!(get(&cache, &3), Some(3));
    }
}
