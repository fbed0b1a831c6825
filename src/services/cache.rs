use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Multi-tier cache manager
///
/// L1 is an in-process `moka` cache. L2 is Redis, shared across instances,
/// and is optional: without it the manager behaves as a plain TTL cache.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
    // Bumped by every prefix invalidation
    generation: AtomicU64,
}

impl CacheManager {
    /// Create an L1-only cache manager
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        Self {
            redis: None,
            l1_cache: build_l1(l1_size, ttl_secs),
            ttl_secs,
            generation: AtomicU64::new(0),
        }
    }

    /// Create a cache manager backed by Redis
    pub async fn with_redis(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            l1_cache: build_l1(l1_size, ttl_secs),
            ttl_secs,
            generation: AtomicU64::new(0),
        })
    }

    pub fn has_redis(&self) -> bool {
        self.redis.is_some()
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if let Some(l2) = &self.redis {
            let mut conn = l2.lock().await;
            let value: Option<String> = redis::cmd("GET")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
            drop(conn);

            if let Some(json) = value {
                tracing::trace!("L2 cache hit: {}", key);

                // Populate L1 cache
                self.l1_cache.insert(key.to_string(), json.as_bytes().to_vec()).await;

                return Ok(serde_json::from_str(&json)?);
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in every configured tier
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache.insert(key.to_string(), json.as_bytes().to_vec()).await;

        if let Some(l2) = &self.redis {
            let mut conn = l2.lock().await;
            let _: () = redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Current invalidation generation
    ///
    /// Read it before loading the data that will be cached and pass it to
    /// [`CacheManager::set_if_current`].
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Set a value unless an invalidation ran since `generation` was read
    ///
    /// The generation is checked again after the write and the entry is
    /// dropped if an invalidation slipped in between. Returns whether the
    /// entry was kept.
    pub async fn set_if_current<T>(&self, key: &str, value: &T, generation: u64) -> Result<bool, CacheError>
    where
        T: Serialize,
    {
        if self.generation() != generation {
            tracing::trace!("Skipping stale cache set: {}", key);
            return Ok(false);
        }

        self.set(key, value).await?;

        if self.generation() != generation {
            self.delete(key).await?;
            tracing::trace!("Dropped stale cache entry: {}", key);
            return Ok(false);
        }

        Ok(true)
    }

    /// Delete a value from every tier
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        if let Some(l2) = &self.redis {
            let mut conn = l2.lock().await;
            let _: () = redis::cmd("DEL")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Invalidate all entries whose key starts with `prefix`
    pub async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        self.generation.fetch_add(1, Ordering::SeqCst);

        // L1 has no prefix scan, clear it all
        self.l1_cache.invalidate_all();

        if let Some(l2) = &self.redis {
            let mut conn = l2.lock().await;
            let keys: Vec<String> = redis::cmd("KEYS")
                .arg(format!("{}*", prefix))
                .query_async(&mut *conn)
                .await?;

            if !keys.is_empty() {
                let _: () = redis::cmd("DEL")
                    .arg(keys)
                    .query_async(&mut *conn)
                    .await?;
            }
        }

        tracing::debug!("Invalidated cache prefix: {}", prefix);
        Ok(())
    }
}

fn build_l1(l1_size: u64, ttl_secs: u64) -> moka::future::Cache<String, Vec<u8>> {
    moka::future::CacheBuilder::new(l1_size)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    pub const SEARCH_PREFIX: &'static str = "search:";

    /// Build a cache key for a search request
    ///
    /// Coordinates are written with their shortest exact representation, so
    /// two distinct query points never share an entry.
    pub fn search(lat: f64, lon: f64, techs: &[String]) -> String {
        format!("{}{}:{}:{}", Self::SEARCH_PREFIX, lat, lon, techs.join(","))
    }

    /// Build a cache key for a GitHub user lookup
    pub fn github_user(username: &str) -> String {
        format!("github:{}", username.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_cache_set_get() {
        let cache = CacheManager::with_redis("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        cache.set("test_key", &"test_value").await.unwrap();
        let result: String = cache.get("test_key").await.unwrap();
        assert_eq!(result, "test_value");

        cache.delete("test_key").await.unwrap();
        assert!(cache.get::<String>("test_key").await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_set_get_delete() {
        let cache = CacheManager::in_memory(100, 60);
        assert!(!cache.has_redis());

        cache.set("k", &vec![1, 2, 3]).await.unwrap();
        let value: Vec<i32> = cache.get("k").await.unwrap();
        assert_eq!(value, vec![1, 2, 3]);

        cache.delete("k").await.unwrap();
        assert!(matches!(cache.get::<Vec<i32>>("k").await, Err(CacheError::CacheMiss(_))));
    }

    #[tokio::test]
    async fn test_invalidate_prefix_clears_l1() {
        let cache = CacheManager::in_memory(100, 60);
        let key = CacheKey::search(0.0, 0.0, &["Go".to_string()]);

        cache.set(&key, &"cached").await.unwrap();
        cache.invalidate_prefix(CacheKey::SEARCH_PREFIX).await.unwrap();

        assert!(cache.get::<String>(&key).await.is_err());
    }

    #[tokio::test]
    async fn test_set_if_current_skips_after_invalidation() {
        let cache = CacheManager::in_memory(100, 60);
        let key = CacheKey::search(0.0, 0.0, &["Go".to_string()]);

        // A search read the store, then a registration invalidated
        let generation = cache.generation();
        cache.invalidate_prefix(CacheKey::SEARCH_PREFIX).await.unwrap();

        let kept = cache.set_if_current(&key, &"stale", generation).await.unwrap();
        assert!(!kept);
        assert!(cache.get::<String>(&key).await.is_err());

        let kept = cache.set_if_current(&key, &"fresh", cache.generation()).await.unwrap();
        assert!(kept);
        assert_eq!(cache.get::<String>(&key).await.unwrap(), "fresh");
    }

    #[test]
    fn test_cache_key_builder() {
        let techs = vec!["Go".to_string(), "Rust".to_string()];
        assert_eq!(CacheKey::search(-23.5505, -46.6333, &techs), "search:-23.5505:-46.6333:Go,Rust");
        assert_ne!(CacheKey::search(0.0, 0.0, &techs), CacheKey::search(0.000004, 0.0, &techs));
        assert_eq!(CacheKey::github_user("OctoCat"), "github:octocat");
    }
}
