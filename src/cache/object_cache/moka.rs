use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

#[derive(Debug, Clone)]
struct CachedValue {
    data: String,
    ttl: Duration,
}

/// Expiração por entrada: cada valor carrega o próprio TTL
struct PerEntryExpiry;

impl Expiry<String, CachedValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, CachedValue>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        if config.cache.default_ttl == 0 {
            return Err("cache.default_ttl deve ser maior que zero".to_string());
        }
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_settings(max_capacity: u64, default_ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, default TTL: {}s",
            max_capacity, default_ttl_secs
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => CacheResult::Found(value.data),
            None => {
                debug!("Key not found in cache: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, CachedValue { data: value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn keys(&self) -> Vec<String> {
        self.inner.iter().map(|(key, _)| key.as_ref().clone()).collect()
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cache() -> Arc<dyn ObjectCache> {
        Arc::new(MokaCacheWrapper::with_settings(1_000, 60))
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = cache();
        cache.insert_raw("a".into(), "1".into(), 0).await;
        assert_eq!(cache.get_raw("a").await, CacheResult::Found("1".to_string()));
        assert_eq!(cache.get_raw("b").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent() {
        let cache = cache();
        cache.insert_raw("curto".into(), "x".into(), 1).await;
        cache.insert_raw("longo".into(), "y".into(), 0).await;
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        assert_eq!(cache.get_raw("curto").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("longo").await, CacheResult::Found("y".to_string()));
    }

    #[tokio::test]
    async fn test_remove_prefix_only_matching() {
        let cache = cache();
        cache.insert_raw("appointments:list:1:a".into(), "[]".into(), 0).await;
        cache.insert_raw("appointments:item:9".into(), "{}".into(), 0).await;
        cache.insert_raw("auth:1:tok".into(), "{}".into(), 0).await;

        let removed = cache.remove_prefix("appointments:").await;
        assert_eq!(removed, 2);
        assert_eq!(cache.get_raw("appointments:item:9").await, CacheResult::NotFound);
        assert!(matches!(cache.get_raw("auth:1:tok").await, CacheResult::Found(_)));
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let cache = cache();
        cache.insert("n".into(), &vec![1, 2, 3], 0).await;
        assert_eq!(cache.get::<Vec<i32>>("n").await, Some(vec![1, 2, 3]));

        cache.insert_raw("ruim".into(), "não é json".into(), 0).await;
        assert_eq!(cache.get::<Vec<i32>>("ruim").await, None);
        assert_eq!(cache.get_raw("ruim").await, CacheResult::NotFound);
    }
}
