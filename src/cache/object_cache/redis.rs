use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    ttl: u64, // segundos
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| format!("URL do Redis inválida: {e}"))?;

        // Teste de conexão síncrono na subida
        let mut conn = client.get_connection().map_err(|e| {
            error!(
                "Failed to connect to Redis: {}. Check Redis server status and URL: {}",
                e, redis_config.url
            );
            format!("Redis connection failed: {e}")
        })?;
        let pong: String = redis::cmd("PING")
            .query(&mut conn)
            .map_err(|e| format!("Redis ping failed: {e}"))?;
        debug!(
            "RedisObjectCache ready ({}), prefix: '{}', TTL: {}s",
            pong, redis_config.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            ttl: config.cache.default_ttl,
        })
    }

    async fn get_connection(&self) -> Option<MultiplexedConnection> {
        match self.client.get_multiplexed_tokio_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                None
            }
        }
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Chaves completas (com prefixo) que casam com o padrão
    async fn scan_keys(&self, conn: &mut MultiplexedConnection, pattern: &str) -> Vec<String> {
        match redis::cmd("KEYS")
            .arg(pattern)
            .query_async::<Vec<String>>(conn)
            .await
        {
            Ok(keys) => keys,
            Err(e) => {
                error!("Failed to list keys '{}': {}", pattern, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let Some(mut conn) = self.get_connection().await else {
            return CacheResult::ExistsButNoValue;
        };

        let result: redis::RedisResult<Option<String>> = conn.get(self.make_key(key)).await;
        match result {
            Ok(Some(data)) => CacheResult::Found(data),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Failed to get key '{}': {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let Some(mut conn) = self.get_connection().await else {
            return;
        };

        let effective_ttl = if ttl == 0 { self.ttl } else { ttl };
        if let Err(e) = conn
            .set_ex::<String, String, ()>(self.make_key(&key), value, effective_ttl)
            .await
        {
            error!("Failed to insert key '{}' into cache: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let Some(mut conn) = self.get_connection().await else {
            return;
        };

        if let Err(e) = conn.del::<String, i32>(self.make_key(key)).await {
            error!("Failed to remove key '{}': {}", key, e);
        }
    }

    async fn keys(&self) -> Vec<String> {
        let Some(mut conn) = self.get_connection().await else {
            return Vec::new();
        };
        let pattern = format!("{}*", self.key_prefix);
        self.scan_keys(&mut conn, &pattern)
            .await
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.key_prefix).map(str::to_string))
            .collect()
    }

    async fn remove_prefix(&self, prefix: &str) -> usize {
        let Some(mut conn) = self.get_connection().await else {
            return 0;
        };
        let pattern = format!("{}*", self.make_key(prefix));
        let keys = self.scan_keys(&mut conn, &pattern).await;
        if keys.is_empty() {
            return 0;
        }
        match conn.del::<Vec<String>, usize>(keys).await {
            Ok(count) => count,
            Err(e) => {
                error!("Failed to remove keys with prefix '{}': {}", prefix, e);
                0
            }
        }
    }

    async fn invalidate_all(&self) {
        let removed = self.remove_prefix("").await;
        warn!("RedisObjectCache invalidated {} keys", removed);
    }
}
