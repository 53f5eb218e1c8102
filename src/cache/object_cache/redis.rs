use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_cache_backend;

declare_cache_backend!("redis", RedisCache);

/// Redis 后端，多实例部署时共享缓存用
///
/// 所有键都带统一前缀，`invalidate_all` 只清理带前缀的键，
/// 不会影响同一个库里的其他数据。
pub struct RedisCache {
    client: redis::Client,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| format!("Invalid Redis URL: {e}"))?;

        // 启动时做一次 PING，配置错误尽早暴露
        let mut conn = client
            .get_connection()
            .map_err(|e| format!("Redis connection failed: {e}"))?;
        redis::cmd("PING")
            .query::<String>(&mut conn)
            .map_err(|e| format!("Redis ping failed: {e}"))?;

        debug!(
            "Redis cache ready (prefix: '{}', ttl: {}s)",
            redis_config.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            default_ttl: config.cache.default_ttl,
        })
    }

    async fn conn(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_tokio_connection().await
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let mut conn = match self.conn().await {
            Ok(c) => c,
            Err(e) => {
                error!("Redis connection failed: {}", e);
                return CacheResult::ExistsButNoValue;
            }
        };

        match conn.get::<_, Option<String>>(self.prefixed(key)).await {
            Ok(Some(value)) => CacheResult::Found(value),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Redis GET failed for '{}': {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let mut conn = match self.conn().await {
            Ok(c) => c,
            Err(e) => {
                error!("Redis connection failed: {}", e);
                return;
            }
        };

        let effective_ttl = if ttl == 0 { self.default_ttl } else { ttl };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.prefixed(&key), value, effective_ttl)
            .await
        {
            error!("Redis SETEX failed for '{}': {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let mut conn = match self.conn().await {
            Ok(c) => c,
            Err(e) => {
                error!("Redis connection failed: {}", e);
                return;
            }
        };

        if let Err(e) = conn.del::<_, i64>(self.prefixed(key)).await {
            error!("Redis DEL failed for '{}': {}", key, e);
        }
    }

    async fn invalidate_all(&self) {
        let mut conn = match self.conn().await {
            Ok(c) => c,
            Err(e) => {
                error!("Redis connection failed: {}", e);
                return;
            }
        };

        // SCAN 游标遍历前缀下的键，分批删除
        let pattern = format!("{}*", self.key_prefix);
        let mut cursor: u64 = 0;
        let mut removed: u64 = 0;
        loop {
            let (next, keys): (u64, Vec<String>) = match redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(200)
                .query_async(&mut conn)
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    error!("Redis SCAN failed: {}", e);
                    return;
                }
            };

            if !keys.is_empty() {
                match conn.del::<_, i64>(keys).await {
                    Ok(count) => removed += count as u64,
                    Err(e) => {
                        error!("Redis DEL failed during flush: {}", e);
                        return;
                    }
                }
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }
        debug!("Flushed {} cached object(s) under prefix '{}'", removed, self.key_prefix);
    }
}
