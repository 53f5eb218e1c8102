use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_cache_backend;

declare_cache_backend!("moka", MokaCache);

/// 进程内缓存，单实例部署的默认选择
pub struct MokaCache {
    inner: Cache<String, String>,
}

impl MokaCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let inner = Cache::builder()
            .max_capacity(config.cache.memory.max_capacity)
            .time_to_live(Duration::from_secs(config.cache.default_ttl))
            .build();

        debug!(
            "Moka cache ready (capacity: {}, ttl: {}s)",
            config.cache.memory.max_capacity, config.cache.default_ttl
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectCache for MokaCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => CacheResult::Found(value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // 过期策略在构建时统一指定，条目级 ttl 不生效
        if ttl != 0 {
            debug!("Per-entry ttl ignored by moka backend (key: {})", key);
        }
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
