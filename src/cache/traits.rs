//! 缓存接口定义

use async_trait::async_trait;

/// 缓存查询结果
///
/// `ExistsButNoValue` 用于后端暂时不可用等无法区分命中与否的场景，
/// 调用方应按未命中处理但不要回填。
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

/// 对象缓存的统一接口，值以 JSON 字符串形式存取
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 为 0 时使用后端的默认过期策略
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}
