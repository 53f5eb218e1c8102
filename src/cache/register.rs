//! 缓存后端注册表
//!
//! 各后端模块在进程启动阶段通过 `declare_cache_backend!` 自注册，
//! 运行时按配置的名字查表构建实例。

use crate::cache::traits::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type CacheInitFuture = Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type CacheConstructor = Arc<dyn Fn() -> CacheInitFuture + Send + Sync>;

static BACKEND_REGISTRY: Lazy<RwLock<HashMap<&'static str, CacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_cache_backend(name: &'static str, constructor: CacheConstructor) {
    BACKEND_REGISTRY
        .write()
        .expect("Cache registry lock poisoned")
        .insert(name, constructor);
}

pub fn cache_backend(name: &str) -> Option<CacheConstructor> {
    BACKEND_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .get(name)
        .cloned()
}

/// 列出已注册的后端名，启动日志用
pub fn log_cache_backends() {
    let registry = BACKEND_REGISTRY
        .read()
        .expect("Cache registry lock poisoned");
    let mut names: Vec<&str> = registry.keys().copied().collect();
    names.sort_unstable();
    if names.is_empty() {
        tracing::debug!("No cache backends registered");
    } else {
        tracing::debug!("Registered cache backends: {}", names.join(", "));
    }
}
