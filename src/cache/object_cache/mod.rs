//! 对象缓存后端实现

pub mod moka;
pub mod redis;
