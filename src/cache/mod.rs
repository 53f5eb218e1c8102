//! 缓存层
//!
//! 内置 moka（进程内）与 redis 两种后端，由配置项 `cache.type` 选择。
//! 后端以注册表 + ctor 自注册的方式装配，新增后端不需要改动装配代码。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个缓存后端并在进程启动时注册进注册表
///
/// ```rust,ignore
/// declare_cache_backend!("moka", MokaCache);
/// ```
///
/// 后端类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_cache_backend {
    ($name:literal, $backend:ty) => {
        #[ctor::ctor]
        fn _register_cache_backend() {
            $crate::cache::register::register_cache_backend(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let backend = <$backend>::new()
                            .map_err($crate::errors::AttendanceError::cache_connection)?;
                        Ok(Box::new(backend) as Box<dyn $crate::cache::ObjectCache>)
                    }) as $crate::cache::register::CacheInitFuture
                }),
            );
        }
    };
}
