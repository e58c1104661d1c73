//! 缓存层
//!
//! 插件在加载时通过 `declare_object_cache_plugin!` 注册，启动时按配置选择。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use register::{
    ObjectCacheConstructor, debug_object_cache_registry, get_object_cache_plugin,
    register_object_cache_plugin,
};
pub use traits::{CacheResult, ObjectCache};

/// 注册缓存插件
///
/// 插件类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[::ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::AcademyError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}
