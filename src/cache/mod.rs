//! 对象缓存层
//!
//! 通过插件注册表在启动时按配置选择缓存后端（moka 进程内缓存或 redis）。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个对象缓存插件并在程序加载时注册到全局注册表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        ::paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        ::std::boxed::Box::pin(async {
                            let plugin = $plugin::new()
                                .map_err($crate::errors::EduSystemError::cache_connection)?;
                            Ok(::std::boxed::Box::new(plugin)
                                as ::std::boxed::Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
