//! 缓存实现

use super::Cache;
use autowire_macros::injectable;

/// Redis 缓存
#[derive(Debug)]
#[injectable(provide = "Cache", priority = 10, constructor = "RedisCache::connect")]
pub struct RedisCache {
    url: String,
}

impl RedisCache {
    /// 使用默认地址连接
    pub fn connect() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
        }
    }

    /// 连接地址
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Cache for RedisCache {
    fn backend(&self) -> &str {
        "redis"
    }
}

/// 进程内缓存，作为备用实现
#[derive(Debug, Default)]
#[injectable(provide = "Cache", priority = 1)]
pub struct MemoryCache;

impl Cache for MemoryCache {
    fn backend(&self) -> &str {
        "memory"
    }
}
