//! 示例服务

pub mod cache;
pub mod mailer;

/// 缓存接口名称
pub const CACHE: &str = "Cache";

/// 缓存接口
pub trait Cache: Send + Sync {
    /// 实现名称
    fn backend(&self) -> &str;
}
