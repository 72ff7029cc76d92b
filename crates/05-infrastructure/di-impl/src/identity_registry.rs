//! 接口标识注册表
//!
//! 按名称备忘标识，同名的多次创建在同一个注册表内得到同一个对象。

use autowire_common::{DiscoveryError, DiscoveryResult, Identity};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::trace;

/// 全局标识注册表
static GLOBAL_IDENTITY_REGISTRY: Lazy<Arc<IdentityRegistry>> =
    Lazy::new(|| Arc::new(IdentityRegistry::new()));

/// 接口标识注册表
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    identities: DashMap<String, Identity>,
}

impl IdentityRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程级默认注册表
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_IDENTITY_REGISTRY)
    }

    /// 获取或创建标识
    ///
    /// 并发创建同名标识时只有一个写入者胜出，其余调用者拿到胜出的对象。
    pub fn get_or_create(&self, name: &str) -> DiscoveryResult<Identity> {
        if name.trim().is_empty() {
            return Err(DiscoveryError::EmptyIdentityName);
        }

        if let Some(existing) = self.get(name) {
            return Ok(existing);
        }

        let identity = self
            .identities
            .entry(name.to_string())
            .or_insert_with(|| {
                trace!("创建接口标识: {}", name);
                Identity::new(name)
            })
            .clone();
        Ok(identity)
    }

    /// 以类型路径为名称获取或创建标识
    ///
    /// 可以用于 trait 对象，例如 `get_or_create_for::<dyn UserRepository>()`。
    pub fn get_or_create_for<T: ?Sized + 'static>(&self) -> Identity {
        let name = std::any::type_name::<T>();
        self.identities
            .entry(name.to_string())
            .or_insert_with(|| Identity::new(name))
            .clone()
    }

    /// 查找已创建的标识
    pub fn get(&self, name: &str) -> Option<Identity> {
        self.identities.get(name).map(|entry| entry.clone())
    }

    /// 已创建的标识数量
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
