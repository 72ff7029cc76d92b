//! 发现上下文
//!
//! 持有标识注册表、能力标记表、内容缓存和模块注册备忘。
//! 进程内有一个默认实例，测试可以各自创建独立的上下文。

use crate::bootstrapper::RegisteredModule;
use crate::unit_loader::ContentCache;
use autowire_common::{DiscoveryResult, Identity};
use autowire_di_impl::{CapabilityTagger, IdentityRegistry};
use dashmap::DashMap;
use once_cell::sync::{Lazy, OnceCell};
use std::sync::Arc;
use std::thread::{self, ThreadId};

static GLOBAL_DISCOVERY_CONTEXT: Lazy<Arc<DiscoveryContext>> =
    Lazy::new(|| Arc::new(DiscoveryContext::with_identities(IdentityRegistry::global())));

/// 模块注册备忘单元
pub(crate) type ModuleSlot = Arc<OnceCell<Arc<RegisteredModule>>>;

/// 发现上下文
#[derive(Debug)]
pub struct DiscoveryContext {
    identities: Arc<IdentityRegistry>,
    tagger: CapabilityTagger,
    cache: ContentCache,
    modules: DashMap<String, ModuleSlot>,
    registering: DashMap<String, ThreadId>,
}

impl DiscoveryContext {
    /// 创建独立的上下文
    pub fn new() -> Self {
        Self::with_identities(Arc::new(IdentityRegistry::new()))
    }

    /// 使用指定的标识注册表创建上下文
    pub fn with_identities(identities: Arc<IdentityRegistry>) -> Self {
        Self {
            identities,
            tagger: CapabilityTagger::new(),
            cache: ContentCache::new(),
            modules: DashMap::new(),
            registering: DashMap::new(),
        }
    }

    /// 进程级默认上下文
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_DISCOVERY_CONTEXT)
    }

    /// 标识注册表
    pub fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    /// 能力标记表
    pub fn tagger(&self) -> &CapabilityTagger {
        &self.tagger
    }

    /// 内容缓存
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// 获取或创建接口标识
    pub fn interface(&self, name: &str) -> DiscoveryResult<Identity> {
        self.identities.get_or_create(name)
    }

    /// 已完成注册的模块
    pub fn registered(&self, module: &str) -> Option<Arc<RegisteredModule>> {
        self.modules
            .get(module)
            .and_then(|slot| slot.value().get().cloned())
    }

    /// 已完成注册的模块数量
    pub fn registered_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|slot| slot.value().get().is_some())
            .count()
    }

    /// 模块的注册备忘单元
    ///
    /// 返回后即释放分片锁，注册过程中宿主可以再注册其他模块。
    pub(crate) fn module_slot(&self, module: &str) -> ModuleSlot {
        if let Some(slot) = self.modules.get(module) {
            return Arc::clone(slot.value());
        }
        Arc::clone(
            self.modules
                .entry(module.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        )
    }

    /// 当前线程是否正在注册该模块
    pub(crate) fn is_registering_here(&self, module: &str) -> bool {
        self.registering
            .get(module)
            .is_some_and(|owner| *owner.value() == thread::current().id())
    }

    /// 标记当前线程开始注册模块，守卫释放时清除
    pub(crate) fn begin_registration(&self, module: &str) -> RegistrationGuard<'_> {
        self.registering
            .insert(module.to_string(), thread::current().id());
        RegistrationGuard {
            context: self,
            module: module.to_string(),
        }
    }
}

/// 模块注册进行中的标记
pub(crate) struct RegistrationGuard<'a> {
    context: &'a DiscoveryContext,
    module: String,
}

impl Drop for RegistrationGuard<'_> {
    fn drop(&mut self) {
        self.context.registering.remove(&self.module);
    }
}

impl Default for DiscoveryContext {
    fn default() -> Self {
        Self::new()
    }
}
