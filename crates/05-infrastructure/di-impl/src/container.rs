//! 内存宿主容器
//!
//! 记录注册的模块、提供者和控制器，并能按注册键实例化提供者。
//! 不实现构造注入和作用域管理。

use autowire_common::{DependencyError, DependencyResult, ProviderToken, Unit};
use autowire_di_abstractions::{HostContainer, ModuleDescriptor, ProviderEntry};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Default)]
struct ContainerState {
    modules: Vec<String>,
    providers: HashMap<ProviderToken, ProviderEntry>,
    provider_order: Vec<ProviderToken>,
    controllers: Vec<Unit>,
}

/// 内存宿主容器实现
#[derive(Default)]
pub struct DiContainerImpl {
    state: RwLock<ContainerState>,
}

impl DiContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已注册的模块名称
    pub fn modules(&self) -> Vec<String> {
        self.state.read().modules.clone()
    }

    /// 注册键是否已注册
    pub fn is_registered(&self, token: &ProviderToken) -> bool {
        self.state.read().providers.contains_key(token)
    }

    /// 获取提供者条目
    pub fn provider(&self, token: &ProviderToken) -> Option<ProviderEntry> {
        self.state.read().providers.get(token).cloned()
    }

    /// 已注册的注册键，按首次注册顺序
    pub fn provider_tokens(&self) -> Vec<ProviderToken> {
        self.state.read().provider_order.clone()
    }

    /// 已注册的控制器
    pub fn controllers(&self) -> Vec<Unit> {
        self.state.read().controllers.clone()
    }

    /// 按注册键创建实例
    ///
    /// 值条目返回共享的值，其余条目每次调用都会构造新实例。
    pub fn instantiate(&self, token: &ProviderToken) -> DependencyResult<Arc<dyn Any + Send + Sync>> {
        let entry = self
            .provider(token)
            .ok_or_else(|| DependencyError::ProviderNotRegistered {
                token: token.to_string(),
            })?;

        let instance: Arc<dyn Any + Send + Sync> = match entry {
            ProviderEntry::Class(unit) | ProviderEntry::Bound { unit, .. } => {
                Arc::from(unit.construct())
            }
            ProviderEntry::Value { value, .. } => value,
            ProviderEntry::Factory { factory, .. } => Arc::from(factory()),
        };
        Ok(instance)
    }

    /// 按注册键创建实例并转换为具体类型
    pub fn instantiate_as<T>(&self, token: &ProviderToken) -> DependencyResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let type_mismatch = || DependencyError::ProviderCreationFailed {
            token: token.to_string(),
            message: format!("实例类型不是 {}", std::any::type_name::<T>()),
        };

        // 单元条目在构造前即可判断类型
        if let Some(entry) = self.provider(token) {
            if entry.unit().is_some_and(|unit| !unit.produces::<T>()) {
                return Err(type_mismatch());
            }
        }

        self.instantiate(token)?
            .downcast::<T>()
            .map_err(|_| type_mismatch())
    }
}

impl HostContainer for DiContainerImpl {
    fn register_module(&self, descriptor: &ModuleDescriptor) -> DependencyResult<()> {
        info!(
            "注册模块: {} ({} 个提供者, {} 个控制器)",
            descriptor.name,
            descriptor.providers.len(),
            descriptor.controllers.len()
        );

        let mut state = self.state.write();
        state.modules.push(descriptor.name.clone());

        for entry in &descriptor.providers {
            let token = entry.token();
            debug!("注册提供者: {}", token);
            if state.providers.insert(token.clone(), entry.clone()).is_some() {
                warn!("提供者 {} 已存在，被模块 {} 覆盖", token, descriptor.name);
            } else {
                state.provider_order.push(token);
            }
        }

        for controller in &descriptor.controllers {
            if state.controllers.contains(controller) {
                continue;
            }
            debug!("注册控制器: {}", controller.name());
            state.controllers.push(controller.clone());
        }

        Ok(())
    }
}
