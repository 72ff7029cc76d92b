//! 宿主容器抽象接口
//!
//! 发现流程的产出是一个模块注册描述符，最终交给宿主容器注册。

use autowire_common::{ConstructorFn, DependencyResult, ProviderToken, Unit};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 已解析的绑定：注册键 → 胜出单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// 接口标识或单元自身
    pub token: ProviderToken,
    /// 胜出的单元
    pub unit: Unit,
    /// 胜出单元的优先级
    pub priority: i32,
}

impl Binding {
    /// 创建绑定
    pub fn new(token: ProviderToken, unit: Unit, priority: i32) -> Self {
        Self {
            token,
            unit,
            priority,
        }
    }

    /// 是否为自绑定
    pub fn is_self_bound(&self) -> bool {
        self.token.is_self_bound()
    }
}

/// 提供者条目
#[derive(Clone)]
pub enum ProviderEntry {
    /// 以单元自身为键
    Class(Unit),
    /// 键 → 单元
    Bound { provide: ProviderToken, unit: Unit },
    /// 键 → 现成的值
    Value {
        provide: ProviderToken,
        value: Arc<dyn Any + Send + Sync>,
    },
    /// 键 → 工厂函数
    Factory {
        provide: ProviderToken,
        factory: ConstructorFn,
    },
}

impl ProviderEntry {
    /// 键 → 现成的值
    pub fn value<T>(provide: impl Into<ProviderToken>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::Value {
            provide: provide.into(),
            value: Arc::new(value),
        }
    }

    /// 键 → 工厂函数
    pub fn factory<T, F>(provide: impl Into<ProviderToken>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::Factory {
            provide: provide.into(),
            factory: Arc::new(move || Box::new(factory()) as Box<dyn Any + Send + Sync>),
        }
    }

    /// 注册键
    pub fn token(&self) -> ProviderToken {
        match self {
            Self::Class(unit) => ProviderToken::of_unit(unit),
            Self::Bound { provide, .. }
            | Self::Value { provide, .. }
            | Self::Factory { provide, .. } => provide.clone(),
        }
    }

    /// 条目引用的单元
    pub fn unit(&self) -> Option<&Unit> {
        match self {
            Self::Class(unit) | Self::Bound { unit, .. } => Some(unit),
            Self::Value { .. } | Self::Factory { .. } => None,
        }
    }
}

impl From<Binding> for ProviderEntry {
    fn from(binding: Binding) -> Self {
        Self::Bound {
            provide: binding.token,
            unit: binding.unit,
        }
    }
}

impl From<Unit> for ProviderEntry {
    fn from(unit: Unit) -> Self {
        Self::Class(unit)
    }
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(unit) => f.debug_tuple("Class").field(&unit.name()).finish(),
            Self::Bound { provide, unit } => f
                .debug_struct("Bound")
                .field("provide", provide)
                .field("unit", &unit.name())
                .finish(),
            Self::Value { provide, .. } => {
                f.debug_struct("Value").field("provide", provide).finish()
            }
            Self::Factory { provide, .. } => {
                f.debug_struct("Factory").field("provide", provide).finish()
            }
        }
    }
}

/// 模块注册描述符
#[derive(Debug, Clone, Default)]
pub struct ModuleDescriptor {
    /// 模块名称
    pub name: String,
    /// 提供者条目，按注册顺序
    pub providers: Vec<ProviderEntry>,
    /// 控制器，按注册顺序
    pub controllers: Vec<Unit>,
}

impl ModuleDescriptor {
    /// 创建空描述符
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            providers: Vec::new(),
            controllers: Vec::new(),
        }
    }

    /// 提供者注册键，按注册顺序
    pub fn provider_tokens(&self) -> Vec<ProviderToken> {
        self.providers.iter().map(ProviderEntry::token).collect()
    }

    /// 控制器名称，按注册顺序
    pub fn controller_names(&self) -> Vec<&str> {
        self.controllers.iter().map(Unit::name).collect()
    }
}

/// 宿主依赖注入容器
///
/// 发现流程只依赖这一个操作，容器内部的解析和作用域不在此处定义。
pub trait HostContainer: Send + Sync {
    /// 注册模块
    fn register_module(&self, descriptor: &ModuleDescriptor) -> DependencyResult<()>;
}

impl<C> HostContainer for Arc<C>
where
    C: HostContainer + ?Sized,
{
    fn register_module(&self, descriptor: &ModuleDescriptor) -> DependencyResult<()> {
        (**self).register_module(descriptor)
    }
}
