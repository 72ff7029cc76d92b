//! 元数据定义
//!
//! 提供类型信息、单元注解和源位置导出项

use crate::unit::Unit;
use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            name: full_name
                .split("::")
                .last()
                .unwrap_or(full_name)
                .to_string(),
            id: TypeId::of::<T>(),
            module_path: full_name.to_string(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        self.name.split("::").last().unwrap_or(&self.name)
    }
}

/// 提供者注解
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderAnnotation {
    /// 声明实现的接口名称，为空时代表自身
    pub provide: Option<String>,
    /// 显式优先级
    pub priority: Option<i32>,
}

/// 单元在源位置上声明的注解
///
/// 加载源位置时会被写入能力标记表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitAnnotations {
    /// 提供者注解
    pub provider: Option<ProviderAnnotation>,
    /// 是否为控制器
    pub controller: bool,
}

impl UnitAnnotations {
    /// 提供者注解
    pub fn provider(provide: Option<&str>, priority: Option<i32>) -> Self {
        Self {
            provider: Some(ProviderAnnotation {
                provide: provide.map(str::to_string),
                priority,
            }),
            controller: false,
        }
    }

    /// 控制器注解
    pub fn controller() -> Self {
        Self {
            provider: None,
            controller: true,
        }
    }

    /// 合并同一单元的另一组注解，后者的提供者注解优先
    pub fn merge(mut self, other: UnitAnnotations) -> Self {
        if other.provider.is_some() {
            self.provider = other.provider;
        }
        self.controller |= other.controller;
        self
    }

    /// 是否没有任何注解
    pub fn is_empty(&self) -> bool {
        self.provider.is_none() && !self.controller
    }
}

/// 源位置的导出项
#[derive(Clone)]
pub enum Export {
    /// 可构造单元
    Unit {
        unit: Unit,
        annotations: UnitAnnotations,
    },
    /// 普通值（常量、非构造符号等）
    Value { name: String },
}

impl Export {
    /// 单元导出项
    pub fn unit(unit: Unit, annotations: UnitAnnotations) -> Self {
        Self::Unit { unit, annotations }
    }

    /// 值导出项
    pub fn value(name: impl Into<String>) -> Self {
        Self::Value { name: name.into() }
    }

    /// 导出名称
    pub fn name(&self) -> &str {
        match self {
            Self::Unit { unit, .. } => unit.name(),
            Self::Value { name } => name,
        }
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit { unit, annotations } => f
                .debug_struct("Export::Unit")
                .field("unit", &unit.name())
                .field("annotations", annotations)
                .finish(),
            Self::Value { name } => f.debug_struct("Export::Value").field("name", name).finish(),
        }
    }
}
