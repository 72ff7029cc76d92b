//! 可构造单元定义
//!
//! 单元是扫描发现的、可实例化的定义。单元本身不携带任何标记，
//! 提供者/控制器标记、接口和优先级都存放在带外的能力标记表中。

use crate::metadata::TypeInfo;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 单元唯一名称
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(Arc<str>);

impl UnitId {
    /// 创建单元名称
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// 名称字符串
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 单元构造函数类型
pub type ConstructorFn = Arc<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// 可构造单元
///
/// 克隆代价很低，多个克隆共享同一个定义。
#[derive(Clone)]
pub struct Unit {
    definition: Arc<UnitDefinition>,
}

struct UnitDefinition {
    id: UnitId,
    type_info: TypeInfo,
    constructor: ConstructorFn,
}

impl Unit {
    /// 使用名称和构造函数创建单元
    pub fn new<T, F>(name: impl AsRef<str>, constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let constructor: ConstructorFn =
            Arc::new(move || Box::new(constructor()) as Box<dyn Any + Send + Sync>);

        Self {
            definition: Arc::new(UnitDefinition {
                id: UnitId::new(name),
                type_info: TypeInfo::of::<T>(),
                constructor,
            }),
        }
    }

    /// 以完整类型路径命名，使用 `Default` 构造
    pub fn of<T>() -> Self
    where
        T: Default + Any + Send + Sync,
    {
        Self::new(std::any::type_name::<T>(), T::default)
    }

    /// 单元名称
    pub fn id(&self) -> &UnitId {
        &self.definition.id
    }

    /// 单元名称字符串
    pub fn name(&self) -> &str {
        self.definition.id.as_str()
    }

    /// 不带模块路径的名称
    pub fn short_name(&self) -> &str {
        let name = self.name();
        name.rsplit("::").next().unwrap_or(name)
    }

    /// 构造出的实例类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.definition.type_info
    }

    /// 构造出的实例是否为指定类型
    pub fn produces<T: Any>(&self) -> bool {
        self.definition.type_info.id == TypeId::of::<T>()
    }

    /// 构造函数
    pub fn constructor(&self) -> ConstructorFn {
        Arc::clone(&self.definition.constructor)
    }

    /// 创建一个新实例
    pub fn construct(&self) -> Box<dyn Any + Send + Sync> {
        (self.definition.constructor)()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.definition.id == other.definition.id
    }
}

impl Eq for Unit {}

impl std::hash::Hash for Unit {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.definition.id.hash(state);
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("name", &self.name())
            .field("type", &self.definition.type_info.module_path)
            .finish()
    }
}
