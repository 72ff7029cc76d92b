//! 接口标识定义
//!
//! [`Identity`] 代表一个抽象接口，可以作为注入查找键使用。
//! 标识实例应当通过标识注册表获取，以保证同名标识在进程内是同一个对象。

use crate::unit::{Unit, UnitId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// 派生标识比较键使用的命名空间
const IDENTITY_NAMESPACE: Uuid = Uuid::from_u128(0x8f4e_2c1a_63b7_4d0e_9a51_07c3_e2d9_b614);

/// 抽象接口标识
#[derive(Clone)]
pub struct Identity {
    inner: Arc<IdentityInner>,
}

#[derive(Debug)]
struct IdentityInner {
    name: Box<str>,
    key: Uuid,
}

impl Identity {
    /// 直接构造标识
    ///
    /// 不经过注册表的备忘，一般只由注册表调用。
    pub fn new(name: &str) -> Self {
        Self {
            inner: Arc::new(IdentityInner {
                name: name.into(),
                key: Self::derive_key(name),
            }),
        }
    }

    /// 由名称确定性地派生比较键
    pub fn derive_key(name: &str) -> Uuid {
        Uuid::new_v5(&IDENTITY_NAMESPACE, name.as_bytes())
    }

    /// 标识名称
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// 比较键
    pub fn key(&self) -> Uuid {
        self.inner.key
    }

    /// 是否为同一个标识对象（引用相等）
    pub fn same_instance(&self, other: &Identity) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// 候选单元是否实现了此接口
    ///
    /// 只比较能力标记中记录的关联标识，不做任何类型转换。
    pub fn is_implemented_by<L>(&self, unit: &Unit, lookup: &L) -> bool
    where
        L: CapabilityLookup + ?Sized,
    {
        lookup.is_provider_candidate(unit)
            && lookup
                .associated_token(unit)
                .identity()
                .is_some_and(|identity| identity == self)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.inner.key == other.inner.key && self.inner.name == other.inner.name
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.key.hash(state);
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity").field(&self.name()).finish()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 提供者注册键
///
/// 接口绑定的单元使用接口标识，未声明接口的单元代表自身。
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProviderToken {
    /// 抽象接口
    Interface(Identity),
    /// 单元自身
    Unit(UnitId),
}

impl ProviderToken {
    /// 单元自身的注册键
    pub fn of_unit(unit: &Unit) -> Self {
        Self::Unit(unit.id().clone())
    }

    /// 接口标识（自绑定时为空）
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Interface(identity) => Some(identity),
            Self::Unit(_) => None,
        }
    }

    /// 是否为自绑定
    pub fn is_self_bound(&self) -> bool {
        matches!(self, Self::Unit(_))
    }

    /// 用于日志和诊断的名称
    pub fn name(&self) -> &str {
        match self {
            Self::Interface(identity) => identity.name(),
            Self::Unit(id) => id.as_str(),
        }
    }
}

impl From<Identity> for ProviderToken {
    fn from(identity: Identity) -> Self {
        Self::Interface(identity)
    }
}

impl fmt::Display for ProviderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface(identity) => write!(f, "{}", identity.name()),
            Self::Unit(id) => write!(f, "{} (self)", id),
        }
    }
}

/// 能力标记查询接口
///
/// 标识的接口一致性检查通过它读取单元的带外元数据。
pub trait CapabilityLookup {
    /// 是否为提供者候选
    fn is_provider_candidate(&self, unit: &Unit) -> bool;

    /// 单元关联的注册键
    fn associated_token(&self, unit: &Unit) -> ProviderToken;
}
