//! 能力标记表
//!
//! 单元的提供者/控制器标记、关联标识和优先级都记录在这里，
//! 单元自身的字段从不修改。

use autowire_common::{CapabilityLookup, Identity, ProviderToken, Unit, UnitId};
use dashmap::DashMap;

/// 默认优先级
pub const DEFAULT_PRIORITY: i32 = 0;

/// 单元的能力标记
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitTags {
    /// 提供者候选
    pub provider: bool,
    /// 控制器候选
    pub controller: bool,
    /// 关联的接口标识，为空时代表自身
    pub identity: Option<Identity>,
    /// 优先级
    pub priority: i32,
}

/// 能力标记表
#[derive(Debug, Default)]
pub struct CapabilityTagger {
    tags: DashMap<UnitId, UnitTags>,
}

impl CapabilityTagger {
    /// 创建空标记表
    pub fn new() -> Self {
        Self::default()
    }

    /// 标记为提供者候选
    pub fn mark_provider_candidate(&self, unit: &Unit) {
        self.tags.entry(unit.id().clone()).or_default().provider = true;
    }

    /// 标记为控制器候选
    pub fn mark_controller_candidate(&self, unit: &Unit) {
        self.tags.entry(unit.id().clone()).or_default().controller = true;
    }

    /// 设置关联标识，`None` 表示绑定到自身
    pub fn set_associated_identity(&self, unit: &Unit, identity: Option<Identity>) {
        self.tags.entry(unit.id().clone()).or_default().identity = identity;
    }

    /// 设置优先级
    pub fn set_priority(&self, unit: &Unit, priority: i32) {
        self.tags.entry(unit.id().clone()).or_default().priority = priority;
    }

    /// 是否为提供者候选
    pub fn is_provider_candidate(&self, unit: &Unit) -> bool {
        self.tags
            .get(unit.id())
            .map(|tags| tags.provider)
            .unwrap_or(false)
    }

    /// 是否为控制器候选
    pub fn is_controller_candidate(&self, unit: &Unit) -> bool {
        self.tags
            .get(unit.id())
            .map(|tags| tags.controller)
            .unwrap_or(false)
    }

    /// 关联标识
    pub fn associated_identity(&self, unit: &Unit) -> Option<Identity> {
        self.tags.get(unit.id()).and_then(|tags| tags.identity.clone())
    }

    /// 优先级，未设置时为 0
    pub fn priority(&self, unit: &Unit) -> i32 {
        self.tags
            .get(unit.id())
            .map(|tags| tags.priority)
            .unwrap_or(DEFAULT_PRIORITY)
    }

    /// 单元的全部标记
    pub fn tags_of(&self, unit: &Unit) -> UnitTags {
        self.tags
            .get(unit.id())
            .map(|tags| tags.clone())
            .unwrap_or_default()
    }

    /// 单元是否声明实现了某个接口
    pub fn implements(&self, unit: &Unit, identity: &Identity) -> bool {
        identity.is_implemented_by(unit, self)
    }

    /// 已标记的单元数量
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl CapabilityLookup for CapabilityTagger {
    fn is_provider_candidate(&self, unit: &Unit) -> bool {
        CapabilityTagger::is_provider_candidate(self, unit)
    }

    fn associated_token(&self, unit: &Unit) -> ProviderToken {
        match self.associated_identity(unit) {
            Some(identity) => ProviderToken::Interface(identity),
            None => ProviderToken::of_unit(unit),
        }
    }
}
