//! 绑定解析器
//!
//! 按注册键对提供者候选分组，每组按优先级选出唯一胜者。
//! 最高优先级并列时报冲突错误。

use crate::tagger::CapabilityTagger;
use autowire_common::{CapabilityLookup, DiscoveryError, DiscoveryResult, ProviderToken, Unit};
use autowire_di_abstractions::Binding;
use std::collections::HashMap;
use tracing::debug;

/// 绑定解析器
#[derive(Debug, Clone, Copy)]
pub struct BindingResolver<'a> {
    tagger: &'a CapabilityTagger,
}

impl<'a> BindingResolver<'a> {
    /// 使用能力标记表创建解析器
    pub fn new(tagger: &'a CapabilityTagger) -> Self {
        Self { tagger }
    }

    /// 为每个注册键选出一个胜出单元
    ///
    /// 非提供者候选被忽略。输出按各组首次出现的顺序排列，
    /// 胜者只取决于优先级，与输入顺序无关。
    pub fn resolve(&self, units: &[Unit]) -> DiscoveryResult<Vec<Binding>> {
        let mut groups: Vec<(ProviderToken, Vec<&Unit>)> = Vec::new();
        let mut index: HashMap<ProviderToken, usize> = HashMap::new();

        for unit in units
            .iter()
            .filter(|unit| self.tagger.is_provider_candidate(unit))
        {
            let token = self.tagger.associated_token(unit);
            let slot = *index.entry(token.clone()).or_insert_with(|| {
                groups.push((token, Vec::new()));
                groups.len() - 1
            });
            let members = &mut groups[slot].1;
            if !members.iter().any(|member| *member == unit) {
                members.push(unit);
            }
        }

        groups
            .into_iter()
            .map(|(token, members)| self.select(token, members))
            .collect()
    }

    /// 全部控制器候选，保持发现顺序
    pub fn filter_controllers(&self, units: &[Unit]) -> Vec<Unit> {
        units
            .iter()
            .filter(|unit| self.tagger.is_controller_candidate(unit))
            .cloned()
            .collect()
    }

    fn select(&self, token: ProviderToken, members: Vec<&Unit>) -> DiscoveryResult<Binding> {
        let mut ranked: Vec<(&Unit, i32)> = members
            .into_iter()
            .map(|unit| (unit, self.tagger.priority(unit)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let (winner, priority) = ranked[0];
        if let Some(&(_, runner_up)) = ranked.get(1) {
            if runner_up == priority {
                let mut candidates: Vec<String> = ranked
                    .iter()
                    .take_while(|(_, p)| *p == priority)
                    .map(|(unit, _)| unit.name().to_string())
                    .collect();
                candidates.sort();
                return Err(DiscoveryError::Conflict {
                    token: token.name().to_string(),
                    priority,
                    candidates,
                });
            }
            debug!(
                "{} 有 {} 个实现，选择 {} (优先级 {})",
                token,
                ranked.len(),
                winner.name(),
                priority
            );
        }

        Ok(Binding::new(token, winner.clone(), priority))
    }
}
