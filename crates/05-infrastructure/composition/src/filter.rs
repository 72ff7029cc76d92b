//! 源文本标记预过滤
//!
//! 只有包含提供者或控制器标记子串的源位置才会被加载。
//! 注解在其他文件中改名再导出、本文件以通配引入时会漏判，误判为候选则没有影响。

use autowire_common::DiscoveryConfig;
use autowire_di_abstractions::CandidateFilter;
use std::path::Path;

/// 标记子串过滤器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFilter {
    markers: Vec<String>,
}

impl MarkerFilter {
    /// 使用给定标记创建过滤器
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.is_empty())
                .collect(),
        }
    }

    /// 使用配置中的提供者和控制器标记
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(
            config
                .provider_markers
                .iter()
                .chain(&config.controller_markers)
                .cloned(),
        )
    }

    /// 标记列表
    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for MarkerFilter {
    fn default() -> Self {
        Self::from_config(&DiscoveryConfig::default())
    }
}

impl CandidateFilter for MarkerFilter {
    fn should_load(&self, _location: &Path, source: &str) -> bool {
        self.markers.iter().any(|marker| source.contains(marker.as_str()))
    }
}
