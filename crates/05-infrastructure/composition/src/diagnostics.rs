//! 发现诊断报告

use autowire_di_abstractions::{Binding, ModuleDescriptor, ProviderEntry};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// 提供者条目来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOrigin {
    /// 调用者显式提供
    Explicit,
    /// 扫描发现
    Discovered,
}

/// 单个提供者的诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReport {
    /// 注册键名称
    pub token: String,
    /// 胜出单元名称，值和工厂条目为空
    pub unit: Option<String>,
    /// 优先级，显式条目为空
    pub priority: Option<i32>,
    /// 是否为自绑定
    pub self_bound: bool,
    /// 来源
    pub origin: ProviderOrigin,
}

impl ProviderReport {
    fn from_binding(binding: &Binding) -> Self {
        Self {
            token: binding.token.name().to_string(),
            unit: Some(binding.unit.name().to_string()),
            priority: Some(binding.priority),
            self_bound: binding.is_self_bound(),
            origin: ProviderOrigin::Discovered,
        }
    }

    fn from_explicit(entry: &ProviderEntry) -> Self {
        let token = entry.token();
        Self {
            token: token.name().to_string(),
            unit: entry.unit().map(|unit| unit.name().to_string()),
            priority: None,
            self_bound: token.is_self_bound(),
            origin: ProviderOrigin::Explicit,
        }
    }
}

/// 模块发现诊断报告
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// 模块名称
    pub module: String,
    /// 扫描根目录
    pub base_dir: PathBuf,
    /// 发现耗时
    pub elapsed: Duration,
    /// 扫描得到的单元数量
    pub scanned_units: usize,
    /// 提供者
    pub providers: Vec<ProviderReport>,
    /// 控制器名称
    pub controllers: Vec<String>,
}

impl DiscoveryReport {
    /// 根据发现结果生成报告
    pub fn new(
        descriptor: &ModuleDescriptor,
        explicit_providers: &[ProviderEntry],
        bindings: &[Binding],
        base_dir: PathBuf,
        elapsed: Duration,
        scanned_units: usize,
    ) -> Self {
        let providers = explicit_providers
            .iter()
            .map(ProviderReport::from_explicit)
            .chain(bindings.iter().map(ProviderReport::from_binding))
            .collect();

        Self {
            module: descriptor.name.clone(),
            base_dir,
            elapsed,
            scanned_units,
            providers,
            controllers: descriptor
                .controller_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// 扫描发现的提供者
    pub fn discovered_providers(&self) -> impl Iterator<Item = &ProviderReport> {
        self.providers
            .iter()
            .filter(|p| p.origin == ProviderOrigin::Discovered)
    }

    /// 输出到日志
    pub fn emit(&self) {
        info!(
            module = %self.module,
            base_dir = %self.base_dir.display(),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "模块 {} 自动发现完成: {} 个单元, {} 个提供者, {} 个控制器",
            self.module,
            self.scanned_units,
            self.providers.len(),
            self.controllers.len()
        );
        for provider in &self.providers {
            info!(
                "  提供者 {} -> {} (优先级: {}, 来源: {:?})",
                provider.token,
                provider.unit.as_deref().unwrap_or("-"),
                provider
                    .priority
                    .map_or_else(|| "-".to_string(), |p| p.to_string()),
                provider.origin
            );
        }
        for controller in &self.controllers {
            info!("  控制器 {}", controller);
        }
    }
}

impl fmt::Display for DiscoveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "模块 {} ({}, 耗时 {:?})",
            self.module,
            self.base_dir.display(),
            self.elapsed
        )?;
        writeln!(f, "提供者:")?;
        for provider in &self.providers {
            let suffix = if provider.self_bound { " (self)" } else { "" };
            match (&provider.unit, provider.priority) {
                (Some(unit), Some(priority)) => writeln!(
                    f,
                    "  {}{} -> {} [优先级 {}]",
                    provider.token, suffix, unit, priority
                )?,
                (Some(unit), None) => {
                    writeln!(f, "  {}{} -> {} [显式]", provider.token, suffix, unit)?
                }
                (None, _) => writeln!(f, "  {} [显式值]", provider.token)?,
            }
        }
        writeln!(f, "控制器:")?;
        for controller in &self.controllers {
            writeln!(f, "  {}", controller)?;
        }
        Ok(())
    }
}
