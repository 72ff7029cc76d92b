//! 自动发现模块声明

use crate::bootstrapper::{RegisteredModule, RegistrationDriver};
use crate::caller::infer_base_dir;
use autowire_common::{DiscoveryResult, Unit};
use autowire_di_abstractions::ProviderEntry;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 自动发现模块声明
///
/// 描述一个模块的扫描模式和显式条目。没有显式根目录时，
/// 以调用 [`AutoModule::new`] 的源文件所在目录为扫描根目录。
///
/// ```rust,no_run
/// use autowire_composition::{AutoModule, RegistrationDriver};
/// use autowire_di_impl::DiContainerImpl;
/// use std::sync::Arc;
///
/// let driver = RegistrationDriver::new(Arc::new(DiContainerImpl::new()));
/// let registered = AutoModule::new("AppModule")
///     .providers(["services/*.rs"])
///     .controllers(["controllers/**/*.rs"])
///     .register(&driver)?;
/// println!("{} 个提供者", registered.descriptor.providers.len());
/// # Ok::<(), autowire_common::DiscoveryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AutoModule {
    name: String,
    caller_file: &'static str,
    base_dir: Option<PathBuf>,
    provider_patterns: Vec<String>,
    controller_patterns: Vec<String>,
    providers: Vec<ProviderEntry>,
    controllers: Vec<Unit>,
    debug: Option<bool>,
}

impl AutoModule {
    /// 声明模块，记录调用位置
    #[track_caller]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            caller_file: Location::caller().file(),
            base_dir: None,
            provider_patterns: Vec::new(),
            controller_patterns: Vec::new(),
            providers: Vec::new(),
            controllers: Vec::new(),
            debug: None,
        }
    }

    /// 显式指定扫描根目录
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// 添加提供者扫描模式
    pub fn providers<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provider_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// 添加控制器扫描模式
    pub fn controllers<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controller_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// 添加显式提供者，原样传递给宿主
    pub fn provider(mut self, entry: impl Into<ProviderEntry>) -> Self {
        self.providers.push(entry.into());
        self
    }

    /// 添加显式控制器
    pub fn controller(mut self, unit: Unit) -> Self {
        self.controllers.push(unit);
        self
    }

    /// 开关诊断模式，覆盖配置中的设置
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }

    /// 注册模块
    pub fn register(&self, driver: &RegistrationDriver) -> DiscoveryResult<Arc<RegisteredModule>> {
        driver.register(self)
    }

    /// 模块名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 声明模块的源文件
    pub fn caller_file(&self) -> &'static str {
        self.caller_file
    }

    /// 提供者扫描模式
    pub fn provider_patterns(&self) -> &[String] {
        &self.provider_patterns
    }

    /// 控制器扫描模式
    pub fn controller_patterns(&self) -> &[String] {
        &self.controller_patterns
    }

    /// 显式提供者
    pub fn explicit_providers(&self) -> &[ProviderEntry] {
        &self.providers
    }

    /// 显式控制器
    pub fn explicit_controllers(&self) -> &[Unit] {
        &self.controllers
    }

    /// 模块自身的诊断模式设置
    pub fn debug_override(&self) -> Option<bool> {
        self.debug
    }

    /// 确定扫描根目录
    pub fn resolve_base_dir(&self) -> PathBuf {
        if let Some(dir) = self.explicit_base_dir() {
            return dir.to_path_buf();
        }
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        infer_base_dir([self.caller_file], &cwd)
    }

    /// 显式指定的根目录
    pub fn explicit_base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_caller_file() {
        let module = AutoModule::new("AppModule");
        assert_eq!(module.caller_file(), file!());
        assert_eq!(module.name(), "AppModule");
    }

    #[test]
    fn test_explicit_base_dir_wins() {
        let module = AutoModule::new("AppModule").base_dir("/srv/app");
        assert_eq!(module.resolve_base_dir(), PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_internal_caller_falls_back_to_cwd() {
        // 在本 crate 内声明的模块无法推断调用位置
        let module = AutoModule::new("Internal");
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(module.resolve_base_dir(), cwd);
    }

    #[test]
    fn test_collects_patterns_and_entries() {
        let unit = Unit::new("HealthController", || ());
        let module = AutoModule::new("AppModule")
            .providers(["services/*.rs", "repositories/**/*.rs"])
            .controllers(vec!["controllers/*.rs".to_string()])
            .provider(Unit::new("Clock", || ()))
            .controller(unit.clone())
            .debug(true);

        assert_eq!(module.provider_patterns().len(), 2);
        assert_eq!(module.controller_patterns(), ["controllers/*.rs".to_string()]);
        assert_eq!(module.explicit_providers().len(), 1);
        assert_eq!(module.explicit_controllers(), [unit]);
        assert_eq!(module.debug_override(), Some(true));
    }
}
