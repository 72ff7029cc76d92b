//! 模块注册驱动
//!
//! 在模块组合时协调扫描、绑定解析和宿主注册。每个模块名称在同一个
//! 发现上下文中只注册一次，之后的调用直接返回第一次的结果。

use crate::builder::AutoModule;
use crate::context::DiscoveryContext;
use crate::diagnostics::DiscoveryReport;
use crate::filter::MarkerFilter;
use crate::module_loader::CatalogModuleLoader;
use crate::storage::FsStorage;
use crate::unit_loader::UnitLoader;
use autowire_common::{DiscoveryConfig, DiscoveryError, DiscoveryResult, Unit};
use autowire_di_abstractions::{
    CandidateFilter, HostContainer, ModuleDescriptor, ModuleLoader, ProviderEntry, SourceStorage,
};
use autowire_di_impl::BindingResolver;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// 已注册的模块
#[derive(Debug, Clone)]
pub struct RegisteredModule {
    /// 交给宿主的注册描述符
    pub descriptor: ModuleDescriptor,
    /// 诊断报告，只在诊断模式下生成
    pub report: Option<DiscoveryReport>,
}

/// 模块注册驱动
pub struct RegistrationDriver {
    context: Arc<DiscoveryContext>,
    host: Arc<dyn HostContainer>,
    config: DiscoveryConfig,
    storage: Arc<dyn SourceStorage>,
    module_loader: Arc<dyn ModuleLoader>,
    filter: Arc<dyn CandidateFilter>,
}

impl RegistrationDriver {
    /// 使用默认上下文和默认配置创建驱动
    pub fn new(host: Arc<dyn HostContainer>) -> Self {
        Self::with_context(DiscoveryContext::global(), host)
    }

    /// 使用指定的发现上下文创建驱动
    pub fn with_context(context: Arc<DiscoveryContext>, host: Arc<dyn HostContainer>) -> Self {
        let config = DiscoveryConfig::default();
        Self {
            context,
            host,
            filter: Arc::new(MarkerFilter::from_config(&config)),
            config,
            storage: Arc::new(FsStorage::new()),
            module_loader: Arc::new(CatalogModuleLoader::new()),
        }
    }

    /// 应用发现配置，预过滤标记随之更新
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.filter = Arc::new(MarkerFilter::from_config(&config));
        self.config = config;
        self
    }

    /// 替换源存储
    pub fn with_storage(mut self, storage: Arc<dyn SourceStorage>) -> Self {
        self.storage = storage;
        self
    }

    /// 替换模块加载器
    pub fn with_module_loader(mut self, module_loader: Arc<dyn ModuleLoader>) -> Self {
        self.module_loader = module_loader;
        self
    }

    /// 替换预过滤器
    pub fn with_filter(mut self, filter: Arc<dyn CandidateFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// 发现上下文
    pub fn context(&self) -> &Arc<DiscoveryContext> {
        &self.context
    }

    /// 当前配置
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// 注册模块
    ///
    /// 提供者冲突会在宿主被调用前中止注册。失败的注册不会被备忘，可以重试。
    /// 其他线程同时注册同名模块时会等待第一次注册完成；宿主在注册过程中
    /// 于同一线程再次注册同名模块会得到 [`DiscoveryError::RegistrationFailed`]。
    pub fn register(&self, module: &AutoModule) -> DiscoveryResult<Arc<RegisteredModule>> {
        let slot = self.context.module_slot(module.name());
        if let Some(registered) = slot.get() {
            debug!("模块 {} 已注册，跳过扫描", module.name());
            return Ok(Arc::clone(registered));
        }

        if self.context.is_registering_here(module.name()) {
            error!("模块 {} 在注册过程中被重复注册", module.name());
            return Err(DiscoveryError::RegistrationFailed {
                module: module.name().to_string(),
                message: "注册过程中重入注册同一模块".to_string(),
            });
        }

        let registered = slot.get_or_try_init(|| {
            let _guard = self.context.begin_registration(module.name());
            self.discover_and_register(module)
        })?;
        Ok(Arc::clone(registered))
    }

    fn unit_loader(&self) -> UnitLoader<'_> {
        UnitLoader::new(
            &self.context,
            self.storage.as_ref(),
            self.module_loader.as_ref(),
            self.filter.as_ref(),
        )
    }

    fn discover_and_register(&self, module: &AutoModule) -> DiscoveryResult<Arc<RegisteredModule>> {
        let started = Instant::now();
        let base_dir = module.resolve_base_dir();
        info!("开始自动发现模块: {} (根目录: {})", module.name(), base_dir.display());

        let loader = self.unit_loader();
        let resolver = BindingResolver::new(self.context.tagger());

        let provider_units = loader.load(module.provider_patterns(), &base_dir);
        let bindings = resolver.resolve(&provider_units).map_err(|e| {
            error!("模块 {} 提供者解析失败: {}", module.name(), e);
            e
        })?;

        let controller_units = loader.load(module.controller_patterns(), &base_dir);
        let discovered_controllers = resolver.filter_controllers(&controller_units);

        let mut descriptor = ModuleDescriptor::new(module.name());
        descriptor.providers = module.explicit_providers().to_vec();
        descriptor
            .providers
            .extend(bindings.iter().cloned().map(ProviderEntry::from));
        descriptor.controllers = merge_controllers(module.explicit_controllers(), discovered_controllers);

        let report = module
            .debug_override()
            .unwrap_or(self.config.debug)
            .then(|| {
                DiscoveryReport::new(
                    &descriptor,
                    module.explicit_providers(),
                    &bindings,
                    base_dir.clone(),
                    started.elapsed(),
                    provider_units.len() + controller_units.len(),
                )
            });
        if let Some(report) = &report {
            report.emit();
        }

        self.host.register_module(&descriptor).map_err(|e| {
            error!("宿主注册模块 {} 失败: {}", module.name(), e);
            DiscoveryError::from(e)
        })?;

        info!(
            "模块 {} 注册完成: {} 个提供者, {} 个控制器",
            module.name(),
            descriptor.providers.len(),
            descriptor.controllers.len()
        );
        Ok(Arc::new(RegisteredModule { descriptor, report }))
    }
}

/// 显式控制器在前，已显式声明的发现结果不重复添加
fn merge_controllers(explicit: &[Unit], discovered: Vec<Unit>) -> Vec<Unit> {
    let mut controllers = explicit.to_vec();
    for unit in discovered {
        if !controllers.contains(&unit) {
            controllers.push(unit);
        }
    }
    controllers
}
