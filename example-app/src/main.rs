//! # 示例应用程序
//!
//! 扫描自身源码中的提供者和控制器，注册到内存容器并打印结果。

mod controllers;
mod services;

use anyhow::Context;
use autowire_common::{DiscoveryConfig, ProviderToken};
use autowire_composition::{init_logging, AutoModule, DiscoveryContext, RegistrationDriver};
use autowire_di_abstractions::ProviderEntry;
use autowire_di_impl::DiContainerImpl;
use clap::Parser;
use services::cache::RedisCache;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Autowire 组件发现示例")]
struct Args {
    /// 扫描根目录，省略时使用本文件所在目录
    #[arg(long)]
    root: Option<PathBuf>,

    /// 提供者扫描模式
    #[arg(long = "providers", default_values_t = vec!["services/*.rs".to_string()])]
    providers: Vec<String>,

    /// 控制器扫描模式
    #[arg(long = "controllers", default_values_t = vec!["controllers/**/*.rs".to_string()])]
    controllers: Vec<String>,

    /// 发现配置文件（TOML）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 开启诊断模式
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DiscoveryConfig::from_toml_file(path)
            .with_context(|| format!("加载配置文件失败: {}", path.display()))?,
        None => DiscoveryConfig::default(),
    }
    .with_env_overrides();
    if args.debug {
        config.debug = true;
    }

    init_logging(&config.logging)?;
    info!("启动 Autowire 示例应用");

    let container = Arc::new(DiContainerImpl::new());
    let driver = RegistrationDriver::new(container.clone()).with_config(config);
    let context = DiscoveryContext::global();

    let mut module = AutoModule::new("AppModule")
        .providers(args.providers.iter().cloned())
        .controllers(args.controllers.iter().cloned())
        .provider(ProviderEntry::value(
            context.interface("AppName")?,
            "autowire-demo",
        ));
    if let Some(root) = args.root {
        module = module.base_dir(root);
    }

    let registered = module.register(&driver)?;
    if let Some(report) = &registered.report {
        println!("{report}");
    }

    println!("提供者:");
    for token in registered.descriptor.provider_tokens() {
        println!("  {token}");
    }
    println!("控制器:");
    for name in registered.descriptor.controller_names() {
        println!("  {name}");
    }

    let cache: ProviderToken = context.interface(services::CACHE)?.into();
    if container.is_registered(&cache) {
        let redis = container.instantiate_as::<RedisCache>(&cache)?;
        let backend: &dyn services::Cache = redis.as_ref();
        println!("Cache -> {} ({})", backend.backend(), redis.url());
    }

    // 重复声明同名模块不会再次扫描
    let again = AutoModule::new("AppModule").register(&driver)?;
    info!(
        "再次注册 AppModule: {} 个提供者",
        again.descriptor.providers.len()
    );

    Ok(())
}
