//! # Autowire 组合层
//!
//! 在模块组合时自动发现提供者和控制器，按接口标识绑定，并交给宿主容器注册。
//!
//! ## 主要功能
//!
//! - **单元加载**: 按位置模式扫描源文件，带标记预过滤和内容缓存
//! - **绑定解析**: 每个接口标识按优先级选出唯一实现
//! - **注册驱动**: 每个模块只注册一次，可从任意调用位置声明
//! - **诊断模式**: 输出每个提供者和控制器的发现结果
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use autowire_composition::{AutoModule, RegistrationDriver};
//! use autowire_di_impl::DiContainerImpl;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = Arc::new(DiContainerImpl::new());
//!     let driver = RegistrationDriver::new(container.clone());
//!
//!     AutoModule::new("AppModule")
//!         .providers(["services/*.rs"])
//!         .controllers(["controllers/*.rs"])
//!         .register(&driver)?;
//!
//!     println!("已注册 {} 个控制器", container.controllers().len());
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod builder;
pub mod caller;
pub mod context;
pub mod diagnostics;
pub mod filter;
pub mod logging;
pub mod module_loader;
pub mod storage;
pub mod unit_loader;

// 重新导出主要类型
pub use bootstrapper::{RegisteredModule, RegistrationDriver};
pub use builder::AutoModule;
pub use caller::infer_base_dir;
pub use context::DiscoveryContext;
pub use diagnostics::{DiscoveryReport, ProviderOrigin, ProviderReport};
pub use filter::MarkerFilter;
pub use logging::init_logging;
pub use module_loader::CatalogModuleLoader;
pub use storage::FsStorage;
pub use unit_loader::{ContentCache, UnitLoader};

// 重新导出错误类型
pub use autowire_common::{DiscoveryError, DiscoveryResult};
