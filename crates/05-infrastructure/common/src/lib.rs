//! # Autowire Common
//!
//! 组件自动发现与接口绑定的公共类型。
//!
//! ## 核心类型
//!
//! - [`Identity`] - 抽象接口标识
//! - [`Unit`] - 可构造单元
//! - [`Export`] - 源位置的导出项
//! - [`UnitCatalog`] - 注解宏登记的单元目录
//! - [`DiscoveryConfig`] - 发现配置

pub mod catalog;
pub mod configuration;
pub mod errors;
pub mod identity;
pub mod metadata;
pub mod unit;

pub use catalog::*;
pub use configuration::*;
pub use errors::*;
pub use identity::*;
pub use metadata::*;
pub use unit::*;
