//! # Autowire DI Abstractions
//!
//! 组件发现与宿主容器之间的抽象层。
//!
//! ## 核心接口
//!
//! - [`HostContainer`] - 宿主容器的模块注册接口
//! - [`SourceStorage`] - 源存储接口
//! - [`ModuleLoader`] - 源模块加载接口
//! - [`CandidateFilter`] - 源文本预过滤接口

pub mod container;
pub mod scanner;

pub use container::*;
pub use scanner::*;
