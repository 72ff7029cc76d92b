//! # Autowire DI 实现
//!
//! 提供接口标识注册表、能力标记表、绑定解析器和内存宿主容器。

pub mod container;
pub mod identity_registry;
pub mod resolver;
pub mod tagger;

pub use container::DiContainerImpl;
pub use identity_registry::IdentityRegistry;
pub use resolver::BindingResolver;
pub use tagger::{CapabilityTagger, UnitTags, DEFAULT_PRIORITY};
