//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 组件发现与绑定错误类型
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("接口标识名称不能为空")]
    EmptyIdentityName,

    #[error("提供者冲突: {token} 存在多个最高优先级 ({priority}) 的实现: {candidates:?}")]
    Conflict {
        token: String,
        priority: i32,
        candidates: Vec<String>,
    },

    #[error("模块注册失败: {module}, 原因: {message}")]
    RegistrationFailed { module: String, message: String },

    #[error("日志初始化失败: {message}")]
    LoggingInit { message: String },

    #[error("宿主容器错误: {source}")]
    Dependency {
        #[from]
        source: DependencyError,
    },

    #[error("发现配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

impl DiscoveryError {
    /// 是否为提供者冲突错误
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// 单个源位置的加载错误
///
/// 由加载协作者产生，发现流程会在本地吞掉它并跳过该位置。
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("源文件读取失败: {path}, 原因: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("源模块加载失败: {path}, 原因: {message}")]
    ModuleLoadFailed { path: PathBuf, message: String },
}

impl LoadError {
    /// 创建模块加载错误
    pub fn module_load_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ModuleLoadFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// 宿主容器错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("提供者未注册: {token}")]
    ProviderNotRegistered { token: String },

    #[error("提供者实例化失败: {token}, 原因: {message}")]
    ProviderCreationFailed { token: String, message: String },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}, 原因: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: toml::de::Error,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 结果类型别名
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
