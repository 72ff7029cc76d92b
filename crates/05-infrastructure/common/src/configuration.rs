//! 发现配置
//!
//! 配置可以来自 TOML 文件，之后再由环境变量覆盖。

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 开启诊断模式的环境变量
pub const DEBUG_ENV: &str = "AUTOWIRE_DEBUG";

/// 覆盖日志级别的环境变量
pub const LOG_LEVEL_ENV: &str = "AUTOWIRE_LOG_LEVEL";

/// 默认的提供者标记
pub const DEFAULT_PROVIDER_MARKERS: &[&str] = &["#[injectable", "::injectable"];

/// 默认的控制器标记
pub const DEFAULT_CONTROLLER_MARKERS: &[&str] = &["#[controller", "::controller"];

/// 组件发现配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// 诊断模式
    pub debug: bool,
    /// 源文本中表示提供者候选的标记子串
    pub provider_markers: Vec<String>,
    /// 源文本中表示控制器候选的标记子串
    pub controller_markers: Vec<String>,
    /// 日志设置
    pub logging: LoggingSettings,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            debug: false,
            provider_markers: DEFAULT_PROVIDER_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            controller_markers: DEFAULT_CONTROLLER_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            logging: LoggingSettings::default(),
        }
    }
}

impl DiscoveryConfig {
    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// 应用环境变量覆盖
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// 使用给定的变量来源应用覆盖
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(DEBUG_ENV) {
            self.debug = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.logging.level = level.trim().to_string();
            }
        }
        self
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.provider_markers.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "provider_markers 不能为空".to_string(),
            });
        }
        if self.controller_markers.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "controller_markers 不能为空".to_string(),
            });
        }
        if self
            .provider_markers
            .iter()
            .chain(&self.controller_markers)
            .any(|m| m.is_empty())
        {
            return Err(ConfigError::ValidationError {
                message: "标记不能为空字符串".to_string(),
            });
        }
        self.logging.max_level()?;
        Ok(())
    }
}

/// 日志设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 日志级别
    pub level: String,
    /// 是否显示目标模块
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用JSON格式
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingSettings {
    /// 开发环境日志设置
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 生产环境日志设置
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 解析日志级别
    pub fn max_level(&self) -> ConfigResult<tracing::Level> {
        self.level
            .parse::<tracing::Level>()
            .map_err(|_| ConfigError::ValidationError {
                message: format!("无效的日志级别: {}", self.level),
            })
    }
}
