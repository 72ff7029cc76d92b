//! 源位置扫描协作者接口
//!
//! 单元加载器通过这些接口访问文件系统、加载源模块和预过滤源文本，
//! 测试中可以替换为计数或内存实现。

use autowire_common::{Export, LoadError};
use std::io;
use std::path::{Path, PathBuf};

/// 递归通配符
pub const RECURSIVE_WILDCARD: &str = "**";

/// 扫描策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// 只列出一层目录，按文件名过滤
    Direct,
    /// 在根目录下递归展开
    Recursive,
}

impl ScanStrategy {
    /// 根据模式选择策略
    pub fn for_pattern(pattern: &str) -> Self {
        if pattern.contains(RECURSIVE_WILDCARD) {
            Self::Recursive
        } else {
            Self::Direct
        }
    }
}

/// 目录项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// 完整路径
    pub path: PathBuf,
    /// 是否为目录
    pub is_dir: bool,
}

impl DirEntryInfo {
    /// 文件条目
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    /// 目录条目
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// 源存储
pub trait SourceStorage: Send + Sync {
    /// 列出一层目录
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// 递归展开通配模式，只返回文件
    ///
    /// 模式中需要按字面量匹配的部分已由调用方转义。
    fn expand_recursive(&self, pattern: &str) -> io::Result<Vec<PathBuf>>;

    /// 读取源文本
    fn read_source(&self, path: &Path) -> io::Result<String>;
}

/// 源模块加载器
pub trait ModuleLoader: Send + Sync {
    /// 加载源位置，返回其全部导出项
    fn load_exports(&self, location: &Path, source: &str) -> Result<Vec<Export>, LoadError>;
}

/// 源文本预过滤器
pub trait CandidateFilter: Send + Sync {
    /// 是否值得加载此源位置
    fn should_load(&self, location: &Path, source: &str) -> bool;
}

impl<F> CandidateFilter for F
where
    F: Fn(&Path, &str) -> bool + Send + Sync,
{
    fn should_load(&self, location: &Path, source: &str) -> bool {
        self(location, source)
    }
}
