//! 单元目录
//!
//! 注解宏在进程启动时把单元登记到全局目录，并记录定义所在的源文件。
//! 加载某个源位置即从目录中取出该文件登记的全部导出项。

use crate::metadata::Export;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

/// 目录条目
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// 定义所在源文件（`file!()` 的值）
    pub source_file: String,
    /// 导出项
    pub export: Export,
}

impl CatalogEntry {
    /// 条目是否属于指定的源位置
    ///
    /// `file!()` 给出的是相对于包根目录的路径，因此按路径后缀匹配。
    pub fn defined_in(&self, location: &Path) -> bool {
        let recorded = Path::new(&self.source_file);
        !self.source_file.is_empty() && location.ends_with(recorded)
    }
}

/// 单元目录
#[derive(Debug, Default)]
pub struct UnitCatalog {
    entries: RwLock<Vec<CatalogEntry>>,
}

impl UnitCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个导出项
    pub fn register(&self, source_file: &str, export: Export) {
        tracing::trace!("登记导出项: {} ({})", export.name(), source_file);
        self.entries.write().push(CatalogEntry {
            source_file: source_file.replace('\\', "/"),
            export,
        });
    }

    /// 获取某个源位置登记的全部导出项，保持登记顺序
    pub fn exports_for(&self, location: &Path) -> Vec<Export> {
        self.entries
            .read()
            .iter()
            .filter(|entry| entry.defined_in(location))
            .map(|entry| entry.export.clone())
            .collect()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// 全部条目的快照
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.read().clone()
    }
}

/// 全局单元目录
static GLOBAL_UNIT_CATALOG: Lazy<Arc<UnitCatalog>> = Lazy::new(|| Arc::new(UnitCatalog::new()));

/// 获取全局单元目录
pub fn global_unit_catalog() -> Arc<UnitCatalog> {
    Arc::clone(&GLOBAL_UNIT_CATALOG)
}
