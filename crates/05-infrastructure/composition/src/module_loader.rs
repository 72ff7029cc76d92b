//! 单元目录模块加载器

use autowire_common::{global_unit_catalog, Export, LoadError, UnitCatalog};
use autowire_di_abstractions::ModuleLoader;
use std::path::Path;
use std::sync::Arc;

/// 从单元目录中取出源位置登记的导出项
///
/// 注解宏在进程启动时按 `file!()` 登记单元，因此只有编译进当前程序的源文件才能被加载。
#[derive(Debug, Clone)]
pub struct CatalogModuleLoader {
    catalog: Arc<UnitCatalog>,
}

impl CatalogModuleLoader {
    /// 使用全局单元目录
    pub fn new() -> Self {
        Self::with_catalog(global_unit_catalog())
    }

    /// 使用指定的单元目录
    pub fn with_catalog(catalog: Arc<UnitCatalog>) -> Self {
        Self { catalog }
    }
}

impl Default for CatalogModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLoader for CatalogModuleLoader {
    fn load_exports(&self, location: &Path, _source: &str) -> Result<Vec<Export>, LoadError> {
        let exports = self.catalog.exports_for(location);
        if exports.is_empty() {
            return Err(LoadError::module_load_failed(
                location,
                "单元目录中没有该位置登记的导出项，源文件可能未被编译进当前程序",
            ));
        }
        Ok(exports)
    }
}
