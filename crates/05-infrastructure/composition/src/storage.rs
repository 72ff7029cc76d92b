//! 文件系统源存储

use autowire_di_abstractions::{DirEntryInfo, SourceStorage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 基于本地文件系统的源存储
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    /// 创建文件系统存储
    pub fn new() -> Self {
        Self
    }
}

impl SourceStorage for FsStorage {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let info = if entry.file_type()?.is_dir() {
                DirEntryInfo::dir(entry.path())
            } else {
                DirEntryInfo::file(entry.path())
            };
            entries.push(info);
        }
        Ok(entries)
    }

    fn expand_recursive(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let paths = glob::glob(pattern)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

        let mut files = Vec::new();
        for path in paths {
            match path {
                Ok(path) if !path.is_dir() => files.push(path),
                Ok(_) => {}
                Err(e) => debug!("递归展开时跳过不可读路径: {}", e),
            }
        }
        Ok(files)
    }

    fn read_source(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}
