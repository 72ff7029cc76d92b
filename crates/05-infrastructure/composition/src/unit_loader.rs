//! 单元加载器
//!
//! 把位置模式解析为源文件，经过内容缓存和标记预过滤后加载导出项，
//! 并将导出项上声明的注解写入能力标记表。

use crate::context::DiscoveryContext;
use autowire_common::{Export, Identity, LoadError, Unit, UnitAnnotations, UnitId};
use autowire_di_abstractions::{CandidateFilter, ModuleLoader, ScanStrategy, SourceStorage};
use autowire_di_impl::DEFAULT_PRIORITY;
use dashmap::DashMap;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 源文本缓存
///
/// 按路径缓存，进程内不失效。
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: DashMap<PathBuf, Arc<str>>,
}

impl ContentCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取源文本，已缓存时不访问存储
    pub fn get_or_read(&self, path: &Path, storage: &dyn SourceStorage) -> io::Result<Arc<str>> {
        if let Some(cached) = self.entries.get(path) {
            return Ok(Arc::clone(cached.value()));
        }

        let text: Arc<str> = Arc::from(storage.read_source(path)?);
        let cached = self
            .entries
            .entry(path.to_path_buf())
            .or_insert(text)
            .clone();
        Ok(cached)
    }

    /// 是否已缓存
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// 缓存条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 单元加载器
pub struct UnitLoader<'a> {
    context: &'a DiscoveryContext,
    storage: &'a dyn SourceStorage,
    module_loader: &'a dyn ModuleLoader,
    filter: &'a dyn CandidateFilter,
}

impl<'a> UnitLoader<'a> {
    /// 创建加载器
    pub fn new(
        context: &'a DiscoveryContext,
        storage: &'a dyn SourceStorage,
        module_loader: &'a dyn ModuleLoader,
        filter: &'a dyn CandidateFilter,
    ) -> Self {
        Self {
            context,
            storage,
            module_loader,
            filter,
        }
    }

    /// 加载模式可达的全部可构造单元
    ///
    /// 相对模式基于 `base_dir` 解析。按模式顺序处理，同名单元只保留第一次出现。
    pub fn load<S: AsRef<str>>(&self, patterns: &[S], base_dir: &Path) -> Vec<Unit> {
        let mut units = Vec::new();
        let mut seen: HashSet<UnitId> = HashSet::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let locations = self.expand(pattern, base_dir);
            trace!("模式 {} 匹配到 {} 个源位置", pattern, locations.len());

            for location in locations {
                match self.load_location(&location) {
                    Ok(found) => {
                        for unit in found {
                            if seen.insert(unit.id().clone()) {
                                units.push(unit);
                            }
                        }
                    }
                    Err(e) => debug!("跳过源位置 {}: {}", location.display(), e),
                }
            }
        }

        units
    }

    /// 把模式展开为源位置
    ///
    /// 根目录按字面量处理，其中的 `[`、`*` 等字符不会被当作通配符。
    pub fn expand(&self, pattern: &str, base_dir: &Path) -> Vec<PathBuf> {
        match ScanStrategy::for_pattern(pattern) {
            ScanStrategy::Direct => {
                let resolved = resolve_pattern(pattern, base_dir);
                match self.expand_direct(&resolved) {
                    Ok(locations) => locations,
                    Err(e) => {
                        debug!(
                            "列出目录失败，改用递归展开: {} ({})",
                            resolved.display(),
                            e
                        );
                        self.expand_recursive(&glob_pattern(pattern, base_dir))
                    }
                }
            }
            ScanStrategy::Recursive => self.expand_recursive(&glob_pattern(pattern, base_dir)),
        }
    }

    fn expand_direct(&self, resolved: &Path) -> io::Result<Vec<PathBuf>> {
        let file_pattern = resolved
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "模式缺少文件名部分")
            })?;
        let dir = resolved.parent().unwrap_or_else(|| Path::new("."));

        let matcher = if is_wildcard(file_pattern) {
            Some(
                glob::Pattern::new(file_pattern)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?,
            )
        } else {
            None
        };

        let mut locations: Vec<PathBuf> = self
            .storage
            .list_dir(dir)?
            .into_iter()
            .filter(|entry| !entry.is_dir)
            .filter(|entry| {
                let name = entry
                    .path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default();
                match &matcher {
                    Some(matcher) => matcher.matches(name),
                    None => name == file_pattern,
                }
            })
            .map(|entry| entry.path)
            .collect();
        locations.sort();
        Ok(locations)
    }

    fn expand_recursive(&self, pattern: &str) -> Vec<PathBuf> {
        match self.storage.expand_recursive(pattern) {
            Ok(locations) => locations,
            Err(e) => {
                debug!("递归展开失败: {} ({})", pattern, e);
                Vec::new()
            }
        }
    }

    /// 加载单个源位置的可构造单元
    ///
    /// 未通过预过滤的位置不会被加载，返回空列表。
    pub fn load_location(&self, location: &Path) -> Result<Vec<Unit>, LoadError> {
        let source = self
            .context
            .cache()
            .get_or_read(location, self.storage)
            .map_err(|e| LoadError::ReadFailed {
                path: location.to_path_buf(),
                source: e,
            })?;

        if !self.filter.should_load(location, &source) {
            trace!("源位置不含候选标记: {}", location.display());
            return Ok(Vec::new());
        }

        // 同一单元可能同时带有提供者和控制器注解，各自登记为一个导出项
        let mut declared: Vec<(Unit, UnitAnnotations)> = Vec::new();
        for export in self.module_loader.load_exports(location, &source)? {
            match export {
                Export::Unit { unit, annotations } => {
                    match declared.iter_mut().find(|(known, _)| *known == unit) {
                        Some((_, existing)) => {
                            *existing = std::mem::take(existing).merge(annotations);
                        }
                        None => declared.push((unit, annotations)),
                    }
                }
                Export::Value { name } => trace!("忽略非构造导出项: {}", name),
            }
        }

        Ok(declared
            .into_iter()
            .filter(|(unit, annotations)| self.apply_annotations(unit, annotations))
            .map(|(unit, _)| unit)
            .collect())
    }

    /// 把注解写入能力标记表，声明的接口名称无效时返回 false
    fn apply_annotations(&self, unit: &Unit, annotations: &UnitAnnotations) -> bool {
        let tagger = self.context.tagger();

        if let Some(provider) = &annotations.provider {
            let identity: Option<Identity> = match provider.provide.as_deref() {
                Some(name) => match self.context.identities().get_or_create(name) {
                    Ok(identity) => Some(identity),
                    Err(e) => {
                        warn!("单元 {} 的接口声明无效，已跳过: {}", unit.name(), e);
                        return false;
                    }
                },
                None => None,
            };

            tagger.mark_provider_candidate(unit);
            tagger.set_associated_identity(unit, identity);
            tagger.set_priority(unit, provider.priority.unwrap_or(DEFAULT_PRIORITY));
        }

        if annotations.controller {
            tagger.mark_controller_candidate(unit);
        }
        true
    }
}

/// 相对模式基于根目录解析
fn resolve_pattern(pattern: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(pattern);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// 递归展开使用的通配模式，根目录部分转义为字面量
fn glob_pattern(pattern: &str, base_dir: &Path) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }
    let base = glob::Pattern::escape(&base_dir.to_string_lossy());
    let base = base.trim_end_matches(['/', '\\']);
    if base.is_empty() && !base_dir.has_root() {
        return pattern.to_string();
    }
    format!("{}/{}", base, pattern)
}

fn is_wildcard(name: &str) -> bool {
    name.contains(['*', '?', '['])
}
