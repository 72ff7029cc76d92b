//! 调用位置推断
//!
//! 没有显式根目录时，使用声明模块的源文件所在目录作为扫描根目录。
//! 只能尽力推断，源文件在运行时不可见时退回到进程工作目录。

use std::path::{Path, PathBuf};
use tracing::debug;

/// 依赖库源码路径的特征片段
const DEPENDENCY_MARKERS: &[&str] = &["/.cargo/registry/", "/.cargo/git/", "/rustc/"];

/// 本 crate 的 `src` 目录
fn internal_dir() -> String {
    let own = file!().replace('\\', "/");
    match own.rfind("/src/") {
        Some(index) => own[..index + "/src/".len()].to_string(),
        None => own,
    }
}

/// 是否为本 crate 内部的调用位置
pub fn is_internal_frame(file: &str) -> bool {
    let normalized = file.replace('\\', "/");
    let internal = internal_dir();
    normalized.starts_with(&internal) || normalized.contains(&format!("/{internal}"))
}

/// 是否位于依赖库中
pub fn is_dependency_frame(file: &str) -> bool {
    let normalized = file.replace('\\', "/");
    normalized.starts_with("/rustc/")
        || DEPENDENCY_MARKERS
            .iter()
            .any(|marker| normalized.contains(marker))
}

/// 推断扫描根目录
///
/// 依次检查调用链上的源文件，跳过内部和依赖库的位置。相对路径会依次尝试
/// 工作目录及其上级目录，找到存在的文件后取其所在目录。
pub fn infer_base_dir<'a, I>(frames: I, cwd: &Path) -> PathBuf
where
    I: IntoIterator<Item = &'a str>,
{
    for frame in frames {
        if is_internal_frame(frame) || is_dependency_frame(frame) {
            continue;
        }
        if let Some(dir) = locate_frame_dir(Path::new(frame), cwd) {
            debug!("推断扫描根目录: {}", dir.display());
            return dir;
        }
    }

    debug!("无法推断调用位置，使用工作目录: {}", cwd.display());
    cwd.to_path_buf()
}

fn locate_frame_dir(file: &Path, cwd: &Path) -> Option<PathBuf> {
    let found = if file.is_absolute() {
        file.is_file().then(|| file.to_path_buf())
    } else {
        cwd.ancestors()
            .map(|ancestor| ancestor.join(file))
            .find(|candidate| candidate.is_file())
    }?;
    found.parent().map(Path::to_path_buf)
}
