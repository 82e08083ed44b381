//! Path utilities shared by the clipboard and the copy engine.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` against the process working directory if it is relative.
pub(crate) fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(absolutize_from(path, &std::env::current_dir()?))
    }
}

/// Resolve `path` against `base` if it is relative.
pub(crate) fn absolutize_from(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Drop `.` components and empty segments without touching the filesystem.
///
/// `..` is kept as is: resolving it lexically would be wrong across symlinks.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Whether `path` is `ancestor` or lies somewhere below it.
///
/// Both sides are canonicalized when they exist so symlinked spellings of the
/// same directory compare equal.
pub(crate) fn is_same_or_descendant(path: &Path, ancestor: &Path) -> bool {
    let path = path.canonicalize().unwrap_or_else(|_| normalize(path));
    let ancestor = ancestor
        .canonicalize()
        .unwrap_or_else(|_| normalize(ancestor));
    path.starts_with(&ancestor)
}
