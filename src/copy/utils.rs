//! Helpers shared by the file, directory and dispatch paths.

use filetime::{FileTime, set_file_times};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

// =============================================================================
// Metadata and timestamp utilities
// =============================================================================

/// Copy mtime and atime from the source metadata onto `dst`.
pub(crate) fn preserve_timestamps(src_meta: &Metadata, dst: &Path) -> io::Result<()> {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    set_file_times(dst, atime, mtime)
}

/// Sum of regular file sizes below `path`, without following symlinks.
///
/// Unreadable entries count as zero; the total only drives progress display.
pub(crate) fn scan_total_size(path: &Path) -> u64 {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return 0;
    };
    if meta.is_file() {
        return meta.len();
    }
    if !meta.is_dir() {
        return 0;
    }

    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| scan_total_size(&e.path()))
        .sum()
}

// =============================================================================
// Removal
// =============================================================================

/// Remove whatever is at `path`: a whole tree for a directory, the link
/// itself for a symlink.
///
/// A missing path is not an error.
pub(crate) fn remove_path(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Clean up after a failed background copy.
///
/// A file placeholder is always removed. A directory placeholder is only
/// removed while empty, so partial output from a failed tree copy stays.
pub(crate) fn remove_placeholder(path: &Path, is_directory: bool) {
    let result = if is_directory {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    if let Err(e) = result {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!("leaving {} in place: {}", path.display(), e);
        }
    }
}
