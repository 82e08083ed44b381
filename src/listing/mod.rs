//! Directory enumeration and entry metadata.
//!
//! Listings stat every entry with `lstat` semantics, so symlinks are reported
//! as symlinks and never followed. Entries are stat'ed in parallel; the
//! result keeps the order the OS enumerated them in, with the `..` entry
//! moved to the front.

mod disk;
mod entry;
mod format;

pub use disk::{DiskSpace, free_disk_space};
pub use entry::{CopyStatus, FileEntry, FileKind, Language};
pub use format::{format_mtime, format_size};

use crate::error::{Error, Result};
use rayon::prelude::*;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the parent-directory pseudo-entry.
pub const PARENT_ENTRY: &str = "..";

/// List up to `limit` entries of `path`.
///
/// The `..` entry always comes first and counts toward `limit`; `.` is never
/// listed. Entries that cannot be stat'ed are left out.
///
/// # Errors
///
/// Returns [`Error::Enumeration`] if the directory cannot be opened.
pub fn list_directory(path: &Path, limit: usize) -> Result<Vec<FileEntry>> {
    let read_dir = fs::read_dir(path).map_err(|source| Error::Enumeration {
        path: path.to_path_buf(),
        source,
    })?;

    let mut names: Vec<OsString> = vec![OsString::from(PARENT_ENTRY)];
    for entry in read_dir.take(limit.saturating_sub(1)) {
        match entry {
            Ok(entry) => names.push(entry.file_name()),
            Err(e) => tracing::debug!("skipping unreadable entry in {}: {}", path.display(), e),
        }
    }

    let entries: Vec<FileEntry> = names
        .par_iter()
        .filter_map(|name| {
            let full = path.join(name);
            match fs::symlink_metadata(&full) {
                Ok(meta) => Some(FileEntry::from_metadata(name, &meta)),
                Err(e) => {
                    tracing::debug!("skipping {}: {}", full.display(), e);
                    None
                }
            }
        })
        .collect();

    tracing::debug!("listed {} entries in {}", entries.len(), path.display());
    Ok(entries)
}

/// Inspect a single path without following a final symlink.
///
/// # Errors
///
/// Returns [`Error::Stat`] if the path cannot be inspected.
pub fn stat_path(path: &Path) -> Result<FileEntry> {
    let meta = fs::symlink_metadata(path).map_err(|source| Error::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path.file_name().unwrap_or(path.as_os_str());
    Ok(FileEntry::from_metadata(name, &meta))
}

/// The process working directory.
pub fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Change the process working directory and return the new absolute path.
///
/// # Errors
///
/// Returns [`Error::Stat`] if the directory cannot be entered.
pub fn change_directory(path: &Path) -> Result<PathBuf> {
    std::env::set_current_dir(path).map_err(|source| Error::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    current_dir()
}
