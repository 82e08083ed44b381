//! Single-slot clipboard.
//!
//! The clipboard holds at most one pending copy source. Every check runs
//! before the slot's lock is taken, so a rejected [`Clipboard::set`] never
//! disturbs what was there before.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{ClipboardRejection, Error, Result};
use crate::utils::path::absolutize;

/// The pending copy source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    /// Absolute source path
    pub path: PathBuf,
    /// Whether the source was a directory when it was copied
    pub is_directory: bool,
}

impl ClipboardEntry {
    /// Final path component, used as the desired paste name.
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

/// Mutex-guarded clipboard slot.
#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Mutex<Option<ClipboardEntry>>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `path` on the clipboard, replacing whatever was there.
    ///
    /// Relative paths are resolved against the working directory. Symlinks
    /// are followed to decide whether the source is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Clipboard`] if the path names `..`, has no file name,
    /// or cannot be inspected.
    pub fn set(&self, path: &Path) -> Result<ClipboardEntry> {
        let reject = |reason| Error::Clipboard {
            path: path.to_path_buf(),
            reason,
        };

        match path.components().next_back() {
            Some(Component::ParentDir) => return Err(reject(ClipboardRejection::ParentEntry)),
            None => return Err(reject(ClipboardRejection::NoFileName)),
            _ => {}
        }

        let abs = absolutize(path).map_err(|_| reject(ClipboardRejection::NoWorkingDirectory))?;
        if abs.file_name().is_none() {
            return Err(reject(ClipboardRejection::NoFileName));
        }

        let meta = fs::metadata(&abs).map_err(|e| {
            tracing::debug!("clipboard rejected {}: {}", abs.display(), e);
            reject(ClipboardRejection::Unreachable)
        })?;

        let entry = ClipboardEntry {
            path: abs,
            is_directory: meta.is_dir(),
        };

        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(entry.clone());
        tracing::debug!("clipboard set to {}", entry.path.display());
        Ok(entry)
    }

    /// Snapshot of the slot.
    pub fn get(&self) -> Option<ClipboardEntry> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Empty the slot.
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
