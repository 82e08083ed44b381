//! Paste dispatch: pick a name, then copy inline or hand off to a worker.

use crate::clipboard::ClipboardEntry;
use crate::error::{ClipboardRejection, Error, Result};
use crate::naming::unique_name;
use crate::options::CopyOptions;
use crate::tasks::{CopyTask, TaskId, TaskRegistry, TaskShared, TaskState};
use crate::utils::path::{absolutize, is_same_or_descendant};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use super::dir::copy_dir_sync;
use super::file::copy_file_sync;
use super::utils::{remove_placeholder, scan_total_size};

/// What a paste turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The copy ran inline and is done.
    Completed {
        /// Final destination path
        dest: PathBuf,
        /// Bytes written
        bytes: u64,
    },
    /// The copy continues on a worker thread.
    ///
    /// The destination placeholder already exists when this is returned.
    Background {
        /// Registry handle of the task
        task: TaskId,
        /// Final destination path
        dest: PathBuf,
    },
}

impl PasteOutcome {
    pub fn dest(&self) -> &Path {
        match self {
            Self::Completed { dest, .. } | Self::Background { dest, .. } => dest,
        }
    }
}

/// Whether a copy of `path` should leave the caller's thread.
///
/// Directories always qualify; regular files qualify when strictly larger
/// than `threshold`. Symlinks are followed. Anything that cannot be
/// inspected stays inline so the copy reports the error itself.
pub fn should_run_in_background(path: &Path, threshold: u64) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_dir() || meta.len() > threshold,
        Err(_) => false,
    }
}

/// Paste `entry` into `dest_dir`.
///
/// The destination name comes from [`unique_name`]. Background work gets
/// its placeholder (empty file or empty directory) before this returns, so
/// a second paste of the same source picks the next free name.
///
/// # Errors
///
/// - [`Error::DestinationInsideSource`] for a directory pasted into its own
///   subtree.
/// - [`Error::Copy`] if an inline copy or the placeholder creation fails.
/// - [`Error::Spawn`] if no worker thread could be started. The placeholder
///   is removed again.
pub fn dispatch(
    entry: &ClipboardEntry,
    dest_dir: &Path,
    options: &CopyOptions,
    registry: &TaskRegistry,
) -> Result<PasteOutcome> {
    let dest_dir = absolutize(dest_dir)?;

    if entry.is_directory && is_same_or_descendant(&dest_dir, &entry.path) {
        return Err(Error::DestinationInsideSource {
            src: entry.path.clone(),
            dst: dest_dir,
        });
    }

    let base = entry.file_name().ok_or_else(|| Error::Clipboard {
        path: entry.path.clone(),
        reason: ClipboardRejection::NoFileName,
    })?;
    let dest_name = unique_name(&dest_dir, base);
    let dest = dest_dir.join(&dest_name);

    if !should_run_in_background(&entry.path, options.background_threshold) {
        let bytes = if entry.is_directory {
            copy_dir_sync(&entry.path, &dest, options)?.bytes_copied
        } else {
            copy_file_sync(&entry.path, &dest, options)?
        };
        tracing::info!("pasted {} -> {}", entry.path.display(), dest.display());
        return Ok(PasteOutcome::Completed { dest, bytes });
    }

    let is_directory = entry.is_directory;
    create_placeholder(&entry.path, &dest, is_directory)?;

    let mut task = CopyTask::new(entry.path.clone(), dest_dir, dest_name, is_directory);
    let id = task.id();
    let shared = task.shared();
    let worker_options = options.for_task(shared.cancel_token(), shared.progress());
    let source = entry.path.clone();
    let worker_dest = dest.clone();

    let handle = thread::Builder::new()
        .name(format!("copy-{id}"))
        .spawn(move || run_task(&source, &worker_dest, is_directory, &worker_options, &shared));
    let handle = match handle {
        Ok(handle) => handle,
        Err(e) => {
            remove_placeholder(&dest, is_directory);
            return Err(Error::Spawn(e));
        }
    };
    task.attach(handle);
    registry.insert(task);

    tracing::info!(
        "started background copy {} {} -> {}",
        id,
        entry.path.display(),
        dest.display()
    );
    Ok(PasteOutcome::Background { task: id, dest })
}

fn create_placeholder(src: &Path, dest: &Path, is_directory: bool) -> Result<()> {
    let result = if is_directory {
        fs::create_dir(dest)
    } else {
        File::create(dest).map(drop)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(Error::copy(src, dest, e)),
    }
}

/// Body of a background worker.
fn run_task(src: &Path, dest: &Path, is_directory: bool, options: &CopyOptions, shared: &Arc<TaskShared>) {
    let progress = shared.progress();
    let result = if is_directory {
        progress.set_total(scan_total_size(src));
        copy_dir_sync(src, dest, options).map(|stats| stats.bytes_copied)
    } else {
        progress.set_total(fs::metadata(src).map(|m| m.len()).unwrap_or(0));
        copy_file_sync(src, dest, options)
    };

    match result {
        Ok(bytes) => {
            progress.finish();
            shared.set_state(TaskState::Completed);
            tracing::debug!("background copy to {} finished ({} bytes)", dest.display(), bytes);
        }
        Err(Error::Cancelled { bytes_copied }) => {
            // The canceller owns cleanup of the destination.
            shared.set_state(TaskState::Cancelled);
            tracing::debug!("background copy to {} stopped after {} bytes", dest.display(), bytes_copied);
        }
        Err(e) => {
            tracing::warn!("background copy to {} failed: {}", dest.display(), e);
            remove_placeholder(dest, is_directory);
            shared.fail(e.to_string());
        }
    }
}
