//! Recursive directory copy.
//!
//! The walk is depth-first and strictly sequential: background tasks already
//! run one per thread, and a single ordered walk keeps cancellation and
//! progress simple to reason about.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use std::time::{Duration, Instant};

use super::file::copy_file_sync;

/// Mode for newly created directories, before umask.
const NEW_DIR_MODE: u32 = 0o755;

/// Statistics from a directory copy.
///
/// # Example
///
/// ```no_run
/// use filepane::{copy_dir_sync, CopyOptions};
/// use std::path::Path;
///
/// let stats = copy_dir_sync(Path::new("photos"), Path::new("backup"), &CopyOptions::default())?;
/// println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
/// # Ok::<(), filepane::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Number of regular files copied
    pub files_copied: u64,
    /// Number of directories created (an existing destination root is not counted)
    pub dirs_created: u64,
    /// Number of entries skipped because they were neither files nor directories
    pub entries_skipped: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Duration of the copy
    pub duration: Duration,
}

/// Copy the tree at `src` into `dst`.
///
/// `dst` may already exist (the background path creates it up front).
/// Only directories and regular files are copied; symlinks, FIFOs, sockets
/// and devices are skipped. The first failing child aborts the walk and the
/// output produced so far is left in place.
///
/// # Errors
///
/// - [`Error::Copy`] for the first item that failed.
/// - [`Error::Cancelled`] if the cancellation token was set. The token is
///   checked before every child.
pub fn copy_dir_sync(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopyStats> {
    let start_time = Instant::now();
    let mut stats = CopyStats::default();

    copy_tree(src, dst, options, &mut stats)?;

    stats.duration = start_time.elapsed();
    tracing::debug!(
        "copied tree {} -> {}: {} files, {} dirs, {} bytes",
        src.display(),
        dst.display(),
        stats.files_copied,
        stats.dirs_created,
        stats.bytes_copied
    );
    Ok(stats)
}

fn copy_tree(src: &Path, dst: &Path, options: &CopyOptions, stats: &mut CopyStats) -> Result<()> {
    match DirBuilder::new().mode(NEW_DIR_MODE).create(dst) {
        Ok(()) => stats.dirs_created += 1,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(Error::copy(src, dst, e)),
    }

    let entries = fs::read_dir(src).map_err(|e| Error::copy(src, dst, e))?;
    for entry in entries {
        if options.is_cancelled() {
            return Err(Error::Cancelled {
                bytes_copied: stats.bytes_copied,
            });
        }

        let entry = entry.map_err(|e| Error::copy(src, dst, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = fs::symlink_metadata(&from)
            .map_err(|e| Error::copy(&from, &to, e))?
            .file_type();

        if file_type.is_dir() {
            copy_tree(&from, &to, options, stats)?;
        } else if file_type.is_file() {
            match copy_file_sync(&from, &to, options) {
                Ok(bytes) => {
                    stats.files_copied += 1;
                    stats.bytes_copied += bytes;
                }
                Err(Error::Cancelled { bytes_copied }) => {
                    return Err(Error::Cancelled {
                        bytes_copied: stats.bytes_copied + bytes_copied,
                    });
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::debug!("skipping special file {}", from.display());
            stats.entries_skipped += 1;
        }
    }

    Ok(())
}
