//! Single file copy.
//!
//! Files are streamed through a fixed-size buffer so a copy can be cancelled
//! and report progress between chunks.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use super::utils::preserve_timestamps;

/// Mode for newly created destination files, before umask.
const NEW_FILE_MODE: u32 = 0o644;

/// Copy `src` to `dst` in `options.chunk_size` chunks.
///
/// `dst` is created or truncated. On success the source permission bits are
/// applied (unless disabled) and, if requested, its timestamps.
///
/// # Returns
///
/// The number of bytes written.
///
/// # Errors
///
/// - [`Error::Copy`] if either side cannot be opened, read or written. The
///   partial destination is removed.
/// - [`Error::Cancelled`] if the cancellation token was set between chunks.
///   The partial destination is removed here too.
pub fn copy_file_sync(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let src_meta = fs::metadata(src).map_err(|e| Error::copy(src, dst, e))?;
    let mut reader = File::open(src).map_err(|e| Error::copy(src, dst, e))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(NEW_FILE_MODE)
        .open(dst)
        .map_err(|e| Error::copy(src, dst, e))?;

    let bytes = match stream(&mut reader, &mut writer, src, dst, options) {
        Ok(bytes) => bytes,
        Err(e) => {
            drop(writer);
            if let Err(rm) = fs::remove_file(dst) {
                tracing::warn!("failed to remove partial {}: {}", dst.display(), rm);
            }
            return Err(e);
        }
    };
    drop(writer);

    if options.preserve_permissions {
        fs::set_permissions(dst, src_meta.permissions()).map_err(|e| Error::copy(src, dst, e))?;
    }
    if options.preserve_timestamps {
        preserve_timestamps(&src_meta, dst).map_err(|e| Error::copy(src, dst, e))?;
    }

    tracing::debug!("copied {} -> {} ({} bytes)", src.display(), dst.display(), bytes);
    Ok(bytes)
}

fn stream(
    reader: &mut File,
    writer: &mut File,
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
) -> Result<u64> {
    let mut buf = vec![0u8; options.chunk_size.max(1)];
    let mut copied: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::copy(src, dst, e)),
        };

        if options.is_cancelled() {
            return Err(Error::Cancelled {
                bytes_copied: copied,
            });
        }

        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::copy(src, dst, e))?;
        copied += n as u64;
        options.record_progress(n as u64);
    }

    Ok(copied)
}
