//! Free space queries.

use std::ffi::CString;
use std::fmt;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::format::format_size;
use crate::error::{Error, Result};

/// Space available to unprivileged users on a filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSpace {
    /// Available bytes (`f_bavail * f_frsize`)
    pub available: u64,
}

impl fmt::Display for DiskSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} available", format_size(self.available))
    }
}

/// Query the filesystem holding `path` with `statvfs(3)`.
///
/// # Errors
///
/// Returns [`Error::Stat`] if the path contains a NUL byte or the call fails.
pub fn free_disk_space(path: &Path) -> Result<DiskSpace> {
    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|e| Error::Stat {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, e),
    })?;

    let mut stat: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();
    // SAFETY: c_path is a valid NUL-terminated string and stat points to writable memory
    let result = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if result != 0 {
        return Err(Error::Stat {
            path: path.to_path_buf(),
            source: io::Error::last_os_error(),
        });
    }

    // SAFETY: statvfs returned 0, so the struct is initialized
    let stat = unsafe { stat.assume_init() };
    #[allow(clippy::unnecessary_cast)]
    let available = (stat.f_bavail as u64).saturating_mul(stat.f_frsize as u64);

    Ok(DiskSpace { available })
}
