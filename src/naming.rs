//! Collision-free destination names.
//!
//! Candidates are tried in order: the base name itself, then `stem(1).ext`
//! up to `stem(999).ext`. The split happens at the last dot unless that dot
//! starts the name, so `.bashrc` becomes `.bashrc(1)` and `a.tar.gz` becomes
//! `a.tar(1).gz`.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;

use crate::error::{Error, Result};

/// Highest numbered suffix that will be tried.
pub const MAX_NAME_ATTEMPTS: u32 = 999;

/// Pick a name for `base` that does not exist yet in `dir`.
///
/// Falls back to `base` itself (with a warning) when every numbered
/// candidate is taken. The check is `lstat`-based, so a dangling symlink
/// still occupies its name. Nothing is reserved: a name returned here can be
/// taken by another process before the caller creates it.
pub fn unique_name(dir: &Path, base: &OsStr) -> OsString {
    match try_unique_name(dir, base) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("{}; reusing original name", e);
            base.to_os_string()
        }
    }
}

/// Like [`unique_name`], but fails when every candidate is taken.
///
/// # Errors
///
/// Returns [`Error::NameExhausted`] after [`MAX_NAME_ATTEMPTS`] occupied
/// candidates.
pub fn try_unique_name(dir: &Path, base: &OsStr) -> Result<OsString> {
    if !exists(&dir.join(base)) {
        return Ok(base.to_os_string());
    }

    let (stem, ext) = split_extension(base.as_bytes());
    for i in 1..=MAX_NAME_ATTEMPTS {
        let candidate = numbered(stem, ext, i);
        if !exists(&dir.join(&candidate)) {
            return Ok(candidate);
        }
    }

    Err(Error::NameExhausted {
        dir: dir.to_path_buf(),
        name: base.to_string_lossy().into_owned(),
        attempts: MAX_NAME_ATTEMPTS,
    })
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Split at the last dot, keeping the dot with the extension.
fn split_extension(name: &[u8]) -> (&[u8], &[u8]) {
    match name.iter().rposition(|&b| b == b'.') {
        Some(0) | None => (name, &[]),
        Some(pos) => name.split_at(pos),
    }
}

fn numbered(stem: &[u8], ext: &[u8], i: u32) -> OsString {
    let suffix = format!("({i})");
    let mut out = Vec::with_capacity(stem.len() + suffix.len() + ext.len());
    out.extend_from_slice(stem);
    out.extend_from_slice(suffix.as_bytes());
    out.extend_from_slice(ext);
    OsString::from_vec(out)
}
