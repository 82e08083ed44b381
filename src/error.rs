//! Error types for filepane.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! raised by the browser core, the [`Result`] type alias, and the stable
//! [`ErrorCode`] used by hosts that need a machine-readable classification.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Listing | [`Error::Enumeration`], [`Error::Stat`] |
//! | Copy | [`Error::Copy`], [`Error::DestinationInsideSource`], [`Error::Spawn`] |
//! | Clipboard | [`Error::Clipboard`], [`Error::ClipboardEmpty`] |
//! | Naming | [`Error::NameExhausted`] |
//! | Tasks | [`Error::TaskNotFound`], [`Error::TaskNotRunning`], [`Error::Cancelled`] |
//! | Delete | [`Error::Delete`], [`Error::ParentEntry`], [`Error::DestinationBusy`] |
//! | IO | [`Error::Io`] |

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::tasks::TaskId;

/// Result type for filepane operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Example
///
/// ```no_run
/// use std::io;
/// use filepane::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    // The raw OS error might be available even if kind() isn't StorageFull
    #[cfg(unix)]
    if let Some(raw_error) = error.raw_os_error() {
        return raw_error == libc::ENOSPC;
    }

    false
}

/// Errors raised by the browser core.
///
/// All errors include relevant path information to aid debugging.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A directory could not be opened for enumeration
    #[error("Cannot read directory {path}: {source}")]
    Enumeration {
        /// Directory that was being listed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// A single path could not be inspected
    #[error("Cannot stat {path}: {source}")]
    Stat {
        /// Path that was being inspected
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Reading, writing or creating something failed during a copy
    #[error("Failed to copy {src} -> {dst}: {source}")]
    Copy {
        /// Source path of the failing item
        src: PathBuf,
        /// Destination path of the failing item
        dst: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source path cannot be placed on the clipboard
    #[error("Cannot copy {path} to clipboard: {reason}")]
    Clipboard {
        /// Path that was rejected
        path: PathBuf,
        /// Why it was rejected
        reason: ClipboardRejection,
    },

    /// Paste requested while the clipboard slot is empty
    #[error("Clipboard is empty")]
    ClipboardEmpty,

    /// Every numbered candidate name is already taken
    ///
    /// Only [`try_unique_name`](crate::try_unique_name) reports this; the
    /// regular generator falls back to the original name instead.
    #[error("No free name for {name} in {dir} after {attempts} attempts")]
    NameExhausted {
        /// Destination directory
        dir: PathBuf,
        /// Requested base name
        name: String,
        /// Number of numbered candidates tried
        attempts: u32,
    },

    /// A directory would be pasted into itself or one of its descendants
    #[error("Cannot paste {src} into its own subtree {dst}")]
    DestinationInsideSource {
        /// Directory on the clipboard
        src: PathBuf,
        /// Requested destination directory
        dst: PathBuf,
    },

    /// No task with this id is held by the registry
    #[error("No copy task with id {0}")]
    TaskNotFound(TaskId),

    /// The task already finished; its destination is left alone
    #[error("Copy task {0} is not running")]
    TaskNotRunning(TaskId),

    /// A copy stopped because its cancellation token was set
    #[error("Copy cancelled after {bytes_copied} bytes")]
    Cancelled {
        /// Bytes written before the cancellation was observed
        bytes_copied: u64,
    },

    /// A path could not be deleted
    #[error("Failed to delete {path}: {source}")]
    Delete {
        /// Path that was being deleted
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The parent-directory pseudo-entry was named as a target
    #[error("Refusing to operate on parent entry {0}")]
    ParentEntry(PathBuf),

    /// A running background copy is writing to or below this path
    #[error("{0} is busy with a running copy")]
    DestinationBusy(PathBuf),

    /// The worker thread for a background copy could not be started
    #[error("Failed to start copy worker: {0}")]
    Spawn(#[source] io::Error),

    /// IO error outside of a copy
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Reason a path was refused by the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardRejection {
    /// The path names the parent-directory pseudo-entry
    ParentEntry,
    /// The path has no final component (empty or a filesystem root)
    NoFileName,
    /// The path does not exist or cannot be inspected
    Unreachable,
    /// The working directory needed to resolve a relative path is unavailable
    NoWorkingDirectory,
}

impl fmt::Display for ClipboardRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::ParentEntry => "parent directory entry cannot be copied",
            Self::NoFileName => "path has no file name",
            Self::Unreachable => "path cannot be inspected",
            Self::NoWorkingDirectory => "current directory is unavailable",
        };
        f.write_str(reason)
    }
}

/// Stable, machine-readable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Path did not exist
    NotFound,
    /// Permission denied by the OS
    PermissionDenied,
    /// Destination ran out of space
    NoSpace,
    /// Caller supplied something the core refuses
    InvalidInput,
    /// Operation was cancelled
    Cancelled,
    /// Any other IO failure
    IoError,
    /// Internal failure (thread spawn, etc.)
    Internal,
}

impl ErrorCode {
    /// String form used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::NoSpace => "no_space",
            Self::InvalidInput => "invalid_input",
            Self::Cancelled => "cancelled",
            Self::IoError => "io_error",
            Self::Internal => "internal",
        }
    }

    /// Classify a raw IO error.
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::IoError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Enumeration { source, .. }
            | Self::Stat { source, .. }
            | Self::Copy { source, .. }
            | Self::Delete { source, .. }
            | Self::Io(source) => ErrorCode::from_io(source),
            Self::Clipboard {
                reason: ClipboardRejection::Unreachable,
                ..
            } => ErrorCode::NotFound,
            Self::Clipboard { .. }
            | Self::ClipboardEmpty
            | Self::NameExhausted { .. }
            | Self::DestinationInsideSource { .. }
            | Self::ParentEntry(_)
            | Self::DestinationBusy(_)
            | Self::TaskNotFound(_)
            | Self::TaskNotRunning(_) => ErrorCode::InvalidInput,
            Self::Cancelled { .. } => ErrorCode::Cancelled,
            Self::Spawn(_) => ErrorCode::Internal,
        }
    }

    pub(crate) fn copy(src: impl Into<PathBuf>, dst: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Copy {
            src: src.into(),
            dst: dst.into(),
            source,
        }
    }
}
