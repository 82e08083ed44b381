//! Configuration options for listing and copy operations.
//!
//! This module provides [`CopyOptions`], the single configuration value the
//! browser core is driven by.
//!
//! # Example
//!
//! ```
//! use filepane::CopyOptions;
//!
//! let options = CopyOptions::default()
//!     .with_chunk_size(64 * 1024)
//!     .with_background_threshold(16 * 1024 * 1024)
//!     .with_timestamps();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::progress::CopyProgress;

/// Default chunk size for streamed copies (8 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Files strictly larger than this are copied in the background (100 MiB).
pub const DEFAULT_BACKGROUND_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Default maximum number of entries returned by a listing.
pub const DEFAULT_LISTING_LIMIT: usize = 1024;

/// Options for listing and copy operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `chunk_size` | 8 KiB | Read/write buffer per chunk |
/// | `background_threshold` | 100 MiB | Files above this size copy in the background |
/// | `preserve_permissions` | `true` | Copy permission bits to the destination |
/// | `preserve_timestamps` | `false` | Copy mtime/atime to the destination |
/// | `listing_limit` | 1024 | Maximum entries per listing |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Size of each read/write chunk (default: 8 KiB)
    ///
    /// Cancellation and progress are observed between chunks.
    pub chunk_size: usize,

    /// Size above which a regular file is copied on a worker thread
    /// (default: 100 MiB). Directories always go to a worker.
    pub background_threshold: u64,

    /// Whether to preserve file permissions (default: true)
    pub preserve_permissions: bool,

    /// Whether to preserve file timestamps (default: false)
    pub preserve_timestamps: bool,

    /// Maximum number of entries a listing returns, `..` included
    /// (default: 1024)
    pub listing_limit: usize,

    /// Cooperative cancellation flag checked between chunks
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancel_token: Option<Arc<AtomicBool>>,

    /// Byte counters updated after every chunk
    #[cfg_attr(feature = "serde", serde(skip))]
    pub progress: Option<Arc<CopyProgress>>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            background_threshold: DEFAULT_BACKGROUND_THRESHOLD,
            preserve_permissions: true,
            preserve_timestamps: false,
            listing_limit: DEFAULT_LISTING_LIMIT,
            cancel_token: None,
            progress: None,
        }
    }
}

impl CopyOptions {
    /// Set the chunk size used for streamed copies
    ///
    /// Value is clamped to at least 1 byte.
    #[must_use]
    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    /// Set the size above which files are copied in the background
    #[must_use]
    pub fn with_background_threshold(mut self, bytes: u64) -> Self {
        self.background_threshold = bytes;
        self
    }

    /// Disable permission preservation
    ///
    /// Copied files then keep the mode they were created with (0o644 before umask).
    #[must_use]
    pub fn without_permissions(mut self) -> Self {
        self.preserve_permissions = false;
        self
    }

    /// Preserve modification and access times of copied files
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.preserve_timestamps = true;
        self
    }

    /// Limit the number of entries returned by a listing
    ///
    /// Value is clamped to at least 1.
    #[must_use]
    pub fn with_listing_limit(mut self, limit: usize) -> Self {
        self.listing_limit = limit.max(1);
        self
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancel_token(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// Attach progress counters
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<CopyProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Whether the attached cancellation token has been set.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token
            .as_ref()
            .is_some_and(|token| token.load(Ordering::Relaxed))
    }

    pub(crate) fn record_progress(&self, bytes: u64) {
        if let Some(progress) = &self.progress {
            progress.add_copied(bytes);
        }
    }

    /// Options for a background task: same tuning, fresh per-task handles.
    pub(crate) fn for_task(&self, token: Arc<AtomicBool>, progress: Arc<CopyProgress>) -> Self {
        self.clone()
            .with_cancel_token(token)
            .with_progress(progress)
    }
}
