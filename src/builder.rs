//! Builder API for configuring a [`Browser`].
//!
//! The builder is a fluent alternative to constructing [`CopyOptions`] by
//! hand before calling [`Browser::with_options`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use filepane::BrowserBuilder;
//!
//! let browser = BrowserBuilder::new().build();
//! let entries = browser.list_directory(".".as_ref())?;
//! println!("{} entries", entries.len());
//! # Ok::<(), filepane::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use filepane::BrowserBuilder;
//!
//! let browser = BrowserBuilder::new()
//!     .background_threshold(16 * 1024 * 1024) // Background anything over 16 MiB
//!     .chunk_size(64 * 1024)
//!     .preserve_timestamps()
//!     .build();
//! ```

use crate::browser::Browser;
use crate::options::CopyOptions;

/// A builder for configuring a [`Browser`].
///
/// # Example
///
/// ```no_run
/// use filepane::BrowserBuilder;
///
/// let browser = BrowserBuilder::new()
///     .no_permissions()
///     .listing_limit(256)
///     .build();
/// assert_eq!(browser.options().listing_limit, 256);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BrowserBuilder {
    options: CopyOptions,
}

impl BrowserBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read/write buffer size used for every copy.
    ///
    /// Cancellation and progress are observed once per chunk.
    #[must_use]
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.options = self.options.with_chunk_size(bytes);
        self
    }

    /// Files strictly larger than `bytes` are copied on a worker thread.
    ///
    /// Directories always are, whatever this is set to.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use filepane::BrowserBuilder;
    ///
    /// // Every non-empty file goes to the background
    /// let browser = BrowserBuilder::new().background_threshold(0).build();
    /// ```
    #[must_use]
    pub fn background_threshold(mut self, bytes: u64) -> Self {
        self.options = self.options.with_background_threshold(bytes);
        self
    }

    /// Do not copy permission bits onto pasted files.
    #[must_use]
    pub fn no_permissions(mut self) -> Self {
        self.options = self.options.without_permissions();
        self
    }

    /// Copy modification and access times onto pasted files.
    #[must_use]
    pub fn preserve_timestamps(mut self) -> Self {
        self.options = self.options.with_timestamps();
        self
    }

    /// Maximum number of entries per listing, `..` included.
    #[must_use]
    pub fn listing_limit(mut self, limit: usize) -> Self {
        self.options = self.options.with_listing_limit(limit);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Consume the builder and return the configured options.
    pub fn into_options(self) -> CopyOptions {
        self.options
    }

    /// Build the browser.
    pub fn build(self) -> Browser {
        Browser::with_options(self.options)
    }
}
