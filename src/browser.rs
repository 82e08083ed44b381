//! The [`Browser`] facade.
//!
//! A rendering layer drives the core through one `Browser`: it lists
//! directories, moves paths on and off the clipboard, pastes, and on every
//! tick reaps finished tasks and re-projects their status onto the listing
//! it is about to draw.

use crate::clipboard::{Clipboard, ClipboardEntry};
use crate::copy::{self, PasteOutcome, remove_path};
use crate::error::{Error, Result};
use crate::input::{InputMode, InterruptDisposition, InterruptGuard};
use crate::listing::{self, DiskSpace, FileEntry};
use crate::options::CopyOptions;
use crate::status;
use crate::tasks::{TaskId, TaskRegistry, TaskReport, TaskSnapshot};
use crate::utils::path::absolutize;
use std::path::{Component, Path, PathBuf};

/// Copy/paste core of a file browser.
///
/// Dropping a `Browser` cancels every running background copy and removes
/// its destination.
#[derive(Debug)]
pub struct Browser {
    clipboard: Clipboard,
    registry: TaskRegistry,
    options: CopyOptions,
    input: InputMode,
}

impl Browser {
    /// Browser with default options.
    pub fn new() -> Self {
        Self::with_options(CopyOptions::default())
    }

    pub fn with_options(options: CopyOptions) -> Self {
        Self {
            clipboard: Clipboard::new(),
            registry: TaskRegistry::new(),
            options,
            input: InputMode::new(),
        }
    }

    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    // -------------------------------------------------------------------------
    // Listing
    // -------------------------------------------------------------------------

    /// List `path`, capped at the configured listing limit.
    pub fn list_directory(&self, path: &Path) -> Result<Vec<FileEntry>> {
        listing::list_directory(path, self.options.listing_limit)
    }

    pub fn stat_path(&self, path: &Path) -> Result<FileEntry> {
        listing::stat_path(path)
    }

    pub fn current_dir(&self) -> Result<PathBuf> {
        listing::current_dir()
    }

    pub fn change_directory(&self, path: &Path) -> Result<PathBuf> {
        listing::change_directory(path)
    }

    pub fn free_disk_space(&self, path: &Path) -> Result<DiskSpace> {
        listing::free_disk_space(path)
    }

    // -------------------------------------------------------------------------
    // Clipboard and paste
    // -------------------------------------------------------------------------

    /// Put `path` on the clipboard. See [`Clipboard::set`].
    pub fn set_clipboard(&self, path: &Path) -> Result<ClipboardEntry> {
        self.clipboard.set(path)
    }

    pub fn clipboard(&self) -> Option<ClipboardEntry> {
        self.clipboard.get()
    }

    /// Paste the clipboard content into `dest_dir`.
    ///
    /// The clipboard is left as is, so the same source can be pasted again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClipboardEmpty`] when nothing was copied, otherwise
    /// whatever [`copy::dispatch`] reports.
    pub fn paste_into(&self, dest_dir: &Path) -> Result<PasteOutcome> {
        let entry = self.clipboard.get().ok_or(Error::ClipboardEmpty)?;
        copy::dispatch(&entry, dest_dir, &self.options, &self.registry)
    }

    // -------------------------------------------------------------------------
    // Tasks
    // -------------------------------------------------------------------------

    /// Remove finished tasks. Call once per refresh tick.
    pub fn reap_finished_tasks(&self) -> Vec<TaskReport> {
        self.registry.reap_finished()
    }

    /// Recompute the copy status of `entries`, a listing of `current_dir`.
    ///
    /// A relative `current_dir` is resolved the same way
    /// [`paste_into`](Self::paste_into) resolves its destination.
    pub fn project_status(&self, entries: &mut [FileEntry], current_dir: &Path) {
        let current_dir = absolutize(current_dir).unwrap_or_else(|_| current_dir.to_path_buf());
        let tasks = self.registry.snapshot();
        status::project_status(entries, &current_dir, &tasks);
    }

    pub fn is_destination_busy(&self, path: &Path) -> bool {
        self.registry.is_destination_busy(path)
    }

    /// Cancel a background copy and delete its destination.
    pub fn cancel_task(&self, id: TaskId) -> Result<()> {
        self.registry.cancel(id)
    }

    pub fn tasks(&self) -> Vec<TaskSnapshot> {
        self.registry.snapshot()
    }

    /// The newest running task, for a progress display.
    pub fn active_task(&self) -> Option<TaskSnapshot> {
        self.registry.active()
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    /// Delete a file, symlink or whole directory tree.
    ///
    /// # Errors
    ///
    /// - [`Error::ParentEntry`] if `path` ends in `..`.
    /// - [`Error::DestinationBusy`] if a running copy writes to `path` or
    ///   below it.
    /// - [`Error::Delete`] if removal fails.
    pub fn delete_path(&self, path: &Path) -> Result<()> {
        if matches!(path.components().next_back(), Some(Component::ParentDir)) {
            return Err(Error::ParentEntry(path.to_path_buf()));
        }
        let abs = absolutize(path)?;
        if self.registry.overlaps_running(&abs) {
            return Err(Error::DestinationBusy(abs));
        }
        remove_path(&abs).map_err(|source| Error::Delete {
            path: abs.clone(),
            source,
        })?;
        tracing::info!("deleted {}", abs.display());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Input mode and lifecycle
    // -------------------------------------------------------------------------

    /// Protect against interrupts until the guard is dropped.
    #[must_use = "protection ends when the guard is dropped"]
    pub fn protect_interrupts(&self) -> InterruptGuard {
        self.input.protect()
    }

    pub fn interrupt_disposition(&self) -> InterruptDisposition {
        self.input.disposition()
    }

    /// Handle to the input mode, for signal handlers that outlive a borrow.
    pub fn input_mode(&self) -> InputMode {
        self.input.clone()
    }

    /// Cancel every running copy and forget all tasks.
    pub fn shutdown(&self) {
        self.registry.shutdown();
    }
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Browser {
    fn drop(&mut self) {
        self.shutdown();
    }
}
