//! # filepane
//!
//! Copy/paste core for terminal file browsers.
//!
//! ## Core Features
//!
//! - **Directory listings**: entries classified by kind and source language,
//!   with human-readable sizes and local modification times
//! - **Single-slot clipboard**: validated before it is touched, so a rejected
//!   copy never clobbers the pending one
//! - **Collision-free pastes**: `report.csv` lands as `report(1).csv` when
//!   the name is taken
//! - **Background copies**: directories and large files are copied on worker
//!   threads while the host keeps drawing
//! - **Cooperative cancellation**: a cancelled copy stops between chunks and
//!   its destination is deleted
//! - **Status projection**: running and finished copies are flagged on the
//!   listing of their destination directory
//!
//! ## Quick Start
//!
//! ```no_run
//! use filepane::{Browser, PasteOutcome};
//! use std::path::Path;
//!
//! let browser = Browser::new();
//! browser.set_clipboard(Path::new("photos"))?;
//!
//! match browser.paste_into(Path::new("/backup"))? {
//!     PasteOutcome::Completed { dest, bytes } => {
//!         println!("copied {bytes} bytes to {}", dest.display());
//!     }
//!     PasteOutcome::Background { task, dest } => {
//!         println!("task {task} is copying to {}", dest.display());
//!     }
//! }
//! # Ok::<(), filepane::Error>(())
//! ```
//!
//! ## Refresh Tick
//!
//! A host polls the core periodically (every ~50 ms works well):
//!
//! ```no_run
//! use filepane::Browser;
//!
//! let browser = Browser::new();
//! let cwd = browser.current_dir()?;
//! let mut entries = browser.list_directory(&cwd)?;
//!
//! for report in browser.reap_finished_tasks() {
//!     println!("task {} {}", report.id, report.state);
//! }
//! browser.project_status(&mut entries, &cwd);
//! # Ok::<(), filepane::Error>(())
//! ```
//!
//! ## Function API
//!
//! The pieces behind [`Browser`] are usable on their own:
//!
//! ```no_run
//! use filepane::{copy_dir_sync, unique_name, CopyOptions};
//! use std::path::Path;
//!
//! let dest_dir = Path::new("/backup");
//! let name = unique_name(dest_dir, "photos".as_ref());
//! let options = CopyOptions::default().with_timestamps();
//! let stats = copy_dir_sync(Path::new("photos"), &dest_dir.join(name), &options)?;
//! println!("Copied {} files", stats.files_copied);
//! # Ok::<(), filepane::Error>(())
//! ```
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Progress bar factory with indicatif |
//! | `serde` | Serialize for listings and [`CopyOptions`] |
//! | `full` | Enable all optional features |
//!
//! ## Platform
//!
//! Unix only: listings report raw mode bits and free space comes from
//! `statvfs`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod browser;
mod builder;
mod clipboard;
mod copy;
mod error;
mod input;
mod listing;
mod naming;
mod options;
mod progress;
mod status;
mod tasks;
mod utils;

pub use browser::Browser;
pub use builder::BrowserBuilder;
pub use clipboard::{Clipboard, ClipboardEntry};
pub use copy::{CopyStats, PasteOutcome, copy_dir_sync, copy_file_sync, dispatch, should_run_in_background};
pub use error::{ClipboardRejection, Error, ErrorCode, Result, is_no_space_error};
pub use input::{InputMode, InterruptDisposition, InterruptGuard};
pub use listing::{
    CopyStatus, DiskSpace, FileEntry, FileKind, Language, PARENT_ENTRY, change_directory,
    current_dir, format_mtime, format_size, free_disk_space, list_directory, stat_path,
};
pub use naming::{MAX_NAME_ATTEMPTS, try_unique_name, unique_name};
pub use options::{CopyOptions, DEFAULT_BACKGROUND_THRESHOLD, DEFAULT_CHUNK_SIZE, DEFAULT_LISTING_LIMIT};
pub use progress::{CopyProgress, ProgressSnapshot};
pub use status::project_status;
pub use tasks::{CopyTask, TaskId, TaskRegistry, TaskReport, TaskSnapshot, TaskState};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_progress_bar;
