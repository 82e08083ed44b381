//! Copy engine.
//!
//! Synchronous file and tree copies, the inline-or-background decision, and
//! paste dispatch onto worker threads.

mod dir;
mod dispatch;
mod file;
mod utils;

// Re-export public API
pub use dir::{CopyStats, copy_dir_sync};
pub use dispatch::{PasteOutcome, dispatch, should_run_in_background};
pub use file::copy_file_sync;

pub(crate) use utils::remove_path;
