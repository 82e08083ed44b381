//! Copy status projection onto a listing.

use crate::listing::{CopyStatus, FileEntry};
use crate::tasks::{TaskSnapshot, TaskState};
use std::path::Path;

/// Annotate `entries` of `current_dir` with the state of the given tasks.
///
/// Every entry is reset first. A running task marks its destination entry
/// [`CopyStatus::InProgress`]; a task that completed but has not been reaped
/// yet marks it [`CopyStatus::Completed`]. Failed and cancelled tasks leave
/// no trace.
pub fn project_status(entries: &mut [FileEntry], current_dir: &Path, tasks: &[TaskSnapshot]) {
    for entry in entries.iter_mut() {
        entry.copy_status = CopyStatus::None;
    }

    for task in tasks {
        let status = match task.state {
            TaskState::Running => CopyStatus::InProgress,
            TaskState::Completed => CopyStatus::Completed,
            TaskState::Failed | TaskState::Cancelled => continue,
        };
        if task.dest_dir != current_dir {
            continue;
        }
        let name = task.dest_name.to_string_lossy();
        if let Some(entry) = entries.iter_mut().find(|e| e.name == name) {
            entry.copy_status = status;
        }
    }
}
