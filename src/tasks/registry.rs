use crate::copy::remove_path;
use crate::error::{Error, Result};
use crate::utils::path::is_same_or_descendant;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::task::{CopyTask, TaskId, TaskReport, TaskSnapshot, TaskState};

/// Owner of every background copy until it is reaped.
///
/// The lock only guards list manipulation. Joining workers and deleting
/// destinations always happen after it has been released.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Mutex<Vec<CopyTask>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CopyTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a task. Newest tasks come first.
    pub fn insert(&self, task: CopyTask) {
        tracing::debug!("registered task {} -> {}", task.id(), task.dest().display());
        self.lock().insert(0, task);
    }

    /// Number of tasks held, finished or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every task that is no longer running and wait for its worker.
    pub fn reap_finished(&self) -> Vec<TaskReport> {
        let finished: Vec<CopyTask> = {
            let mut tasks = self.lock();
            let (finished, live): (Vec<_>, Vec<_>) =
                std::mem::take(&mut *tasks).into_iter().partition(|t| !t.is_running());
            *tasks = live;
            finished
        };

        finished
            .into_iter()
            .map(|task| {
                let report = task.finish();
                tracing::debug!("reaped task {} ({})", report.id, report.state);
                report
            })
            .collect()
    }

    /// Whether a running task is writing to exactly `path`.
    pub fn is_destination_busy(&self, path: &Path) -> bool {
        self.lock()
            .iter()
            .any(|t| t.is_running() && t.dest() == path)
    }

    /// Whether a running task writes to `path` or anywhere below it.
    pub(crate) fn overlaps_running(&self, path: &Path) -> bool {
        self.lock()
            .iter()
            .any(|t| t.is_running() && is_same_or_descendant(t.dest(), path))
    }

    /// Stop a task, wait for its worker and delete its destination.
    ///
    /// The destination is removed whatever the worker managed to do before
    /// it noticed the request. The task stays registered as cancelled until
    /// the next [`reap_finished`](Self::reap_finished).
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if the registry does not hold `id`,
    /// and [`Error::TaskNotRunning`] if the task already finished. A
    /// finished task keeps its destination and its terminal state.
    pub fn cancel(&self, id: TaskId) -> Result<()> {
        let (handle, shared, dest) = {
            let mut tasks = self.lock();
            let task = tasks
                .iter_mut()
                .find(|t| t.id() == id)
                .ok_or(Error::TaskNotFound(id))?;
            if !task.is_running() {
                return Err(Error::TaskNotRunning(id));
            }
            let shared = task.shared();
            shared.request_cancel();
            (task.take_handle(), shared, task.dest().to_path_buf())
        };

        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::warn!("copy worker for task {} panicked", id);
            }
        }

        if let Err(e) = remove_path(&dest) {
            tracing::warn!("failed to remove {} after cancel: {}", dest.display(), e);
        }
        shared.set_state(TaskState::Cancelled);
        tracing::info!("cancelled task {} ({})", id, dest.display());
        Ok(())
    }

    /// Cancel every running task and empty the registry.
    pub fn shutdown(&self) {
        let tasks = std::mem::take(&mut *self.lock());
        if tasks.is_empty() {
            return;
        }

        // Signal everyone first so workers wind down in parallel.
        for task in &tasks {
            if task.is_running() {
                task.shared().request_cancel();
            }
        }

        for task in tasks {
            let was_running = task.is_running();
            let shared = task.shared();
            let dest = task.dest().to_path_buf();
            task.finish();
            if was_running {
                if let Err(e) = remove_path(&dest) {
                    tracing::warn!("failed to remove {} on shutdown: {}", dest.display(), e);
                }
                shared.set_state(TaskState::Cancelled);
            }
        }
        tracing::debug!("task registry shut down");
    }

    /// Snapshots of every held task, newest first.
    pub fn snapshot(&self) -> Vec<TaskSnapshot> {
        self.lock().iter().map(CopyTask::snapshot).collect()
    }

    /// The newest task that is still running.
    pub fn active(&self) -> Option<TaskSnapshot> {
        self.lock()
            .iter()
            .find(|t| t.is_running())
            .map(CopyTask::snapshot)
    }

    /// Snapshot of one task.
    pub fn get(&self, id: TaskId) -> Option<TaskSnapshot> {
        self.lock()
            .iter()
            .find(|t| t.id() == id)
            .map(CopyTask::snapshot)
    }
}
