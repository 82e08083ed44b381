//! A single background copy and its shared state.

use crate::progress::{CopyProgress, ProgressSnapshot};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

/// Stable handle for a background copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Numeric value of the handle.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a background copy.
///
/// Only [`TaskState::Running`] counts as live. The other states are terminal
/// and visible until the task is reaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum TaskState {
    Running = 0,
    Completed = 1,
    Failed = 2,
    Cancelled = 3,
}

impl TaskState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Running,
            1 => Self::Completed,
            2 => Self::Failed,
            _ => Self::Cancelled,
        }
    }

    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State shared between a task's worker thread and the registry.
#[derive(Debug)]
pub(crate) struct TaskShared {
    state: AtomicU8,
    cancel: Arc<AtomicBool>,
    progress: Arc<CopyProgress>,
    failure: Mutex<Option<String>>,
}

impl TaskShared {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(TaskState::Running as u8),
            cancel: Arc::new(AtomicBool::new(false)),
            progress: Arc::new(CopyProgress::default()),
            failure: Mutex::new(None),
        }
    }

    pub(crate) fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: TaskState) {
        self.state.store(state as u8, Ordering::Release);
    }

    pub(crate) fn fail(&self, reason: String) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(reason);
        self.set_state(TaskState::Failed);
    }

    pub(crate) fn failure(&self) -> Option<String> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn request_cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub(crate) fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub(crate) fn progress(&self) -> Arc<CopyProgress> {
        Arc::clone(&self.progress)
    }
}

/// One background copy owned by the registry.
///
/// Paths and names are fixed when the task is created; only the state,
/// progress and worker handle change afterwards.
#[derive(Debug)]
pub struct CopyTask {
    id: TaskId,
    source: PathBuf,
    dest: PathBuf,
    dest_dir: PathBuf,
    dest_name: OsString,
    is_directory: bool,
    shared: Arc<TaskShared>,
    handle: Option<JoinHandle<()>>,
}

impl CopyTask {
    pub(crate) fn new(source: PathBuf, dest_dir: PathBuf, dest_name: OsString, is_directory: bool) -> Self {
        let dest = dest_dir.join(&dest_name);
        Self {
            id: TaskId::next(),
            source,
            dest,
            dest_dir,
            dest_name,
            is_directory,
            shared: Arc::new(TaskShared::new()),
            handle: None,
        }
    }

    pub(crate) fn shared(&self) -> Arc<TaskShared> {
        Arc::clone(&self.shared)
    }

    pub(crate) fn attach(&mut self, handle: JoinHandle<()>) {
        self.handle = Some(handle);
    }

    pub(crate) fn take_handle(&mut self) -> Option<JoinHandle<()>> {
        self.handle.take()
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn state(&self) -> TaskState {
        self.shared.state()
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Read-only copy of everything a host may want to display.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            id: self.id,
            source: self.source.clone(),
            dest: self.dest.clone(),
            dest_dir: self.dest_dir.clone(),
            dest_name: self.dest_name.clone(),
            is_directory: self.is_directory,
            state: self.state(),
            progress: self.shared.progress.snapshot(),
            failure: self.shared.failure(),
        }
    }

    /// Wait for the worker and produce the final report.
    pub(crate) fn finish(mut self) -> TaskReport {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("copy worker for task {} panicked", self.id);
                if self.state().is_running() {
                    self.shared.fail("worker panicked".to_owned());
                }
            }
        }
        TaskReport {
            id: self.id,
            dest: self.dest,
            state: self.shared.state(),
            bytes_copied: self.shared.progress.snapshot().copied,
            failure: self.shared.failure(),
        }
    }
}

/// Point-in-time view of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub source: PathBuf,
    /// Full destination path
    pub dest: PathBuf,
    /// Directory the destination was created in
    pub dest_dir: PathBuf,
    /// Final name chosen for the destination
    pub dest_name: OsString,
    pub is_directory: bool,
    pub state: TaskState,
    pub progress: ProgressSnapshot,
    /// Error message for a failed task
    pub failure: Option<String>,
}

/// Outcome of a task removed from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub id: TaskId,
    pub dest: PathBuf,
    pub state: TaskState,
    pub bytes_copied: u64,
    pub failure: Option<String>,
}
