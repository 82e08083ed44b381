//! Background copy tasks.
//!
//! A [`CopyTask`] is created for every paste that runs in the background and
//! lives in the [`TaskRegistry`] until a reap pass finds it no longer
//! running. Hosts refer to tasks through their [`TaskId`].

mod registry;
mod task;

pub use registry::TaskRegistry;
pub(crate) use task::TaskShared;
pub use task::{CopyTask, TaskId, TaskReport, TaskSnapshot, TaskState};
