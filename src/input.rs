//! Interrupt protection.
//!
//! While the host is busy inside the core it enters a protected input mode.
//! In that mode an interrupt keystroke should reach the host as ordinary
//! input (to offer cancellation, say) instead of terminating the process.
//! Modes nest: the process is protected while at least one guard lives.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the host should do with an interrupt right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptDisposition {
    /// Treat the interrupt as an input event
    DeliverAsInput,
    /// Let the interrupt terminate the process
    Terminate,
}

/// Shared protection counter.
#[derive(Debug, Clone, Default)]
pub struct InputMode {
    depth: Arc<AtomicUsize>,
}

impl InputMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter protected mode until the returned guard is dropped.
    #[must_use = "protection ends when the guard is dropped"]
    pub fn protect(&self) -> InterruptGuard {
        self.depth.fetch_add(1, Ordering::AcqRel);
        InterruptGuard {
            depth: Arc::clone(&self.depth),
        }
    }

    pub fn is_protected(&self) -> bool {
        self.depth.load(Ordering::Acquire) > 0
    }

    pub fn disposition(&self) -> InterruptDisposition {
        if self.is_protected() {
            InterruptDisposition::DeliverAsInput
        } else {
            InterruptDisposition::Terminate
        }
    }
}

/// RAII guard returned by [`InputMode::protect`].
#[derive(Debug)]
pub struct InterruptGuard {
    depth: Arc<AtomicUsize>,
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::AcqRel);
    }
}
