//! Progress tracking for background copies.
//!
//! [`CopyProgress`] is written by the copy routine after every chunk and read
//! by the host while it polls. With the `progress` feature enabled,
//! [`create_progress_bar`] builds an indicatif bar sized for a task.

use std::sync::{Mutex, PoisonError};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Point-in-time copy of a task's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Bytes expected in total
    pub total: u64,
    /// Bytes written so far
    pub copied: u64,
    /// Whether the copy ran to completion
    pub complete: bool,
}

impl ProgressSnapshot {
    /// Percentage in `0..=100`.
    ///
    /// Never reports 100 until the copy is complete, even when the source
    /// grew or the size estimate was too small.
    pub fn percent(&self) -> u8 {
        if self.complete {
            return 100;
        }
        if self.total == 0 {
            return 0;
        }
        let ratio = (self.copied as f64 / self.total as f64 * 100.0) as u64;
        ratio.min(99) as u8
    }
}

/// Byte counters shared between a copy worker and its readers.
#[derive(Debug, Default)]
pub struct CopyProgress {
    state: Mutex<ProgressSnapshot>,
}

impl CopyProgress {
    /// Counters for a copy of `total` bytes.
    pub fn new(total: u64) -> Self {
        Self {
            state: Mutex::new(ProgressSnapshot {
                total,
                ..ProgressSnapshot::default()
            }),
        }
    }

    /// Replace the expected total (directory tasks learn it after a scan).
    pub fn set_total(&self, total: u64) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).total = total;
    }

    /// Add bytes written by the latest chunk.
    pub fn add_copied(&self, bytes: u64) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.copied = state.copied.saturating_add(bytes);
    }

    /// Mark the copy complete.
    pub fn finish(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.total = state.total.max(state.copied);
        state.copied = state.total;
        state.complete = true;
    }

    /// Current counters.
    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Create a byte-based progress bar for a background copy
#[cfg(feature = "progress")]
#[must_use]
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
