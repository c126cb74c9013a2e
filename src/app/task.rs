//! # Task record.
//!
//! A plain record managed by the repositories: identifier, title, completion
//! flag and creation timestamp. Identifiers come from a process-wide counter
//! starting at 1.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};

use chrono::{DateTime, Local};

/// Global identifier counter.
static TASK_SEQ: AtomicU64 = AtomicU64::new(1);

/// A single task.
///
/// Shared as `Arc<Task>`; only the completion flag is mutable.
#[derive(Debug)]
pub struct Task {
    id: u64,
    title: String,
    completed: AtomicBool,
    created_at: DateTime<Local>,
}

impl Task {
    /// Creates an open task stamped with the next identifier and the local time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TASK_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            title: title.into(),
            completed: AtomicBool::new(false),
            created_at: Local::now(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.completed.load(AtomicOrdering::Acquire)
    }

    pub fn set_completed(&self, completed: bool) {
        self.completed.store(completed, AtomicOrdering::Release);
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Case-insensitive title comparison.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

impl fmt::Display for Task {
    /// `[#id] title (open|done, HH:MM:SS)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_completed() { "done" } else { "open" };
        write!(
            f,
            "[#{}] {} ({}, {})",
            self.id,
            self.title,
            status,
            self.created_at.format("%H:%M:%S")
        )
    }
}
