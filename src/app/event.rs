//! # Task events.
//!
//! Published by the task service after a state change. Observers receive them
//! synchronously through the container's bus.

use std::fmt;
use std::sync::Arc;

use crate::app::Task;

/// What happened to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    Created,
    Completed,
    Deleted,
}

impl TaskAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskAction::Created => "created",
            TaskAction::Completed => "completed",
            TaskAction::Deleted => "deleted",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable `{action, subject}` payload.
#[derive(Debug, Clone)]
pub struct TaskEvent {
    pub action: TaskAction,
    pub task: Arc<Task>,
}

impl TaskEvent {
    pub fn new(action: TaskAction, task: Arc<Task>) -> Self {
        Self { action, task }
    }

    pub fn created(task: Arc<Task>) -> Self {
        Self::new(TaskAction::Created, task)
    }

    pub fn completed(task: Arc<Task>) -> Self {
        Self::new(TaskAction::Completed, task)
    }
}
