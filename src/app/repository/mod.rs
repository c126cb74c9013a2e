//! # Task repositories.
//!
//! [`TaskRepository`] is the storage capability. Three implementations are
//! registered, told apart by the `kind` qualifier:
//!
//! | Component | Qualifiers | Notes |
//! |---|---|---|
//! | [`InMemoryTaskRepository`] | `kind=in-memory` | singleton |
//! | [`FileTaskRepository`] | `kind=persistent` | singleton, simulated file, excluded in `UnitTest` |
//! | [`MockTaskRepository`] | none | alternative, priority 1000; answers the default query |
//!
//! Every implementation is wrapped by [`ValidatingTaskRepository`] (decorator,
//! priority 100). Bindings declared on a repository are woven through
//! [`InterceptedTaskRepository`].

mod file;
mod intercepted;
mod memory;
mod mock;
mod validating;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::app::Task;
use crate::error::Result;
use crate::intercept::InterceptorChain;
use crate::registry::{Capability, Lifecycle, Qualifiers};

pub use file::FileTaskRepository;
pub use intercepted::InterceptedTaskRepository;
pub use memory::InMemoryTaskRepository;
pub use mock::MockTaskRepository;
pub use validating::ValidatingTaskRepository;

/// Qualifier key selecting a repository implementation.
pub const KIND: &str = "kind";
/// `kind` of the in-memory repository.
pub const IN_MEMORY: &str = "in-memory";
/// `kind` of the file-backed repository.
pub const PERSISTENT: &str = "persistent";

/// `{kind=in-memory}`
pub fn in_memory() -> Qualifiers {
    Qualifiers::of([(KIND, IN_MEMORY)])
}

/// `{kind=persistent}`
pub fn persistent() -> Qualifiers {
    Qualifiers::of([(KIND, PERSISTENT)])
}

/// Storage capability for tasks.
pub trait TaskRepository: Lifecycle + Send + Sync {
    /// Stores a task.
    fn add(&self, task: Arc<Task>) -> Result<()>;

    /// Returns all tasks in insertion order.
    fn find_all(&self) -> Result<Vec<Arc<Task>>>;

    /// Returns the first task whose title matches, ignoring case.
    fn find_by_title(&self, title: &str) -> Result<Option<Arc<Task>>>;
}

impl Capability for dyn TaskRepository {
    fn intercept(target: Arc<Self>, chain: InterceptorChain) -> Option<Arc<Self>> {
        Some(Arc::new(InterceptedTaskRepository::new(target, chain)))
    }
}

/// Insertion-ordered task list shared by the repository implementations.
#[derive(Debug, Default)]
pub(crate) struct TaskList {
    tasks: RwLock<Vec<Arc<Task>>>,
}

impl TaskList {
    pub(crate) fn push(&self, task: Arc<Task>) {
        self.tasks.write().push(task);
    }

    pub(crate) fn all(&self) -> Vec<Arc<Task>> {
        self.tasks.read().clone()
    }

    pub(crate) fn by_title(&self, title: &str) -> Option<Arc<Task>> {
        self.tasks.read().iter().find(|t| t.has_title(title)).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.read().len()
    }
}
