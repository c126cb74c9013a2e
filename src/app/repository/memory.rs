use std::sync::Arc;

use crate::app::Task;
use crate::app::repository::{IN_MEMORY, KIND, TaskList, TaskRepository};
use crate::error::Result;
use crate::registry::{ComponentDescriptor, Lifecycle, Stereotype};

/// Volatile repository; its tasks are discarded at shutdown.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: TaskList,
}

impl InMemoryTaskRepository {
    pub const NAME: &'static str = "in-memory-repository";

    pub fn new() -> Self {
        Self::default()
    }

    /// Singleton qualified `kind=in-memory`.
    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new::<dyn TaskRepository, _>(Self::NAME, |_| {
            let repo: Arc<dyn TaskRepository> = Arc::new(Self::new());
            Ok(repo)
        })
        .with_qualifier(KIND, IN_MEMORY)
        .with_stereotype(&Stereotype::repository())
    }
}

impl Lifecycle for InMemoryTaskRepository {
    fn post_construct(&self) -> Result<()> {
        tracing::info!(component = Self::NAME, "repository initialized");
        Ok(())
    }

    fn pre_destroy(&self) -> Result<()> {
        tracing::info!(component = Self::NAME, discarded = self.tasks.len(), "repository destroyed");
        Ok(())
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn add(&self, task: Arc<Task>) -> Result<()> {
        self.tasks.push(task);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Arc<Task>>> {
        Ok(self.tasks.all())
    }

    fn find_by_title(&self, title: &str) -> Result<Option<Arc<Task>>> {
        Ok(self.tasks.by_title(title))
    }
}
