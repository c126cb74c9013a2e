use std::sync::Arc;

use crate::app::Task;
use crate::app::repository::{TaskList, TaskRepository};
use crate::error::Result;
use crate::registry::{ComponentDescriptor, Lifecycle, Scope};

/// Test double enabled globally as an alternative with priority 1000.
///
/// It carries no qualifiers, so it only wins unqualified (default) queries.
#[derive(Debug, Default)]
pub struct MockTaskRepository {
    tasks: TaskList,
}

impl MockTaskRepository {
    pub const NAME: &'static str = "mock-repository";
    pub const PRIORITY: i32 = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new::<dyn TaskRepository, _>(Self::NAME, |_| {
            let repo: Arc<dyn TaskRepository> = Arc::new(Self::new());
            Ok(repo)
        })
        .with_alternative(Some(Self::PRIORITY))
        .with_scope(Scope::Singleton)
    }
}

impl Lifecycle for MockTaskRepository {}

impl TaskRepository for MockTaskRepository {
    fn add(&self, task: Arc<Task>) -> Result<()> {
        tracing::debug!(component = Self::NAME, title = task.title(), "mock add");
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
