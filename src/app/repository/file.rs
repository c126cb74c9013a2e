//! File-backed repository.
//!
//! File access is simulated: tasks are kept in memory and every write is logged
//! against the configured path (`repository.file.path`, default `tasks.db`).

use std::sync::Arc;

use crate::app::Task;
use crate::app::repository::{KIND, PERSISTENT, TaskList, TaskRepository};
use crate::config::ProjectStage;
use crate::error::Result;
use crate::registry::{ComponentDescriptor, Lifecycle, Stereotype};

/// Config key holding the simulated file path.
pub const PATH_KEY: &str = "repository.file.path";

/// Repository that pretends to persist tasks to a file.
#[derive(Debug)]
pub struct FileTaskRepository {
    path: String,
    tasks: TaskList,
}

impl FileTaskRepository {
    pub const NAME: &'static str = "file-repository";

    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tasks: TaskList::default(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Singleton qualified `kind=persistent`, excluded in [`ProjectStage::UnitTest`].
    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new::<dyn TaskRepository, _>(Self::NAME, |c| {
            let path = c.config().value_or(PATH_KEY, "tasks.db");
            let repo: Arc<dyn TaskRepository> = Arc::new(Self::new(path));
            Ok(repo)
        })
        .with_qualifier(KIND, PERSISTENT)
        .with_stereotype(&Stereotype::repository())
        .exclude_if(|cfg| cfg.project_stage == ProjectStage::UnitTest)
    }
}

impl Lifecycle for FileTaskRepository {
    fn post_construct(&self) -> Result<()> {
        tracing::info!(component = Self::NAME, path = %self.path, "repository initialized (simulated file access)");
        Ok(())
    }

    fn pre_destroy(&self) -> Result<()> {
        tracing::info!(
            component = Self::NAME,
            path = %self.path,
            flushed = self.tasks.len(),
            "repository destroyed, tasks would be written to file"
        );
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn add(&self, task: Arc<Task>) -> Result<()> {
        tracing::info!(component = Self::NAME, path = %self.path, title = task.title(), "persisting task");
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
