//! Validating decorator for every task repository.
//!
//! `add` rejects blank titles and titles longer than [`MAX_TITLE_CHARS`]
//! characters before the delegate is reached; reads are forwarded unchanged.

use std::sync::Arc;

use crate::app::Task;
use crate::app::repository::TaskRepository;
use crate::decorate::{DecoratorDescriptor, Delegate};
use crate::error::{Error, Result};
use crate::registry::Lifecycle;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Decorator enforcing title rules on [`TaskRepository::add`].
pub struct ValidatingTaskRepository {
    delegate: Delegate<dyn TaskRepository>,
}

impl ValidatingTaskRepository {
    pub const NAME: &'static str = "validating-repository";
    pub const PRIORITY: i32 = 100;

    pub fn new(delegate: Delegate<dyn TaskRepository>) -> Self {
        Self { delegate }
    }

    /// Applies to every repository regardless of qualifiers.
    pub fn descriptor() -> DecoratorDescriptor {
        DecoratorDescriptor::new::<dyn TaskRepository, _>(Self::NAME, Self::PRIORITY, |delegate| {
            let repo: Arc<dyn TaskRepository> = Arc::new(Self::new(delegate));
            Ok(repo)
        })
    }

    /// Checks `title` against the rules enforced by `add`.
    pub fn validate(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(Error::validation("title must not be empty"));
        }
        let len = title.chars().count();
        if len > MAX_TITLE_CHARS {
            return Err(Error::validation(format!(
                "title must be at most {MAX_TITLE_CHARS} characters (got {len})"
            )));
        }
        Ok(())
    }
}

impl Lifecycle for ValidatingTaskRepository {}

impl TaskRepository for ValidatingTaskRepository {
    fn add(&self, task: Arc<Task>) -> Result<()> {
        Self::validate(task.title())?;
        tracing::info!(component = Self::NAME, title = task.title(), "title validated");
        self.delegate.add(task)
    }

    fn find_all(&self) -> Result<Vec<Arc<Task>>> {
        self.delegate.find_all()
    }

    fn find_by_title(&self, title: &str) -> Result<Option<Arc<Task>>> {
        self.delegate.find_by_title(title)
    }
}
