use std::sync::Arc;

use crate::app::Task;
use crate::app::repository::TaskRepository;
use crate::error::Result;
use crate::intercept::InterceptorChain;
use crate::registry::Lifecycle;

/// Routes every [`TaskRepository`] call through an interceptor chain.
pub struct InterceptedTaskRepository {
    inner: Arc<dyn TaskRepository>,
    chain: InterceptorChain,
}

impl InterceptedTaskRepository {
    pub fn new(inner: Arc<dyn TaskRepository>, chain: InterceptorChain) -> Self {
        Self { inner, chain }
    }
}

impl Lifecycle for InterceptedTaskRepository {}

impl TaskRepository for InterceptedTaskRepository {
    fn add(&self, task: Arc<Task>) -> Result<()> {
        self.chain.invoke("add", || self.inner.add(task))
    }

    fn find_all(&self) -> Result<Vec<Arc<Task>>> {
        self.chain.invoke("find_all", || self.inner.find_all())
    }

    fn find_by_title(&self, title: &str) -> Result<Option<Arc<Task>>> {
        self.chain.invoke("find_by_title", || self.inner.find_by_title(title))
    }
}
