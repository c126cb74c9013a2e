//! # Task service.
//!
//! [`TaskService`] is the business entry point. [`TaskManager`] implements it on
//! top of the in-memory repository and publishes a [`TaskEvent`] after every
//! state change. It carries the service stereotype, so every call runs through
//! the logging and timing interceptors via [`InterceptedTaskService`].

use std::sync::{Arc, Weak};

use crate::app::repository::{self, TaskRepository};
use crate::app::{Task, TaskEvent};
use crate::core::Container;
use crate::error::{Error, Result};
use crate::events::Emitter;
use crate::intercept::InterceptorChain;
use crate::registry::{Capability, ComponentDescriptor, Lifecycle, Stereotype};

/// Config key holding the application name.
pub const APP_NAME_KEY: &str = "app.name";

/// Task workflow exposed to callers.
pub trait TaskService: Lifecycle + Send + Sync {
    /// Creates and stores a task, then publishes a `Created` event.
    ///
    /// Fails with [`Error::Validation`] for a blank or overlong title; nothing is
    /// stored or published in that case.
    fn create_task(&self, title: &str) -> Result<Arc<Task>>;

    /// Marks the first task titled `title` as done and publishes a `Completed`
    /// event. Returns `false` when no such task exists.
    fn complete_task(&self, title: &str) -> Result<bool>;

    /// All stored tasks in creation order.
    fn list_tasks(&self) -> Result<Vec<Arc<Task>>>;

    /// Configured application name.
    fn app_name(&self) -> Result<String>;

    /// Names of every enabled repository implementation.
    fn repository_implementations(&self) -> Result<Vec<String>>;
}

impl Capability for dyn TaskService {
    fn intercept(target: Arc<Self>, chain: InterceptorChain) -> Option<Arc<Self>> {
        Some(Arc::new(InterceptedTaskService { inner: target, chain }))
    }
}

/// Default [`TaskService`]: stores into the in-memory repository.
pub struct TaskManager {
    repository: Arc<dyn TaskRepository>,
    events: Emitter<TaskEvent>,
    app_name: String,
    container: Weak<Container>,
}

impl TaskManager {
    pub const NAME: &'static str = "task-manager";

    /// Per-lookup service depending on `TaskRepository{kind=in-memory}`.
    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new::<dyn TaskService, _>(Self::NAME, |c| {
            let repository = c.resolve::<dyn TaskRepository>(&repository::in_memory())?;
            let service: Arc<dyn TaskService> = Arc::new(TaskManager {
                repository,
                events: c.emitter(),
                app_name: c.config().value_or(APP_NAME_KEY, "?").to_string(),
                container: c.weak(),
            });
            Ok(service)
        })
        .with_stereotype(&Stereotype::service())
        .depends_on::<dyn TaskRepository>(repository::in_memory())
    }
}

impl TaskManager {
    /// The owning container, if it is still alive and not shut down.
    fn open_container(&self) -> Result<Arc<Container>> {
        match self.container.upgrade() {
            Some(container) if !container.is_closed() => Ok(container),
            _ => Err(Error::RuntimeClosed),
        }
    }
}

impl Lifecycle for TaskManager {}

impl TaskService for TaskManager {
    fn create_task(&self, title: &str) -> Result<Arc<Task>> {
        self.open_container()?;
        let task = Arc::new(Task::new(title));
        self.repository.add(task.clone())?;
        self.events.fire(TaskEvent::created(task.clone()))?;
        Ok(task)
    }

    fn complete_task(&self, title: &str) -> Result<bool> {
        self.open_container()?;
        let Some(task) = self.repository.find_by_title(title)? else {
            tracing::debug!(title, "no task to complete");
            return Ok(false);
        };
        task.set_completed(true);
        self.events.fire(TaskEvent::completed(task))?;
        Ok(true)
    }

    fn list_tasks(&self) -> Result<Vec<Arc<Task>>> {
        self.repository.find_all()
    }

    fn app_name(&self) -> Result<String> {
        Ok(self.app_name.clone())
    }

    fn repository_implementations(&self) -> Result<Vec<String>> {
        let container = self.open_container()?;
        Ok(container
            .resolve_all_named::<dyn TaskRepository>()?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }
}

/// Routes every [`TaskService`] call through an interceptor chain.
pub struct InterceptedTaskService {
    inner: Arc<dyn TaskService>,
    chain: InterceptorChain,
}

impl Lifecycle for InterceptedTaskService {}

impl TaskService for InterceptedTaskService {
    fn create_task(&self, title: &str) -> Result<Arc<Task>> {
        self.chain.invoke("create_task", || self.inner.create_task(title))
    }

    fn complete_task(&self, title: &str) -> Result<bool> {
        self.chain.invoke("complete_task", || self.inner.complete_task(title))
    }

    fn list_tasks(&self) -> Result<Vec<Arc<Task>>> {
        self.chain.invoke("list_tasks", || self.inner.list_tasks())
    }

    fn app_name(&self) -> Result<String> {
        self.chain.invoke("app_name", || self.inner.app_name())
    }

    fn repository_implementations(&self) -> Result<Vec<String>> {
        self.chain
            .invoke("repository_implementations", || self.inner.repository_implementations())
    }
}
