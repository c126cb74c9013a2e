//! # TaskForge application.
//!
//! A small task tracker assembled entirely from container registrations.
//!
//! ```text
//! TaskService (per-lookup, logged + timed)
//!   ├─► TaskRepository{kind=in-memory} ─► ValidatingTaskRepository ─► InMemoryTaskRepository
//!   └─► Emitter<TaskEvent> ─► TaskLogger, TaskStatistics
//! ```
//!
//! [`install`] adds every registration to a [`ContainerBuilder`](crate::ContainerBuilder);
//! [`container`] builds a container holding only those.

mod event;
mod logger;
pub mod repository;
mod service;
mod statistics;
mod task;
mod wiring;

pub use event::{TaskAction, TaskEvent};
pub use logger::TaskLogger;
pub use repository::TaskRepository;
pub use service::{APP_NAME_KEY, InterceptedTaskService, TaskManager, TaskService};
pub use statistics::TaskStatistics;
pub use task::Task;
pub use wiring::{container, install};
