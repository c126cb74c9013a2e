//! # Registration table.
//!
//! Everything the TaskForge application contributes to a container, in one
//! place:
//!
//! | Kind | Entry | Priority |
//! |---|---|---|
//! | interceptor | [`LoggingInterceptor`] (`logged`) | 900 |
//! | interceptor | [`TimingInterceptor`] (`timed`) | 1000 |
//! | decorator | [`ValidatingTaskRepository`] | 100 |
//! | observer | [`TaskLogger`], [`TaskStatistics`] | default |
//! | component | in-memory, file, mock repositories | |
//! | component | [`TaskManager`], [`TaskStatistics`], [`TaskLogger`] | |

use std::sync::Arc;

use crate::app::repository::{FileTaskRepository, InMemoryTaskRepository, MockTaskRepository, ValidatingTaskRepository};
use crate::app::{TaskLogger, TaskManager, TaskStatistics};
use crate::config::Config;
use crate::core::{Container, ContainerBuilder};
use crate::error::Result;
use crate::intercept::{LoggingInterceptor, TimingInterceptor};

/// Adds the TaskForge registrations to `builder`.
pub fn install(builder: ContainerBuilder) -> Result<ContainerBuilder> {
    builder
        .interceptor(LoggingInterceptor::descriptor())
        .interceptor(TimingInterceptor::descriptor())
        .decorator(ValidatingTaskRepository::descriptor())
        .observer(TaskLogger::observer())
        .observer(TaskStatistics::observer())
        .register(InMemoryTaskRepository::descriptor())?
        .register(FileTaskRepository::descriptor())?
        .register(MockTaskRepository::descriptor())?
        .register(TaskManager::descriptor())?
        .register(TaskStatistics::descriptor())?
        .register(TaskLogger::descriptor())
}

/// Builds a container holding only the TaskForge registrations.
pub fn container(config: Config) -> Result<Arc<Container>> {
    install(Container::builder(config))?.build()
}
