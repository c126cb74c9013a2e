use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::app::{TaskAction, TaskEvent};
use crate::error::Result;
use crate::events::ObserverDescriptor;
use crate::registry::{Capability, ComponentDescriptor, Lifecycle, Qualifiers, Scope};

/// Counts created and completed tasks from [`TaskEvent`]s.
#[derive(Debug, Default)]
pub struct TaskStatistics {
    created: AtomicU64,
    completed: AtomicU64,
}

impl TaskStatistics {
    pub const NAME: &'static str = "task-statistics";

    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter, so observer deliveries and callers see the same totals.
    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new::<TaskStatistics, _>(Self::NAME, |_| Ok(Arc::new(Self::new())))
            .with_scope(Scope::Singleton)
    }

    /// Delivers every [`TaskEvent`] to [`TaskStatistics::record`].
    pub fn observer() -> ObserverDescriptor {
        ObserverDescriptor::on::<TaskEvent>(Self::NAME).component::<TaskStatistics>(
            Qualifiers::none(),
            |stats, event| {
                stats.record(event);
                Ok(())
            },
        )
    }

    /// `Deleted` is not counted.
    pub fn record(&self, event: &TaskEvent) {
        let counter = match event.action {
            TaskAction::Created => &self.created,
            TaskAction::Completed => &self.completed,
            TaskAction::Deleted => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn created_count(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    pub fn completed_count(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> String {
        format!(
            "created: {}, completed: {}",
            self.created_count(),
            self.completed_count()
        )
    }
}

impl Lifecycle for TaskStatistics {
    fn pre_destroy(&self) -> Result<()> {
        tracing::info!(component = Self::NAME, summary = %self.summary(), "final statistics");
        Ok(())
    }
}

impl Capability for TaskStatistics {}
