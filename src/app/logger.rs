use std::sync::Arc;

use crate::app::TaskEvent;
use crate::error::Result;
use crate::events::{Observe, ObserverDescriptor};
use crate::registry::{Capability, ComponentDescriptor, Lifecycle, Qualifiers, Scope};

/// Logs every [`TaskEvent`].
#[derive(Debug, Default)]
pub struct TaskLogger;

impl TaskLogger {
    pub const NAME: &'static str = "task-logger";

    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new::<TaskLogger, _>(Self::NAME, |_| Ok(Arc::new(TaskLogger)))
            .with_scope(Scope::Singleton)
    }

    pub fn observer() -> ObserverDescriptor {
        ObserverDescriptor::on::<TaskEvent>(Self::NAME)
            .component::<TaskLogger>(Qualifiers::none(), |logger, event| logger.on_event(event))
    }
}

impl Lifecycle for TaskLogger {}

impl Capability for TaskLogger {}

impl Observe<TaskEvent> for TaskLogger {
    fn on_event(&self, event: &TaskEvent) -> Result<()> {
        tracing::info!(action = %event.action, id = event.task.id(), title = event.task.title(), "task event");
        Ok(())
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
