//! # Synchronous event bus.
//!
//! [`EventBus`] multicasts an event to every enabled observer of its type, on the
//! publishing thread, before `publish` returns.
//!
//! ## Architecture
//! ```text
//! Publishers:                          Observers (priority order):
//!   Emitter<TaskEvent>::fire ──┐
//!   Container::publish ────────┼──► EventBus::dispatch ──► obs(100) ──► obs(2500) ──► ...
//!   Container (Started/Stopping)┘          │
//!                                          └─ first Err stops dispatch and is returned
//! ```
//!
//! ## Rules
//! - **Synchronous**: every observer has run when dispatch returns.
//! - **Fail-fast**: the first observer error aborts the remaining observers and
//!   reaches the publisher unchanged.
//! - **No subscribers**: publishing an event nobody observes is a no-op.
//! - The observer list is fixed once the container is built.

use std::any::{TypeId, type_name};

use crate::core::{Container, resolver};
use crate::error::{Error, Result};
use crate::events::ObserverDescriptor;
use crate::registry::Registry;

/// Observer table of one container.
pub struct EventBus {
    observers: Vec<ObserverDescriptor>,
}

impl EventBus {
    /// Freezes the observer table against the final registry.
    ///
    /// - Observers excluded by config are disabled.
    /// - Component-bound observers whose component is not enabled are disabled.
    ///
    /// ### Errors
    /// - [`Error::InvalidDependency`] if a bound component is ambiguous.
    pub(crate) fn new(mut observers: Vec<ObserverDescriptor>, registry: &Registry) -> Result<Self> {
        for (seq, observer) in observers.iter_mut().enumerate() {
            observer.seq = seq;
            if observer.is_excluded(registry.config()) {
                observer.enabled = false;
                tracing::debug!(observer = observer.name(), "observer excluded");
                continue;
            }
            let Some(target) = observer.target() else {
                continue;
            };
            match resolver::select(registry, target.capability, &target.qualifiers) {
                Ok(_) => {}
                Err(Error::Unsatisfied { .. }) => {
                    tracing::debug!(observer = observer.name(), target = %target, "observer target disabled");
                    observer.enabled = false;
                }
                Err(err) => {
                    return Err(Error::InvalidDependency {
                        component: observer.name().to_string(),
                        dependency: target.to_string(),
                        source: Box::new(err),
                    });
                }
            }
        }
        observers.sort_by_key(|o| (o.priority(), o.seq));
        Ok(Self { observers })
    }

    /// Number of enabled observers of `E`.
    pub fn observers_of<E: 'static>(&self) -> usize {
        let id = TypeId::of::<E>();
        self.observers.iter().filter(|o| o.consumes(id)).count()
    }

    /// All observers in dispatch order (enabled or not).
    pub fn observers(&self) -> &[ObserverDescriptor] {
        &self.observers
    }

    /// Runs every matching observer; returns how many accepted the event.
    pub(crate) fn dispatch<E: Send + Sync + 'static>(&self, container: &Container, event: &E) -> Result<usize> {
        let id = TypeId::of::<E>();
        let mut delivered = 0;

        for observer in self.observers.iter().filter(|o| o.consumes(id)) {
            match observer.handle(container, event) {
                Ok(true) => delivered += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        observer = observer.name(),
                        event = type_name::<E>(),
                        label = err.as_label(),
                        error = %err,
                        "observer failed, dispatch aborted"
                    );
                    return Err(err);
                }
            }
        }

        tracing::debug!(event = type_name::<E>(), delivered, "event dispatched");
        Ok(delivered)
    }
}
