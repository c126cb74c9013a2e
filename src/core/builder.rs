use std::sync::Arc;

use crate::config::Config;
use crate::decorate::DecoratorDescriptor;
use crate::error::Result;
use crate::events::{ContainerEvent, ContainerEventKind, EventBus, ObserverDescriptor};
use crate::intercept::InterceptorDescriptor;
use crate::registry::{ComponentDescriptor, Registry};

use super::{container::Container, graph, scope::ScopeManager};

/// Collects the registration table and builds a [`Container`].
///
/// This is the only place components, interceptors, decorators and observers
/// are registered; the resulting container is read-only.
pub struct ContainerBuilder {
    registry: Registry,
    observers: Vec<ObserverDescriptor>,
}

impl ContainerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            registry: Registry::new(Arc::new(config)),
            observers: Vec::new(),
        }
    }

    /// Configuration the registry evaluates exclusions against.
    pub fn config(&self) -> &Config {
        self.registry.config()
    }

    /// Registers a component.
    ///
    /// Fails with [`Error::DuplicateRegistration`](crate::Error::DuplicateRegistration)
    /// for a taken name or an identical enabled `(capability, qualifiers, scope)` triple.
    pub fn register(mut self, desc: ComponentDescriptor) -> Result<Self> {
        self.registry.register(desc)?;
        Ok(self)
    }

    /// Registers an interceptor under its binding.
    pub fn interceptor(mut self, desc: InterceptorDescriptor) -> Self {
        self.registry.register_interceptor(desc);
        self
    }

    /// Registers a decorator.
    pub fn decorator(mut self, desc: DecoratorDescriptor) -> Self {
        self.registry.register_decorator(desc);
        self
    }

    /// Registers an observer.
    pub fn observer(mut self, desc: ObserverDescriptor) -> Self {
        self.observers.push(desc);
        self
    }

    /// Builds and returns the container.
    ///
    /// This consumes the builder and:
    /// - verifies declared dependencies (unique resolution, no cycles)
    /// - freezes the observer table
    /// - creates one empty slot per enabled singleton
    /// - publishes [`ContainerEventKind::Started`]
    ///
    /// No component is constructed here; singletons are created on first resolve.
    pub fn build(self) -> Result<Arc<Container>> {
        graph::verify(&self.registry)?;
        let bus = EventBus::new(self.observers, &self.registry)?;
        let scopes = ScopeManager::new(&self.registry);

        let container = Container::assemble(self.registry, scopes, bus);
        tracing::info!(
            stage = %container.config().project_stage,
            components = container.registry().components().len(),
            observers = container.bus().observers().len(),
            "container started"
        );
        container.publish(&ContainerEvent::new(ContainerEventKind::Started))?;
        Ok(container)
    }
}
