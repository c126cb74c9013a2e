//! # Observers.
//!
//! An observer consumes events of one Rust type `E`. It is described by an
//! [`ObserverDescriptor`] built through the typed [`ObserverBuilder`]:
//!
//! ```text
//! ObserverDescriptor::on::<E>(name)
//!     [.filter(pred)] [.priority(p)] [.exclude_if(pred)]
//!     ├─ .call(|e| ...)                    plain closure
//!     ├─ .subscriber(Arc<dyn Observe<E>>)  trait object
//!     └─ .component::<C>(q, |c, e| ...)    method on a managed component
//! ```
//!
//! ## Rules
//! - Observers run in ascending priority (default 2500), ties by registration order.
//! - A filter that rejects the event skips the observer silently.
//! - A component-bound observer resolves its component at dispatch time through
//!   the normal resolver, so scope rules apply. If the component is not enabled
//!   the observer is disabled when the container is built.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::Config;
use crate::core::Container;
use crate::error::Result;
use crate::registry::{Capability, Dependency, ExcludePredicate, Qualifiers};

/// Default observer priority.
pub const DEFAULT_PRIORITY: i32 = 2500;

/// Type-erased dispatch entry. Returns `Ok(false)` when the event was skipped.
pub(crate) type Handler = Arc<dyn Fn(&Container, &dyn Any) -> Result<bool> + Send + Sync>;

/// Contract for event observers.
///
/// Called synchronously on the publishing thread. An error aborts the remaining
/// dispatch and is returned to the publisher.
///
/// # Example
/// ```rust
/// use taskforge::events::Observe;
/// use taskforge::Result;
///
/// struct Audit;
/// impl Observe<String> for Audit {
///     fn on_event(&self, event: &String) -> Result<()> {
///         println!("audit: {event}");
///         Ok(())
///     }
/// }
/// ```
pub trait Observe<E>: Send + Sync + 'static {
    /// Handles a single event.
    fn on_event(&self, event: &E) -> Result<()>;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Registration record of one observer.
pub struct ObserverDescriptor {
    name: String,
    event: TypeId,
    event_name: &'static str,
    priority: i32,
    target: Option<Dependency>,
    exclude: Option<ExcludePredicate>,
    handler: Handler,

    // Assigned by the bus.
    pub(crate) enabled: bool,
    pub(crate) seq: usize,
}

impl ObserverDescriptor {
    /// Starts describing an observer of events of type `E`.
    pub fn on<E: Send + Sync + 'static>(name: impl Into<String>) -> ObserverBuilder<E> {
        ObserverBuilder {
            name: name.into(),
            priority: DEFAULT_PRIORITY,
            filter: None,
            exclude: None,
            _event: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Type name of the consumed event.
    pub fn event_name(&self) -> &'static str {
        self.event_name
    }

    /// Component the observer is bound to, if any.
    pub fn target(&self) -> Option<&Dependency> {
        self.target.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn consumes(&self, event: TypeId) -> bool {
        self.enabled && self.event == event
    }

    pub(crate) fn is_excluded(&self, config: &Config) -> bool {
        self.exclude.as_ref().is_some_and(|excluded| excluded(config))
    }

    pub(crate) fn handle(&self, container: &Container, event: &dyn Any) -> Result<bool> {
        (self.handler)(container, event)
    }
}

impl fmt::Debug for ObserverDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverDescriptor")
            .field("name", &self.name)
            .field("event", &self.event_name)
            .field("priority", &self.priority)
            .field("target", &self.target)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Typed builder for [`ObserverDescriptor`].
#[must_use]
pub struct ObserverBuilder<E> {
    name: String,
    priority: i32,
    filter: Option<Arc<dyn Fn(&E) -> bool + Send + Sync>>,
    exclude: Option<ExcludePredicate>,
    _event: PhantomData<fn(&E)>,
}

impl<E: Send + Sync + 'static> ObserverBuilder<E> {
    /// Only events accepted by `filter` reach the observer.
    pub fn filter(mut self, filter: impl Fn(&E) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Sets the dispatch priority (lower runs first).
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Disables the observer when `predicate` holds for the container config.
    pub fn exclude_if(mut self, predicate: impl Fn(&Config) -> bool + Send + Sync + 'static) -> Self {
        self.exclude = Some(Arc::new(predicate));
        self
    }

    /// Finishes with a plain closure.
    pub fn call(self, f: impl Fn(&E) -> Result<()> + Send + Sync + 'static) -> ObserverDescriptor {
        self.finish(None, move |_, event| f(event))
    }

    /// Finishes with an [`Observe`] implementation.
    pub fn subscriber(self, subscriber: Arc<dyn Observe<E>>) -> ObserverDescriptor {
        self.finish(None, move |_, event| subscriber.on_event(event))
    }

    /// Finishes with a method on the component providing `C` under `qualifiers`.
    ///
    /// The component is resolved for every delivered event.
    pub fn component<C>(
        self,
        qualifiers: Qualifiers,
        f: impl Fn(&C, &E) -> Result<()> + Send + Sync + 'static,
    ) -> ObserverDescriptor
    where
        C: Capability + ?Sized,
    {
        let target = Dependency::on::<C>(qualifiers.clone());
        self.finish(Some(target), move |container, event| {
            let component = container.resolve::<C>(&qualifiers)?;
            f(&*component, event)
        })
    }

    fn finish(
        self,
        target: Option<Dependency>,
        f: impl Fn(&Container, &E) -> Result<()> + Send + Sync + 'static,
    ) -> ObserverDescriptor {
        let filter = self.filter;
        let handler: Handler = Arc::new(move |container: &Container, event: &dyn Any| -> Result<bool> {
            let Some(event) = event.downcast_ref::<E>() else {
                return Ok(false);
            };
            if filter.as_ref().is_some_and(|accept| !accept(event)) {
                return Ok(false);
            }
            f(container, event)?;
            Ok(true)
        });

        ObserverDescriptor {
            name: self.name,
            event: TypeId::of::<E>(),
            event_name: type_name::<E>(),
            priority: self.priority,
            target,
            exclude: self.exclude,
            handler,
            enabled: true,
            seq: 0,
        }
    }
}
