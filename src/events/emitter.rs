//! # Typed event emitter.
//!
//! [`Emitter`] is the handle a component keeps to publish events of one type. It
//! holds a weak reference to the container, so components never keep the
//! container alive.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Weak;

use crate::core::Container;
use crate::error::{Error, Result};

/// Publishes events of type `E` through the container's bus.
pub struct Emitter<E> {
    container: Weak<Container>,
    _event: PhantomData<fn(E)>,
}

impl<E: Send + Sync + 'static> Emitter<E> {
    pub(crate) fn new(container: Weak<Container>) -> Self {
        Self {
            container,
            _event: PhantomData,
        }
    }

    /// Publishes `event` synchronously; returns after every observer has run.
    ///
    /// ### Errors
    /// - [`Error::RuntimeClosed`] if the container was dropped or shut down.
    /// - The first observer error, unchanged.
    pub fn fire(&self, event: E) -> Result<()> {
        let container = self.container.upgrade().ok_or(Error::RuntimeClosed)?;
        container.publish(&event)
    }
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            _event: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("event", &std::any::type_name::<E>())
            .field("attached", &(self.container.strong_count() > 0))
            .finish()
    }
}
