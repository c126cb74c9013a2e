//! # Decorator descriptors.
//!
//! A decorator is a structural overlay implementing the same capability as the
//! component it wraps. It receives its immediate inner layer as a [`Delegate`]
//! and returns the wrapped handle.
//!
//! ## Rules
//! - A decorator only sees its immediate delegate; it cannot reach the raw
//!   instance past inner decorators.
//! - Without a qualifier filter a decorator applies to every enabled component of
//!   its capability.

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::registry::{Capability, CapabilityId, ComponentDescriptor, Qualifiers};

/// Builds a decorator layer around a delegate.
pub type DecorateFn<C> = Arc<dyn Fn(Delegate<C>) -> Result<Arc<C>> + Send + Sync>;

/// The next inner layer of a decorated capability.
///
/// Dereferences to the capability; cloning shares the same layer.
pub struct Delegate<C: ?Sized> {
    inner: Arc<C>,
}

impl<C: ?Sized> Delegate<C> {
    pub(crate) fn new(inner: Arc<C>) -> Self {
        Self { inner }
    }
}

impl<C: ?Sized> Clone for Delegate<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C: ?Sized> Deref for Delegate<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

/// Registration record for a decorator.
pub struct DecoratorDescriptor {
    name: String,
    capability: CapabilityId,
    priority: i32,
    qualifiers: Option<Qualifiers>,
    decorate: Box<dyn Any + Send + Sync>,
    pub(crate) seq: usize,
}

impl DecoratorDescriptor {
    /// Creates a decorator for capability `C`.
    ///
    /// Lower `priority` wraps further out.
    pub fn new<C, F>(name: impl Into<String>, priority: i32, decorate: F) -> Self
    where
        C: Capability + ?Sized,
        F: Fn(Delegate<C>) -> Result<Arc<C>> + Send + Sync + 'static,
    {
        let decorate: DecorateFn<C> = Arc::new(decorate);
        Self {
            name: name.into(),
            capability: CapabilityId::of::<C>(),
            priority,
            qualifiers: None,
            decorate: Box::new(decorate),
            seq: 0,
        }
    }

    /// Restricts the decorator to components whose qualifiers include `qualifiers`.
    #[must_use]
    pub fn with_qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers = Some(qualifiers);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capability(&self) -> CapabilityId {
        self.capability
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// True if this decorator wraps the component described by `desc`.
    pub fn applies_to(&self, desc: &ComponentDescriptor) -> bool {
        self.capability == desc.capability()
            && self
                .qualifiers
                .as_ref()
                .is_none_or(|q| desc.qualifiers().is_superset_of(q))
    }

    /// Wraps `inner` with this decorator.
    pub(crate) fn apply<C: Capability + ?Sized>(&self, inner: Arc<C>) -> Result<Arc<C>> {
        let decorate = self.decorate.downcast_ref::<DecorateFn<C>>().ok_or_else(|| {
            Error::component(
                self.name.as_str(),
                format!("decorator does not wrap {}", CapabilityId::of::<C>()),
            )
        })?;
        decorate(Delegate::new(inner))
    }
}

impl fmt::Debug for DecoratorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorDescriptor")
            .field("name", &self.name)
            .field("capability", &self.capability)
            .field("priority", &self.priority)
            .field("qualifiers", &self.qualifiers)
            .finish_non_exhaustive()
    }
}
