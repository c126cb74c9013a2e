//! # Capabilities and lifecycle hooks.
//!
//! A **capability** is the type a caller asks the container for. In practice it is
//! either a trait object (`dyn TaskRepository`) or a concrete struct
//! (`TaskStatistics`). Every capability implements [`Capability`], which ties it to
//! [`Lifecycle`] and optionally teaches the container how to wrap a handle with an
//! interceptor chain.
//!
//! ## Rules
//! - Capability identity is the Rust type ([`CapabilityId::of`]); two capabilities
//!   never collide even if their names do.
//! - [`Lifecycle::post_construct`] runs once per constructed instance, before the
//!   instance is handed out.
//! - [`Lifecycle::pre_destroy`] runs once per **singleton** at shutdown.
//!   Per-lookup instances are owned by the caller and never destroyed by the
//!   container.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::Result;
use crate::intercept::InterceptorChain;

/// Lifecycle callbacks invoked by the scope manager.
///
/// Both hooks default to no-ops; wrapper types usually keep the defaults.
pub trait Lifecycle {
    /// Called after construction and before the instance is handed out.
    ///
    /// An error aborts the resolution; a singleton slot stays uninitialized so a
    /// later resolution retries construction.
    fn post_construct(&self) -> Result<()> {
        Ok(())
    }

    /// Called once when a singleton is destroyed during shutdown.
    fn pre_destroy(&self) -> Result<()> {
        Ok(())
    }
}

/// A type the container can resolve.
///
/// ### Interception
/// Descriptors that declare interceptor bindings need a way to put a chain in
/// front of the instance. Capabilities that support this override
/// [`Capability::intercept`] and return a wrapper that routes every method
/// through [`InterceptorChain::invoke`]. The default returns `None`, which makes
/// resolution of a bound descriptor fail with
/// [`Error::NotInterceptable`](crate::Error::NotInterceptable).
pub trait Capability: Lifecycle + Send + Sync + 'static {
    /// Wraps `target` so that each call passes through `chain`.
    fn intercept(target: Arc<Self>, chain: InterceptorChain) -> Option<Arc<Self>> {
        let _ = (target, chain);
        None
    }
}

/// Identity of a capability type.
///
/// Equality and hashing use the [`TypeId`] only; the type name is carried for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct CapabilityId {
    id: TypeId,
    name: &'static str,
}

impl CapabilityId {
    /// Returns the identity of capability `C`.
    #[inline]
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    /// Fully qualified type name of the capability.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for CapabilityId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CapabilityId {}

impl Hash for CapabilityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Store: Send + Sync {}

    struct Plain;

    #[test]
    fn identity_follows_type() {
        assert_eq!(CapabilityId::of::<dyn Store>(), CapabilityId::of::<dyn Store>());
        assert_ne!(CapabilityId::of::<dyn Store>(), CapabilityId::of::<Plain>());
        assert!(CapabilityId::of::<dyn Store>().name().contains("Store"));
    }
}
