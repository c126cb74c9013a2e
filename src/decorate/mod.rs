//! # Decorators.
//!
//! Decorators wrap a capability with structural overlays implementing the same
//! interface. An overlay may validate and fail without calling its delegate,
//! forward a call unchanged, or forward and post-process.
//!
//! - [`DecoratorDescriptor`]: registration record (capability, priority, optional
//!   qualifier filter, builder closure).
//! - [`Delegate`]: the next inner layer handed to a decorator.
//!
//! Composition order is ascending priority, lower = outer. Interceptors always
//! wrap outside all decorators.

mod chain;
mod decorator;

pub(crate) use chain::compose;
pub use decorator::{DecorateFn, DecoratorDescriptor, Delegate};
