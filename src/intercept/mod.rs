//! # Method interception.
//!
//! Interceptors add ordered cross-cutting behavior (logging, timing) around the
//! methods of a resolved component.
//!
//! - [`Interceptor`]: the extension point; implementations get an
//!   [`InvocationContext`] and call [`InvocationContext::proceed`].
//! - [`InterceptorDescriptor`]: binds an interceptor to a binding name with a
//!   priority.
//! - [`InterceptorChain`]: the ordered interceptors of one component; wrapper
//!   types route each method through [`InterceptorChain::invoke`].
//!
//! ## Ordering
//! Ascending priority, ties by registration order. The lowest priority is
//! outermost: first on entry, last on exit.
//!
//! ## Weaving
//! There are no runtime proxies. A capability that supports interception
//! implements [`Capability::intercept`](crate::Capability::intercept) and returns
//! a wrapper holding the inner handle and the chain.

mod chain;
mod embedded;
mod interceptor;

pub use chain::InterceptorChain;
pub use embedded::{LoggingInterceptor, TimingInterceptor};
pub use interceptor::{Interceptor, InterceptorDescriptor, InvocationContext, Outcome};

/// Binding name of the entry/exit logger.
pub const LOGGED: &str = "logged";
/// Binding name of the elapsed-time reporter.
pub const TIMED: &str = "timed";
