//! # Interceptor contract.
//!
//! An [`Interceptor`] wraps a single method invocation. It receives an
//! [`InvocationContext`], runs its pre-call logic, calls
//! [`InvocationContext::proceed`] to run the rest of the chain, and inspects the
//! resulting [`Outcome`] for its post-call or failure-path logic.
//!
//! ## Rules
//! - `proceed` runs the rest of the chain **at most once**; later calls return the
//!   cached outcome.
//! - An interceptor cannot change the outcome. The original result (or error)
//!   reaches the caller unchanged.
//! - An interceptor that never calls `proceed` short-circuits the chain; the
//!   caller then receives [`Error::Interception`].
//!
//! ## Example (skeleton)
//! ```rust
//! use taskforge::intercept::{Interceptor, InvocationContext, Outcome};
//!
//! struct Audit;
//! impl Interceptor for Audit {
//!     fn around(&self, ctx: &mut InvocationContext<'_, '_>) {
//!         let method = ctx.method();
//!         if let Outcome::Raised(err) = ctx.proceed() {
//!             eprintln!("{method} failed: {err}");
//!         }
//!     }
//! }
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;

/// Result of the inner part of a chain, as seen by an interceptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The target returned normally.
    Returned,
    /// The target (or an inner link) failed with this error.
    Raised(Error),
}

impl Outcome {
    pub fn is_returned(&self) -> bool {
        matches!(self, Outcome::Returned)
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Returned => None,
            Outcome::Raised(err) => Some(err),
        }
    }
}

/// Cross-cutting behavior around a method invocation.
pub trait Interceptor: Send + Sync + 'static {
    /// Runs around the invocation described by `ctx`.
    fn around(&self, ctx: &mut InvocationContext<'_, '_>);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// One link of an invocation: the intercepted method plus the links still to run.
///
/// `'a` bounds the chain data (component name, interceptor list, target closure);
/// `'t` is the borrow of the target for this link.
pub struct InvocationContext<'a, 't> {
    component: &'a str,
    method: &'static str,
    remaining: &'a [Arc<dyn Interceptor>],
    target: &'t mut (dyn FnMut() -> Outcome + 'a),
    outcome: Option<Outcome>,
}

impl<'a, 't> InvocationContext<'a, 't> {
    pub(crate) fn new(
        component: &'a str,
        method: &'static str,
        remaining: &'a [Arc<dyn Interceptor>],
        target: &'t mut (dyn FnMut() -> Outcome + 'a),
    ) -> Self {
        Self {
            component,
            method,
            remaining,
            target,
            outcome: None,
        }
    }

    /// Name of the component whose method is being invoked.
    pub fn component(&self) -> &str {
        self.component
    }

    /// Name of the invoked method.
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// True once the rest of the chain has run.
    pub fn has_proceeded(&self) -> bool {
        self.outcome.is_some()
    }

    /// Runs the next link (or the target) and returns its outcome.
    ///
    /// Runs at most once; repeated calls return the first outcome.
    pub fn proceed(&mut self) -> Outcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let remaining = self.remaining;
        let outcome = match remaining.split_first() {
            None => (self.target)(),
            Some((next, rest)) => {
                let mut inner = InvocationContext::new(self.component, self.method, rest, &mut *self.target);
                next.around(&mut inner);
                inner.outcome.unwrap_or_else(|| {
                    Outcome::Raised(Error::Interception {
                        component: self.component.to_string(),
                        method: self.method.to_string(),
                        reason: format!("{} did not proceed", next.name()),
                    })
                })
            }
        };

        self.outcome = Some(outcome.clone());
        outcome
    }
}

impl fmt::Debug for InvocationContext<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("component", &self.component)
            .field("method", &self.method)
            .field("remaining", &self.remaining.len())
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// Registration record binding an interceptor to a binding name.
#[derive(Clone)]
pub struct InterceptorDescriptor {
    binding: String,
    priority: i32,
    interceptor: Arc<dyn Interceptor>,
    pub(crate) seq: usize,
}

impl InterceptorDescriptor {
    /// Binds `interceptor` to components declaring `binding`.
    ///
    /// Lower `priority` runs earlier on entry and later on exit.
    pub fn new(binding: impl Into<String>, priority: i32, interceptor: Arc<dyn Interceptor>) -> Self {
        Self {
            binding: binding.into(),
            priority,
            interceptor,
            seq: 0,
        }
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn interceptor(&self) -> &Arc<dyn Interceptor> {
        &self.interceptor
    }
}

impl fmt::Debug for InterceptorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorDescriptor")
            .field("binding", &self.binding)
            .field("priority", &self.priority)
            .field("interceptor", &self.interceptor.name())
            .finish()
    }
}
