//! # Interceptor chain.
//!
//! [`InterceptorChain`] is the ordered list of interceptors bound to one
//! component. Wrapper types call [`InterceptorChain::invoke`] from every method
//! they forward.
//!
//! ```text
//! invoke("add", target)
//!   └─► I(900).around ─► proceed
//!         └─► I(1000).around ─► proceed
//!               └─► target() ─► Ok / Err
//!         ◄── exit/fail (1000)
//!   ◄── exit/fail (900)
//! ◄── original Result
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::intercept::{Interceptor, InvocationContext, Outcome};

/// Ordered interceptors bound to one component.
#[derive(Clone)]
pub struct InterceptorChain {
    component: Arc<str>,
    interceptors: Arc<[Arc<dyn Interceptor>]>,
}

impl InterceptorChain {
    /// Creates a chain; `interceptors` must already be in invocation order.
    pub fn new(component: impl Into<Arc<str>>, interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self {
            component: component.into(),
            interceptors: interceptors.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Runs `target` through the chain and returns its result unchanged.
    ///
    /// ### Notes
    /// - Interceptors see a clone of the error; the caller gets the original value.
    /// - If any interceptor short-circuits, `target` is not run and
    ///   [`Error::Interception`] is returned.
    pub fn invoke<R>(&self, method: &'static str, target: impl FnOnce() -> Result<R>) -> Result<R> {
        if self.interceptors.is_empty() {
            return target();
        }

        let mut target = Some(target);
        let mut result: Option<Result<R>> = None;
        let outcome = {
            let mut call = || match target.take() {
                Some(f) => {
                    let r = f();
                    let outcome = match &r {
                        Ok(_) => Outcome::Returned,
                        Err(err) => Outcome::Raised(err.clone()),
                    };
                    result = Some(r);
                    outcome
                }
                None => Outcome::Raised(self.broken(method, "target invoked twice")),
            };
            let mut root = InvocationContext::new(&self.component, method, &self.interceptors[..], &mut call);
            root.proceed()
        };

        match result {
            Some(r) => r,
            None => Err(outcome
                .error()
                .cloned()
                .unwrap_or_else(|| self.broken(method, "target was not invoked"))),
        }
    }

    fn broken(&self, method: &'static str, reason: &str) -> Error {
        Error::Interception {
            component: self.component.to_string(),
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.interceptors.iter().map(|i| i.name()).collect();
        f.debug_struct("InterceptorChain")
            .field("component", &self.component)
            .field("interceptors", &names)
            .finish()
    }
}
