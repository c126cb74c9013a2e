//! # TimingInterceptor: elapsed-time reporter
//!
//! Measures the wall time of the inner chain and reports it in milliseconds,
//! on success and on failure alike.
//!
//! ## Example output
//! ```text
//! INFO  timed component="task-manager" method="list_tasks" elapsed_ms=0
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::intercept::{Interceptor, InterceptorDescriptor, InvocationContext, TIMED};

/// Elapsed-time interceptor.
#[derive(Default)]
pub struct TimingInterceptor;

impl TimingInterceptor {
    /// Default priority: runs inside the logger.
    pub const PRIORITY: i32 = 1000;

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Registration record binding this interceptor to [`TIMED`] at priority 1000.
    pub fn descriptor() -> InterceptorDescriptor {
        InterceptorDescriptor::new(TIMED, Self::PRIORITY, Arc::new(Self))
    }
}

impl Interceptor for TimingInterceptor {
    fn around(&self, ctx: &mut InvocationContext<'_, '_>) {
        let started = Instant::now();
        let outcome = ctx.proceed();
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            component = ctx.component(),
            method = ctx.method(),
            elapsed_ms,
            ok = outcome.is_returned(),
            "timed"
        );
    }

    fn name(&self) -> &'static str {
        "timing"
    }
}
