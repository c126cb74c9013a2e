//! # LoggingInterceptor: entry/exit logger
//!
//! Logs every intercepted call through `tracing`.
//!
//! ## Example output
//! ```text
//! INFO  enter component="task-manager" method="create_task"
//! INFO  exit component="task-manager" method="create_task"
//! WARN  failed component="task-manager" method="create_task" error="validation failed: title must not be empty"
//! ```

use std::sync::Arc;

use crate::intercept::{Interceptor, InterceptorDescriptor, InvocationContext, LOGGED, Outcome};

/// Entry/exit logging interceptor.
#[derive(Default)]
pub struct LoggingInterceptor;

impl LoggingInterceptor {
    /// Default priority: runs outside the timer.
    pub const PRIORITY: i32 = 900;

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Registration record binding this interceptor to [`LOGGED`] at priority 900.
    pub fn descriptor() -> InterceptorDescriptor {
        InterceptorDescriptor::new(LOGGED, Self::PRIORITY, Arc::new(Self))
    }
}

impl Interceptor for LoggingInterceptor {
    fn around(&self, ctx: &mut InvocationContext<'_, '_>) {
        let component = ctx.component().to_string();
        let method = ctx.method();
        tracing::info!(%component, method, "enter");

        match ctx.proceed() {
            Outcome::Returned => tracing::info!(%component, method, "exit"),
            Outcome::Raised(err) => {
                tracing::warn!(%component, method, label = err.as_label(), error = %err, "failed")
            }
        }
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}
