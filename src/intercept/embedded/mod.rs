//! # Built-in interceptors
//!
//! Small, self-contained interceptors bound through the service stereotype.
//!
//! - [`LoggingInterceptor`]: entry/exit logger, binding [`LOGGED`](crate::intercept::LOGGED), priority 900.
//! - [`TimingInterceptor`]: elapsed-time reporter, binding [`TIMED`](crate::intercept::TIMED), priority 1000.

mod log;
mod timer;

pub use log::LoggingInterceptor;
pub use timer::TimingInterceptor;
