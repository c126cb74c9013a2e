//! # Events: observers, bus and emitters.
//!
//! ## Contents
//! - [`Observe`], [`ObserverDescriptor`], [`ObserverBuilder`]: how observers are
//!   described and registered
//! - [`EventBus`]: synchronous, fail-fast multicast
//! - [`Emitter`]: typed publishing handle injected into components
//! - [`ContainerEvent`]: lifecycle events of the container itself
//!
//! Any `Send + Sync + 'static` type can be an event; observers select events by
//! their Rust type.

mod bus;
mod emitter;
mod event;
mod observer;

pub use bus::EventBus;
pub use emitter::Emitter;
pub use event::{ContainerEvent, ContainerEventKind};
pub use observer::{DEFAULT_PRIORITY, Observe, ObserverBuilder, ObserverDescriptor};
