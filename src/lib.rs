//! # taskforge
//!
//! **TaskForge** is a minimal synchronous inversion-of-control runtime.
//!
//! Components are registered once at startup with a descriptor (capability,
//! qualifiers, scope, alternative priority, interceptor bindings, factory).
//! The container then resolves capabilities to ready handles: it picks exactly
//! one implementation, constructs or reuses it according to its scope, wraps it
//! in decorators and interceptors, and delivers typed events to observers.
//!
//! Every operation runs to completion on the calling thread. The only
//! synchronization point is singleton construction, which happens exactly once
//! per container even under concurrent resolution.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ComponentDescriptor   InterceptorDescriptor   DecoratorDescriptor   ObserverDescriptor
//!           │                      │                      │                     │
//!           ▼                      ▼                      ▼                     ▼
//! ┌───────────────────────────────────────────────────────────────────────────────────┐
//! │  ContainerBuilder                                                                 │
//! │  - Registry (enabled evaluated once, duplicates rejected, chains sorted)          │
//! │  - dependency verification (unsatisfied / ambiguous / cycles)                     │
//! │  - observer table (disabled targets dropped, sorted by priority)                  │
//! └────────────────────────────────────────┬──────────────────────────────────────────┘
//!                                          ▼ build()
//! ┌───────────────────────────────────────────────────────────────────────────────────┐
//! │  Container                                                                        │
//! │  - resolver::select   (qualifiers ⊆ tags, alternatives, default eligibility)      │
//! │  - ScopeManager       (one slot per singleton, reverse-order destruction)         │
//! │  - EventBus           (synchronous, ordered, fail-fast)                           │
//! └──────┬──────────────────────────────┬─────────────────────────────┬───────────────┘
//!        ▼ resolve::<C>(qualifiers)      ▼ publish(&E) / Emitter<E>     ▼ shutdown()
//!   Interceptors( Decorators( raw ))    observers in priority order    Stopping, then
//!                                                                      pre_destroy (LIFO)
//! ```
//!
//! ### Resolution
//! ```text
//! resolve::<C>(q)
//!   ├─► candidates: enabled, capability == C, q ⊆ tags (empty q ⇒ default-eligible)
//!   ├─► non-alternatives present? ─► exactly one, else Ambiguous
//!   ├─► otherwise highest alternative priority, tie ⇒ Ambiguous
//!   ├─► Singleton: slot lock ─► cached handle or factory + post_construct + compose
//!   │   PerLookup: factory + post_construct + compose
//!   └─► compose: decorators (lowest priority outermost), then C::intercept(chain)
//! ```
//!
//! ## Features
//! | Area              | Description                                                        | Key types / traits                                   |
//! |-------------------|--------------------------------------------------------------------|------------------------------------------------------|
//! | **Registration**  | Describe components with qualifiers, scope and alternatives.       | [`ComponentDescriptor`], [`Qualifiers`], [`Scope`]   |
//! | **Resolution**    | Pick one implementation per capability and qualifier set.         | [`Container`], [`Capability`]                        |
//! | **Lifecycle**     | Construction and destruction hooks, ordered shutdown.             | [`Lifecycle`]                                        |
//! | **Interception**  | Ordered logging/timing around every method of a component.        | [`intercept::Interceptor`], [`intercept::InterceptorChain`] |
//! | **Decoration**    | Capability-typed wrappers applied before interception.            | [`decorate::DecoratorDescriptor`], [`decorate::Delegate`] |
//! | **Events**        | Typed, synchronous, priority-ordered observers.                   | [`events::ObserverDescriptor`], [`events::Emitter`]  |
//! | **Configuration** | Project stage, selected alternatives, string properties.          | [`Config`], [`ProjectStage`]                         |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use taskforge::{Capability, ComponentDescriptor, Config, Container, Lifecycle, Qualifiers, Scope};
//!
//! trait Greeter: Lifecycle + Send + Sync {
//!     fn greet(&self) -> String;
//! }
//! impl Capability for dyn Greeter {}
//!
//! struct English;
//! impl Lifecycle for English {}
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! fn main() -> taskforge::Result<()> {
//!     let container = Container::builder(Config::default())
//!         .register(
//!             ComponentDescriptor::new::<dyn Greeter, _>("english", |_| {
//!                 let g: Arc<dyn Greeter> = Arc::new(English);
//!                 Ok(g)
//!             })
//!             .with_scope(Scope::Singleton),
//!         )?
//!         .build()?;
//!
//!     let greeter = container.resolve::<dyn Greeter>(&Qualifiers::none())?;
//!     assert_eq!(greeter.greet(), "hello");
//!     container.shutdown()
//! }
//! ```

mod config;
mod core;
mod error;

pub mod app;
pub mod decorate;
pub mod events;
pub mod intercept;
pub mod registry;

// ---- Public re-exports ----

pub use config::{APP_NAME_VAR, Config, ProjectStage, STAGE_VAR};
pub use crate::core::resolver;
pub use crate::core::{Container, ContainerBuilder};
pub use error::{Error, Result};
pub use registry::{Capability, ComponentDescriptor, Lifecycle, Qualifiers, Registry, Scope, Stereotype};
