//! Runtime core: resolution, scopes and the container.
//!
//! The public API of this module is [`Container`] and [`ContainerBuilder`].
//!
//! Internal modules:
//! - [`resolver`]: pure candidate selection over the registry;
//! - [`scope`]: singleton slots with exactly-once construction and ordered destruction;
//! - [`graph`]: build-time dependency verification and the re-entrancy guard;
//! - [`container`]: resolution, composition, publishing and shutdown;
//! - [`builder`]: registration table and build-time checks.
//!
//! ```text
//! ContainerBuilder
//!   ├─ register / interceptor / decorator / observer
//!   └─ build ──► graph::verify ──► EventBus::new ──► ScopeManager::new
//!                   └──► Container ──► publish(Started)
//! ```

mod builder;
mod container;
mod graph;
pub mod resolver;
mod scope;

pub use builder::ContainerBuilder;
pub use container::Container;
