//! # Component registration.
//!
//! This module owns everything that is known about components **before** any of
//! them is constructed.
//!
//! - [`Capability`] / [`CapabilityId`]: what a caller can ask for.
//! - [`Lifecycle`]: construction and destruction hooks.
//! - [`Qualifiers`]: key/value tags used to pick among implementations.
//! - [`ComponentDescriptor`]: one concrete component (scope, alternative, bindings,
//!   dependencies, factory).
//! - [`Stereotype`]: reusable bundle of scope and bindings.
//! - [`Registry`]: the store, read-only once the container is built.
//!
//! ```text
//! ComponentDescriptor ──register──► Registry ──(build)──► Container
//!        │                              │
//!        ├─ qualifiers / scope          ├─ enabled evaluated once
//!        ├─ alternative + priority      ├─ duplicate triples rejected
//!        └─ bindings / dependencies     └─ interceptors + decorators sorted
//! ```

mod capability;
mod descriptor;
mod qualifiers;
mod store;

pub use capability::{Capability, CapabilityId, Lifecycle};
pub use descriptor::{ComponentDescriptor, Dependency, ExcludePredicate, Factory, Scope, Stereotype};
pub use qualifiers::Qualifiers;
pub use store::Registry;
