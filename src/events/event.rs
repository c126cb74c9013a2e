//! # Container lifecycle events.
//!
//! The container publishes [`ContainerEvent`] through its own bus:
//! - [`ContainerEventKind::Started`] at the end of
//!   [`ContainerBuilder::build`](crate::ContainerBuilder::build)
//! - [`ContainerEventKind::Stopping`] at the start of
//!   [`Container::shutdown`](crate::Container::shutdown), before any singleton is
//!   destroyed
//!
//! ## Ordering guarantees
//! Each event carries a globally unique, monotonically increasing `seq`.
//!
//! ## Example
//! ```rust
//! use taskforge::events::{ContainerEvent, ContainerEventKind};
//!
//! let a = ContainerEvent::new(ContainerEventKind::Started);
//! let b = ContainerEvent::new(ContainerEventKind::Stopping);
//! assert!(a.seq < b.seq);
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for container events.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of container events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEventKind {
    /// The container was built and verified.
    Started,
    /// Shutdown began; singletons are still alive.
    Stopping,
}

impl ContainerEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerEventKind::Started => "started",
            ContainerEventKind::Stopping => "stopping",
        }
    }
}

/// Lifecycle event of the container itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEvent {
    /// What happened.
    pub kind: ContainerEventKind,
    /// Global sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
}

impl ContainerEvent {
    /// Creates an event stamped with the next sequence number and the current time.
    pub fn new(kind: ContainerEventKind) -> Self {
        Self {
            kind,
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.kind == ContainerEventKind::Started
    }

    pub fn is_stopping(&self) -> bool {
        self.kind == ContainerEventKind::Stopping
    }
}
