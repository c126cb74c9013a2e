//! # Scope manager: per-descriptor singleton slots.
//!
//! Each singleton descriptor owns one slot, created when the container is built.
//! Per-lookup descriptors have no slot; their instances belong to the caller.
//!
//! ## State machine
//! ```text
//! Uninitialized ──(first resolve: construct + post_construct + compose)──► Active
//!       ▲                                                                   │
//!       └──────────── construction or init failed ◄─────────────────────────┤
//!                                                                            ▼
//!                                          shutdown ──► pre_destroy ──► Destroyed
//! ```
//!
//! ## Rules
//! - Construction runs under the slot lock: exactly once even when several
//!   threads race on first access.
//! - A failed construction leaves the slot `Uninitialized`.
//! - The composed handle (decorators + interceptors) is cached with the instance.
//! - Shutdown destroys every `Active` slot exactly once, in reverse creation
//!   order. Failures are collected and do not stop the remaining slots.
//! - A `Destroyed` slot answers [`Error::RuntimeClosed`].

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::registry::{Registry, Scope};

/// Destruction hook captured at construction time.
pub(crate) type Destroy = Box<dyn FnOnce() -> Result<()> + Send>;

enum SlotState {
    Uninitialized,
    Active {
        handle: Box<dyn Any + Send + Sync>,
        destroy: Destroy,
        created: u64,
    },
    Destroyed,
}

struct Slot {
    component: String,
    state: Mutex<SlotState>,
}

/// Owner of all singleton instances of one container.
pub(crate) struct ScopeManager {
    /// Indexed by descriptor `seq`; `None` for per-lookup or disabled descriptors.
    slots: Vec<Option<Slot>>,
    creation_seq: AtomicU64,
}

impl ScopeManager {
    /// Creates one empty slot per enabled singleton descriptor.
    pub(crate) fn new(registry: &Registry) -> Self {
        let slots = registry
            .components()
            .iter()
            .map(|d| {
                (d.is_enabled() && d.scope() == Scope::Singleton).then(|| Slot {
                    component: d.name().to_string(),
                    state: Mutex::new(SlotState::Uninitialized),
                })
            })
            .collect();
        Self {
            slots,
            creation_seq: AtomicU64::new(0),
        }
    }

    /// Returns the cached handle of singleton `seq`, creating it on first access.
    ///
    /// `create` returns the composed handle and the destruction hook of the raw
    /// instance.
    pub(crate) fn get_or_create<T>(&self, seq: usize, create: impl FnOnce() -> Result<(T, Destroy)>) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let slot = self.slot(seq)?;
        let mut state = slot.state.lock();

        match &*state {
            SlotState::Active { handle, .. } => {
                return handle.downcast_ref::<T>().cloned().ok_or_else(|| {
                    Error::component(slot.component.as_str(), "cached singleton has unexpected type")
                });
            }
            SlotState::Destroyed => return Err(Error::RuntimeClosed),
            SlotState::Uninitialized => {}
        }

        let (handle, destroy) = create()?;
        let created = self.creation_seq.fetch_add(1, AtomicOrdering::Relaxed);
        *state = SlotState::Active {
            handle: Box::new(handle.clone()),
            destroy,
            created,
        };
        tracing::debug!(component = slot.component.as_str(), created, "singleton active");
        Ok(handle)
    }

    /// Number of active singletons.
    pub(crate) fn active_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|slot| matches!(&*slot.state.lock(), SlotState::Active { .. }))
            .count()
    }

    /// Destroys every active singleton in reverse creation order.
    ///
    /// Every slot ends `Destroyed`, including slots that were never created.
    pub(crate) fn destroy_all(&self) -> Result<()> {
        let mut active = Vec::new();
        for slot in self.slots.iter().flatten() {
            let mut state = slot.state.lock();
            if let SlotState::Active { destroy, created, .. } =
                std::mem::replace(&mut *state, SlotState::Destroyed)
            {
                active.push((created, slot.component.as_str(), destroy));
            }
        }
        active.sort_by(|a, b| b.0.cmp(&a.0));

        let mut failures = Vec::new();
        for (_, component, destroy) in active {
            match destroy() {
                Ok(()) => tracing::debug!(component, "singleton destroyed"),
                Err(err) => {
                    tracing::warn!(component, error = %err, "pre_destroy failed");
                    failures.push(format!("{component}: {err}"));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Destruction { failures })
        }
    }

    fn slot(&self, seq: usize) -> Result<&Slot> {
        self.slots
            .get(seq)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::component(format!("#{seq}"), "no singleton slot"))
    }
}
