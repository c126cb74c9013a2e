//! # Candidate selection.
//!
//! Maps a `(capability, qualifiers)` query to exactly one enabled descriptor.
//!
//! ## Algorithm
//! ```text
//! enabled descriptors of capability
//!   ├─ query == {}  → keep default-eligible descriptors and alternatives
//!   └─ query != {}  → keep descriptors whose qualifiers ⊇ query
//! any alternative left?
//!   └─ yes → keep alternatives with the maximum effective priority
//! 0 left → Unsatisfied
//! 1 left → winner
//! n left → Ambiguous (candidate names in registration order)
//! ```
//!
//! Selection is pure: it reads the registry only and never constructs anything.

use crate::error::{Error, Result};
use crate::registry::{CapabilityId, ComponentDescriptor, Qualifiers, Registry};

/// Selects the single descriptor answering `query` for `capability`.
pub fn select<'r>(
    registry: &'r Registry,
    capability: CapabilityId,
    query: &Qualifiers,
) -> Result<&'r ComponentDescriptor> {
    let mut candidates: Vec<&ComponentDescriptor> = registry
        .all_enabled(capability)
        .filter(|d| {
            if query.is_empty() {
                d.is_default_eligible() || d.is_alternative()
            } else {
                d.qualifiers().is_superset_of(query)
            }
        })
        .collect();

    if candidates.iter().any(|d| d.is_alternative()) {
        let top = candidates
            .iter()
            .filter(|d| d.is_alternative())
            .map(|d| d.effective_priority())
            .max()
            .unwrap_or_default();
        candidates.retain(|d| d.is_alternative() && d.effective_priority() == top);
    }

    match candidates.as_slice() {
        [] => Err(Error::Unsatisfied {
            capability: capability.name().to_string(),
            qualifiers: query.to_string(),
        }),
        [winner] => Ok(*winner),
        many => Err(Error::Ambiguous {
            capability: capability.name().to_string(),
            qualifiers: query.to_string(),
            candidates: many.iter().map(|d| d.name().to_string()).collect(),
        }),
    }
}
