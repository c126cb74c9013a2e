//! # Dependency graph checks.
//!
//! Two complementary checks keep resolution from looping:
//! - [`verify`] runs once at build time over the **declared** dependencies of
//!   every enabled descriptor.
//! - [`ResolutionGuard`] tracks the descriptors being constructed on the current
//!   thread and turns an undeclared re-entrant resolution into
//!   [`Error::DependencyCycle`] instead of a deadlock.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::resolver;
use crate::error::{Error, Result};
use crate::registry::{ComponentDescriptor, Registry};

enum Mark {
    Visiting,
    Done,
}

/// Checks that declared dependencies resolve uniquely and form no cycle.
///
/// ### Errors
/// - [`Error::InvalidDependency`] when a dependency is unsatisfied or ambiguous.
/// - [`Error::DependencyCycle`] with the component path, first and last equal.
pub(crate) fn verify(registry: &Registry) -> Result<()> {
    let components = registry.components();
    let mut edges: HashMap<usize, Vec<usize>> = HashMap::new();

    for desc in components.iter().filter(|d| d.is_enabled()) {
        for dep in desc.dependencies() {
            let target = resolver::select(registry, dep.capability, &dep.qualifiers).map_err(|err| {
                Error::InvalidDependency {
                    component: desc.name().to_string(),
                    dependency: dep.to_string(),
                    source: Box::new(err),
                }
            })?;
            edges.entry(desc.seq()).or_default().push(target.seq());
        }
    }

    let mut marks = HashMap::new();
    let mut path = Vec::new();
    for desc in components.iter().filter(|d| d.is_enabled()) {
        visit(desc.seq(), &edges, &mut marks, &mut path, components)?;
    }
    Ok(())
}

fn visit(
    node: usize,
    edges: &HashMap<usize, Vec<usize>>,
    marks: &mut HashMap<usize, Mark>,
    path: &mut Vec<usize>,
    components: &[ComponentDescriptor],
) -> Result<()> {
    match marks.get(&node) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|n| *n == node).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .map(|n| components[*n].name().to_string())
                .collect();
            cycle.push(components[node].name().to_string());
            return Err(Error::DependencyCycle { path: cycle });
        }
        None => {}
    }

    marks.insert(node, Mark::Visiting);
    path.push(node);
    for next in edges.get(&node).into_iter().flatten() {
        visit(*next, edges, marks, path, components)?;
    }
    path.pop();
    marks.insert(node, Mark::Done);
    Ok(())
}

thread_local! {
    /// `(container address, descriptor seq, component name)` under construction.
    static RESOLVING: RefCell<Vec<(usize, usize, String)>> = const { RefCell::new(Vec::new()) };
}

/// Marks a descriptor as being constructed on this thread until dropped.
pub(crate) struct ResolutionGuard {
    _private: (),
}

impl ResolutionGuard {
    /// Enters construction of `desc` in the container identified by `container`.
    pub(crate) fn enter(container: usize, desc: &ComponentDescriptor) -> Result<Self> {
        RESOLVING.with_borrow_mut(|stack| {
            if let Some(pos) = stack
                .iter()
                .position(|(c, seq, _)| *c == container && *seq == desc.seq())
            {
                let mut path: Vec<String> = stack[pos..].iter().map(|(_, _, name)| name.clone()).collect();
                path.push(desc.name().to_string());
                return Err(Error::DependencyCycle { path });
            }
            stack.push((container, desc.seq(), desc.name().to_string()));
            Ok(ResolutionGuard { _private: () })
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLVING.with_borrow_mut(|stack| {
            stack.pop();
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::registry::{Capability, Lifecycle, Qualifiers};

    struct A;
    impl Lifecycle for A {}
    impl Capability for A {}

    struct B;
    impl Lifecycle for B {}
    impl Capability for B {}

    fn a() -> ComponentDescriptor {
        ComponentDescriptor::new::<A, _>("a", |_| Ok(Arc::new(A)))
    }

    fn b() -> ComponentDescriptor {
        ComponentDescriptor::new::<B, _>("b", |_| Ok(Arc::new(B)))
    }

    fn registry(descs: Vec<ComponentDescriptor>) -> Registry {
        let mut reg = Registry::new(Arc::new(Config::default()));
        for d in descs {
            reg.register(d).unwrap();
        }
        reg
    }

    #[test]
    fn acyclic_graph_passes() {
        let reg = registry(vec![a().depends_on::<B>(Qualifiers::none()), b()]);
        assert!(verify(&reg).is_ok());
    }

    #[test]
    fn cycle_is_reported_with_path() {
        let reg = registry(vec![
            a().depends_on::<B>(Qualifiers::none()),
            b().depends_on::<A>(Qualifiers::none()),
        ]);
        assert_eq!(
            verify(&reg),
            Err(Error::DependencyCycle {
                path: vec!["a".into(), "b".into(), "a".into()]
            })
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let reg = registry(vec![a().depends_on::<A>(Qualifiers::none())]);
        assert_eq!(verify(&reg).unwrap_err().as_label(), "dependency_cycle");
    }

    #[test]
    fn missing_dependency_is_invalid() {
        let reg = registry(vec![a().depends_on::<B>(Qualifiers::of([("kind", "x")]))]);
        let err = verify(&reg).unwrap_err();
        assert_eq!(err.as_label(), "dependency_invalid");
        let Error::InvalidDependency { source, .. } = err else {
            panic!("expected invalid dependency");
        };
        assert_eq!(source.as_label(), "resolution_unsatisfied");
    }

    #[test]
    fn guard_detects_reentry() {
        let reg = registry(vec![a()]);
        let desc = &reg.components()[0];

        let outer = ResolutionGuard::enter(1, desc).unwrap();
        let err = ResolutionGuard::enter(1, desc).err().unwrap();
        assert_eq!(
            err,
            Error::DependencyCycle {
                path: vec!["a".into(), "a".into()]
            }
        );
        // Same descriptor index in another container is unrelated.
        let other = ResolutionGuard::enter(2, desc).unwrap();
        drop(other);
        drop(outer);
        assert!(ResolutionGuard::enter(1, desc).is_ok());
    }
}
