//! # Decorator composition.
//!
//! ```text
//! decorators (ascending priority): D(10), D(20), D(30)
//!
//! handle = D(10) ─► D(20) ─► D(30) ─► raw instance
//!          outer                      inner
//! ```
//!
//! Composition starts at the innermost decorator (highest priority) and works
//! outwards, so each layer receives the fully built layer beneath it.

use std::sync::Arc;

use crate::decorate::DecoratorDescriptor;
use crate::error::Result;
use crate::registry::Capability;

/// Wraps `raw` with `decorators`, which must be sorted outermost first.
pub(crate) fn compose<'a, C, I>(decorators: I, raw: Arc<C>) -> Result<Arc<C>>
where
    C: Capability + ?Sized,
    I: IntoIterator<Item = &'a DecoratorDescriptor>,
    I::IntoIter: DoubleEndedIterator,
{
    decorators
        .into_iter()
        .rev()
        .try_fold(raw, |inner, decorator| {
            tracing::debug!(decorator = decorator.name(), priority = decorator.priority(), "decorating");
            decorator.apply(inner)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::Delegate;
    use crate::error::Error;
    use crate::registry::{Lifecycle, Qualifiers};

    trait Greeter: Lifecycle + Send + Sync {
        fn greet(&self) -> Result<String>;
    }
    impl Capability for dyn Greeter {}

    struct Plain;
    impl Lifecycle for Plain {}
    impl Greeter for Plain {
        fn greet(&self) -> Result<String> {
            Ok("hi".into())
        }
    }

    struct Tag {
        tag: &'static str,
        inner: Delegate<dyn Greeter>,
    }
    impl Lifecycle for Tag {}
    impl Greeter for Tag {
        fn greet(&self) -> Result<String> {
            Ok(format!("{}({})", self.tag, self.inner.greet()?))
        }
    }

    fn tag(tag: &'static str, priority: i32) -> DecoratorDescriptor {
        DecoratorDescriptor::new::<dyn Greeter, _>(tag, priority, move |inner| {
            let layer: Arc<dyn Greeter> = Arc::new(Tag { tag, inner });
            Ok(layer)
        })
    }

    #[test]
    fn lowest_priority_is_outermost() {
        let decorators = [tag("a", 10), tag("b", 20), tag("c", 30)];
        let raw: Arc<dyn Greeter> = Arc::new(Plain);
        let handle = compose(decorators.iter(), raw).unwrap();
        assert_eq!(handle.greet().unwrap(), "a(b(c(hi)))");
    }

    #[test]
    fn failing_decorator_aborts_composition() {
        let broken = DecoratorDescriptor::new::<dyn Greeter, _>("broken", 5, |_| {
            Err(Error::component("broken", "cannot wrap"))
        });
        let raw: Arc<dyn Greeter> = Arc::new(Plain);
        let err = compose([&broken], raw).err().unwrap();
        assert_eq!(err.as_label(), "component_failed");
    }

    #[test]
    fn qualifier_filter_limits_targets() {
        use crate::registry::ComponentDescriptor;

        let file = ComponentDescriptor::new::<dyn Greeter, _>("file", |_| {
            let g: Arc<dyn Greeter> = Arc::new(Plain);
            Ok(g)
        })
        .with_qualifier("kind", "persistent");
        let memory = ComponentDescriptor::new::<dyn Greeter, _>("memory", |_| {
            let g: Arc<dyn Greeter> = Arc::new(Plain);
            Ok(g)
        })
        .with_qualifier("kind", "in-memory");

        let only_file = tag("audit", 1).with_qualifiers(Qualifiers::of([("kind", "persistent")]));
        assert!(only_file.applies_to(&file));
        assert!(!only_file.applies_to(&memory));
        assert!(tag("any", 1).applies_to(&memory));
    }
}
