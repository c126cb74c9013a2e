//! # Registry: the passive descriptor store.
//!
//! Collects every [`ComponentDescriptor`], [`InterceptorDescriptor`] and
//! [`DecoratorDescriptor`] during startup. Once the container is built the
//! registry is read-only.
//!
//! ## Rules
//! - `enabled` is computed exactly once, in [`Registry::register`].
//! - Component names are unique.
//! - Two enabled non-alternative descriptors with the same
//!   `(capability, qualifiers, scope)` triple are rejected.
//! - Interceptors are ordered by ascending priority, ties by registration order.
//! - Decorators are ordered by ascending priority (lower = outer), ties by
//!   registration order.

use std::sync::Arc;

use crate::config::Config;
use crate::decorate::DecoratorDescriptor;
use crate::error::{Error, Result};
use crate::intercept::InterceptorDescriptor;
use crate::registry::{CapabilityId, ComponentDescriptor};

/// Store of everything registered at startup.
pub struct Registry {
    config: Arc<Config>,
    components: Vec<ComponentDescriptor>,
    interceptors: Vec<InterceptorDescriptor>,
    decorators: Vec<DecoratorDescriptor>,
}

impl Registry {
    /// Creates an empty registry evaluating exclusions against `config`.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            components: Vec::new(),
            interceptors: Vec::new(),
            decorators: Vec::new(),
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Registers a component descriptor.
    ///
    /// Evaluates the exclusion predicate and alternative selection once and
    /// stores the result on the descriptor.
    ///
    /// ### Errors
    /// - [`Error::DuplicateRegistration`] if the name is taken, or if an enabled
    ///   non-alternative descriptor with the same capability, qualifiers and scope
    ///   is already present.
    pub fn register(&mut self, mut desc: ComponentDescriptor) -> Result<()> {
        if let Some(existing) = self.components.iter().find(|d| d.name() == desc.name()) {
            return Err(Error::DuplicateRegistration {
                component: desc.name().to_string(),
                existing: existing.name().to_string(),
            });
        }

        desc.enabled = desc.evaluate_enabled(&self.config);
        desc.seq = self.components.len();

        if desc.enabled && !desc.is_alternative() {
            let clash = self.components.iter().find(|d| {
                d.enabled
                    && !d.is_alternative()
                    && d.capability() == desc.capability()
                    && d.qualifiers() == desc.qualifiers()
                    && d.scope() == desc.scope()
            });
            if let Some(existing) = clash {
                return Err(Error::DuplicateRegistration {
                    component: desc.name().to_string(),
                    existing: existing.name().to_string(),
                });
            }
        }

        if desc.enabled {
            tracing::debug!(
                component = desc.name(),
                capability = desc.capability().name(),
                qualifiers = %desc.qualifiers(),
                scope = desc.scope().as_str(),
                "component registered"
            );
        } else {
            tracing::debug!(component = desc.name(), stage = %self.config.project_stage, "component disabled");
        }
        self.components.push(desc);
        Ok(())
    }

    /// Registers an interceptor.
    pub fn register_interceptor(&mut self, mut desc: InterceptorDescriptor) {
        desc.seq = self.interceptors.len();
        self.interceptors.push(desc);
        self.interceptors.sort_by_key(|d| (d.priority(), d.seq));
    }

    /// Registers a decorator.
    pub fn register_decorator(&mut self, mut desc: DecoratorDescriptor) {
        desc.seq = self.decorators.len();
        self.decorators.push(desc);
        self.decorators.sort_by_key(|d| (d.priority(), d.seq));
    }

    /// Enabled descriptors of `capability` across all qualifier sets, in
    /// registration order.
    pub fn all_enabled(&self, capability: CapabilityId) -> impl Iterator<Item = &ComponentDescriptor> {
        self.components
            .iter()
            .filter(move |d| d.enabled && d.capability() == capability)
    }

    /// Every registered descriptor, enabled or not.
    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    /// Interceptors bound to `desc`, in invocation order.
    pub fn interceptors_for<'a>(
        &'a self,
        desc: &'a ComponentDescriptor,
    ) -> impl Iterator<Item = &'a InterceptorDescriptor> {
        self.interceptors
            .iter()
            .filter(move |i| desc.bindings().iter().any(|b| b == i.binding()))
    }

    /// Decorators applying to `desc`, outermost first.
    pub fn decorators_for<'a>(
        &'a self,
        desc: &'a ComponentDescriptor,
    ) -> impl DoubleEndedIterator<Item = &'a DecoratorDescriptor> {
        self.decorators.iter().filter(move |d| d.applies_to(desc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectStage;
    use crate::intercept::{Interceptor, InvocationContext};
    use crate::registry::{Capability, Lifecycle, Qualifiers, Scope};

    struct Probe;
    impl Lifecycle for Probe {}
    impl Capability for Probe {}

    fn probe(name: &str) -> ComponentDescriptor {
        ComponentDescriptor::new::<Probe, _>(name, |_| Ok(Arc::new(Probe)))
    }

    fn registry(config: Config) -> Registry {
        Registry::new(Arc::new(config))
    }

    #[test]
    fn rejects_identical_triple() {
        let mut reg = registry(Config::default());
        reg.register(probe("a").with_qualifier("kind", "x")).unwrap();

        let err = reg.register(probe("b").with_qualifier("kind", "x")).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateRegistration {
                component: "b".into(),
                existing: "a".into()
            }
        );

        // Different scope or an alternative is not a duplicate.
        reg.register(probe("c").with_qualifier("kind", "x").with_scope(Scope::Singleton))
            .unwrap();
        reg.register(probe("d").with_qualifier("kind", "x").with_alternative(Some(5)))
            .unwrap();
    }

    #[test]
    fn rejects_duplicate_name() {
        let mut reg = registry(Config::default());
        reg.register(probe("a")).unwrap();
        let err = reg.register(probe("a").with_qualifier("k", "v")).unwrap_err();
        assert_eq!(err.as_label(), "registration_duplicate");
    }

    #[test]
    fn disabled_descriptors_do_not_clash_and_are_hidden() {
        let cfg = Config::default().with_project_stage(ProjectStage::UnitTest);
        let mut reg = registry(cfg);
        reg.register(probe("file").exclude_if(|c| c.project_stage == ProjectStage::UnitTest))
            .unwrap();
        reg.register(probe("memory")).unwrap();

        let names: Vec<_> = reg
            .all_enabled(CapabilityId::of::<Probe>())
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, ["memory"]);
        assert_eq!(reg.components().len(), 2);
    }

    #[test]
    fn all_enabled_keeps_registration_order() {
        let mut reg = registry(Config::default());
        reg.register(probe("z").with_qualifier("k", "1")).unwrap();
        reg.register(probe("a").with_qualifier("k", "2")).unwrap();
        reg.register(probe("m").with_alternative(Some(1))).unwrap();

        let names: Vec<_> = reg
            .all_enabled(CapabilityId::of::<Probe>())
            .map(|d| d.name())
            .collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert!(reg.all_enabled(CapabilityId::of::<Qualifiers>()).next().is_none());
    }

    struct Named(&'static str);

    impl Interceptor for Named {
        fn around(&self, ctx: &mut InvocationContext<'_, '_>) {
            ctx.proceed();
        }

        fn name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn chains_sort_by_priority_then_registration() {
        let mut reg = registry(Config::default());
        reg.register_interceptor(InterceptorDescriptor::new("traced", 1000, Arc::new(Named("timer"))));
        reg.register_interceptor(InterceptorDescriptor::new("traced", 900, Arc::new(Named("log"))));
        reg.register_interceptor(InterceptorDescriptor::new("other", 1, Arc::new(Named("unbound"))));
        reg.register_interceptor(InterceptorDescriptor::new("traced", 900, Arc::new(Named("audit"))));
        for (name, priority) in [("d20", 20), ("d10", 10), ("d10b", 10)] {
            reg.register_decorator(DecoratorDescriptor::new::<Probe, _>(name, priority, |_| Ok(Arc::new(Probe))));
        }
        reg.register(probe("p").with_binding("traced")).unwrap();

        let desc = &reg.components()[0];
        let interceptors: Vec<_> = reg
            .interceptors_for(desc)
            .map(|i| i.interceptor().name())
            .collect();
        assert_eq!(interceptors, ["log", "audit", "timer"]);

        let decorators: Vec<_> = reg.decorators_for(desc).map(|d| d.name()).collect();
        assert_eq!(decorators, ["d10", "d10b", "d20"]);
    }
}
