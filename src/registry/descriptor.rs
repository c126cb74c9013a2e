//! # Component descriptors.
//!
//! A [`ComponentDescriptor`] describes one concrete component: the capability it
//! provides, its qualifiers, scope, alternative status, interceptor bindings,
//! declared dependencies and the factory that builds it.
//!
//! Descriptors are created with [`ComponentDescriptor::new`] and refined with
//! `with_*` builders, then handed to the registry. They are immutable afterwards.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use taskforge::{Capability, ComponentDescriptor, Lifecycle, Scope};
//!
//! struct Clock;
//! impl Lifecycle for Clock {}
//! impl Capability for Clock {}
//!
//! let desc = ComponentDescriptor::new::<Clock, _>("clock", |_| Ok(Arc::new(Clock)))
//!     .with_qualifier("tz", "utc")
//!     .with_scope(Scope::Singleton);
//! assert_eq!(desc.name(), "clock");
//! assert!(!desc.is_default_eligible());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::core::Container;
use crate::error::{Error, Result};
use crate::registry::{Capability, CapabilityId, Qualifiers};

/// Builds an instance of capability `C`, resolving dependencies from the container.
pub type Factory<C> = Arc<dyn Fn(&Container) -> Result<Arc<C>> + Send + Sync>;

/// Predicate deciding, once at registration, whether a descriptor is excluded.
pub type ExcludePredicate = Arc<dyn Fn(&Config) -> bool + Send + Sync>;

/// Instance lifetime policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// One instance per descriptor for the runtime lifetime.
    Singleton,
    /// A fresh instance for every resolution, owned by the caller.
    #[default]
    PerLookup,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Singleton => "singleton",
            Scope::PerLookup => "per_lookup",
        }
    }
}

/// Named bundle of a scope and interceptor bindings.
///
/// Applying a stereotype sets the scope and appends its bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stereotype {
    name: &'static str,
    scope: Scope,
    bindings: Vec<&'static str>,
}

impl Stereotype {
    /// Creates a custom stereotype.
    pub fn new(name: &'static str, scope: Scope, bindings: &[&'static str]) -> Self {
        Self {
            name,
            scope,
            bindings: bindings.to_vec(),
        }
    }

    /// Business service: per-lookup, logged and timed.
    pub fn service() -> Self {
        Self::new(
            "service",
            Scope::PerLookup,
            &[crate::intercept::LOGGED, crate::intercept::TIMED],
        )
    }

    /// Data repository: one shared instance.
    pub fn repository() -> Self {
        Self::new("repository", Scope::Singleton, &[])
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn bindings(&self) -> &[&'static str] {
        &self.bindings
    }
}

/// A declared dependency on another capability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
    /// Required capability.
    pub capability: CapabilityId,
    /// Qualifier query used to select the provider.
    pub qualifiers: Qualifiers,
}

impl Dependency {
    /// Dependency on `C` selected by `qualifiers`.
    pub fn on<C: Capability + ?Sized>(qualifiers: Qualifiers) -> Self {
        Self {
            capability: CapabilityId::of::<C>(),
            qualifiers,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.capability, self.qualifiers)
    }
}

/// Immutable description of one component.
pub struct ComponentDescriptor {
    name: String,
    capability: CapabilityId,
    qualifiers: Qualifiers,
    scope: Scope,
    alternative: bool,
    priority: Option<i32>,
    default_eligible: Option<bool>,
    bindings: Vec<String>,
    dependencies: Vec<Dependency>,
    exclude: Option<ExcludePredicate>,
    factory: Box<dyn Any + Send + Sync>,

    // Assigned by the registry.
    pub(crate) enabled: bool,
    pub(crate) seq: usize,
}

impl ComponentDescriptor {
    /// Creates a per-lookup, non-alternative descriptor for capability `C`.
    ///
    /// ### Parameters
    /// - `name`: unique component name (used in logs and errors)
    /// - `factory`: builds the raw instance; may resolve dependencies from the container
    pub fn new<C, F>(name: impl Into<String>, factory: F) -> Self
    where
        C: Capability + ?Sized,
        F: Fn(&Container) -> Result<Arc<C>> + Send + Sync + 'static,
    {
        let factory: Factory<C> = Arc::new(factory);
        Self {
            name: name.into(),
            capability: CapabilityId::of::<C>(),
            qualifiers: Qualifiers::none(),
            scope: Scope::default(),
            alternative: false,
            priority: None,
            default_eligible: None,
            bindings: Vec::new(),
            dependencies: Vec::new(),
            exclude: None,
            factory: Box::new(factory),
            enabled: true,
            seq: 0,
        }
    }

    /// Returns a new descriptor with the tag `key=value` added.
    #[must_use]
    pub fn with_qualifier(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.qualifiers = self.qualifiers.with(key, value);
        self
    }

    /// Returns a new descriptor with the qualifier set replaced.
    #[must_use]
    pub fn with_qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    /// Returns a new descriptor with updated scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Marks the descriptor as an alternative.
    ///
    /// With `Some(priority)` it is enabled globally and ranks by priority. With
    /// `None` it is enabled only when its name is listed in
    /// [`Config::selected_alternatives`], and then ranks with priority `0`.
    #[must_use]
    pub fn with_alternative(mut self, priority: Option<i32>) -> Self {
        self.alternative = true;
        self.priority = priority;
        self
    }

    /// Appends an interceptor binding.
    #[must_use]
    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        let binding = binding.into();
        if !self.bindings.contains(&binding) {
            self.bindings.push(binding);
        }
        self
    }

    /// Applies a stereotype: sets its scope and appends its bindings.
    #[must_use]
    pub fn with_stereotype(mut self, stereotype: &Stereotype) -> Self {
        self.scope = stereotype.scope();
        for binding in stereotype.bindings() {
            self = self.with_binding(*binding);
        }
        self
    }

    /// Declares a dependency on capability `D` selected by `qualifiers`.
    ///
    /// Checked when the container is built: it must resolve to exactly one
    /// descriptor, and the dependency graph must be acyclic.
    #[must_use]
    pub fn depends_on<D: Capability + ?Sized>(mut self, qualifiers: Qualifiers) -> Self {
        self.dependencies.push(Dependency::on::<D>(qualifiers));
        self
    }

    /// Overrides whether the descriptor answers the empty (default) query.
    ///
    /// By default only descriptors without qualifiers are default-eligible.
    #[must_use]
    pub fn default_eligible(mut self, eligible: bool) -> Self {
        self.default_eligible = Some(eligible);
        self
    }

    /// Excludes the descriptor when `predicate` holds for the registry's config.
    ///
    /// Evaluated once, at registration.
    #[must_use]
    pub fn exclude_if(mut self, predicate: impl Fn(&Config) -> bool + Send + Sync + 'static) -> Self {
        self.exclude = Some(Arc::new(predicate));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capability(&self) -> CapabilityId {
        self.capability
    }

    pub fn qualifiers(&self) -> &Qualifiers {
        &self.qualifiers
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_alternative(&self) -> bool {
        self.alternative
    }

    /// Declared priority (alternatives only).
    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    /// Priority used for alternative ranking; selected alternatives without a
    /// declared priority rank as `0`.
    pub fn effective_priority(&self) -> i32 {
        self.priority.unwrap_or(0)
    }

    pub fn is_default_eligible(&self) -> bool {
        self.default_eligible
            .unwrap_or_else(|| self.qualifiers.is_empty())
    }

    /// Whether the descriptor survived registration-time filtering.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Registration order within the registry.
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// Evaluates the exclusion predicate and alternative selection for `config`.
    pub(crate) fn evaluate_enabled(&self, config: &Config) -> bool {
        if self.exclude.as_ref().is_some_and(|excluded| excluded(config)) {
            return false;
        }
        !self.alternative || self.priority.is_some() || config.is_alternative_selected(&self.name)
    }

    /// Typed factory for capability `C`.
    pub(crate) fn factory<C: Capability + ?Sized>(&self) -> Result<Factory<C>> {
        self.factory
            .downcast_ref::<Factory<C>>()
            .cloned()
            .ok_or_else(|| {
                Error::component(
                    self.name.as_str(),
                    format!("factory does not produce {}", CapabilityId::of::<C>()),
                )
            })
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("capability", &self.capability)
            .field("qualifiers", &self.qualifiers)
            .field("scope", &self.scope)
            .field("alternative", &self.alternative)
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectStage;
    use crate::registry::Lifecycle;

    struct Probe;
    impl Lifecycle for Probe {}
    impl Capability for Probe {}

    fn probe(name: &str) -> ComponentDescriptor {
        ComponentDescriptor::new::<Probe, _>(name, |_| Ok(Arc::new(Probe)))
    }

    #[test]
    fn service_stereotype_applies_scope_and_bindings() {
        let desc = probe("svc")
            .with_scope(Scope::Singleton)
            .with_binding("logged")
            .with_stereotype(&Stereotype::service());
        assert_eq!(desc.scope(), Scope::PerLookup);
        assert_eq!(desc.bindings(), ["logged", "timed"]);
    }

    #[test]
    fn default_eligibility_follows_qualifiers() {
        assert!(probe("a").is_default_eligible());
        assert!(!probe("b").with_qualifier("kind", "x").is_default_eligible());
        assert!(
            probe("c")
                .with_qualifier("kind", "x")
                .default_eligible(true)
                .is_default_eligible()
        );
    }

    #[test]
    fn enabled_rules() {
        let cfg = Config::default().with_project_stage(ProjectStage::UnitTest);

        let excluded = probe("file").exclude_if(|c| c.project_stage == ProjectStage::UnitTest);
        assert!(!excluded.evaluate_enabled(&cfg));
        assert!(excluded.evaluate_enabled(&Config::default()));

        let unselected = probe("alt").with_alternative(None);
        assert!(!unselected.evaluate_enabled(&cfg));
        let cfg = cfg.with_selected_alternative("alt");
        assert!(unselected.evaluate_enabled(&cfg));
        assert_eq!(unselected.effective_priority(), 0);

        assert!(probe("ranked").with_alternative(Some(1000)).evaluate_enabled(&Config::default()));
    }

    #[test]
    fn factory_downcast_checks_capability() {
        trait Other: Send + Sync {}
        impl Lifecycle for dyn Other {}
        impl Capability for dyn Other {}

        let desc = probe("p");
        assert!(desc.factory::<Probe>().is_ok());
        assert!(desc.factory::<dyn Other>().is_err());
    }
}
