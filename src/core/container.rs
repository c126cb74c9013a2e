//! # Container: the context object owned by the entry point.
//!
//! The [`Container`] ties together the registry, the scope manager and the event
//! bus. It is created by [`ContainerBuilder::build`](crate::ContainerBuilder::build)
//! and shut down explicitly by whoever built it.
//!
//! ## Resolution path
//! ```text
//! resolve::<C>(qualifiers)
//!   ├─► resolver::select(registry, C, qualifiers)   → one descriptor or error
//!   ├─► ResolutionGuard::enter                      → re-entrant construction = cycle
//!   └─► scope
//!         ├─ Singleton: ScopeManager::get_or_create  (exactly once, handle cached)
//!         └─ PerLookup: fresh every time
//!               construct: factory(container) ─► post_construct
//!               compose:   decorators (outer = lowest priority)
//!                          ─► interceptors (C::intercept with the bound chain)
//! ```
//!
//! ## Shutdown
//! ```text
//! shutdown()
//!   ├─► publish ContainerEvent::Stopping      (singletons still alive)
//!   ├─► closed = true                         (resolve/publish → RuntimeClosed)
//!   └─► ScopeManager::destroy_all             (reverse creation order)
//! ```
//! A second `shutdown` returns [`Error::RuntimeClosed`]. Dropping a container that
//! was never shut down destroys its singletons without publishing `Stopping`.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};

use crate::config::Config;
use crate::core::graph::ResolutionGuard;
use crate::core::scope::{Destroy, ScopeManager};
use crate::core::{ContainerBuilder, resolver};
use crate::decorate;
use crate::error::{Error, Result};
use crate::events::{ContainerEvent, ContainerEventKind, Emitter, EventBus};
use crate::intercept::{Interceptor, InterceptorChain};
use crate::registry::{Capability, CapabilityId, ComponentDescriptor, Qualifiers, Registry, Scope};

/// Runtime context: resolves components, dispatches events, owns singletons.
pub struct Container {
    me: Weak<Container>,
    registry: Registry,
    scopes: ScopeManager,
    bus: EventBus,
    stopping: AtomicBool,
    closed: AtomicBool,
}

impl Container {
    /// Starts building a container for `config`.
    pub fn builder(config: Config) -> ContainerBuilder {
        ContainerBuilder::new(config)
    }

    pub(crate) fn assemble(registry: Registry, scopes: ScopeManager, bus: EventBus) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            registry,
            scopes,
            bus,
            stopping: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        })
    }

    /// Global configuration.
    pub fn config(&self) -> &Config {
        self.registry.config()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Weak handle to this container, for components that look things up later.
    pub fn weak(&self) -> Weak<Container> {
        self.me.clone()
    }

    /// Typed publishing handle for events of type `E`.
    pub fn emitter<E: Send + Sync + 'static>(&self) -> Emitter<E> {
        Emitter::new(self.me.clone())
    }

    /// True once shutdown has closed the container.
    pub fn is_closed(&self) -> bool {
        self.closed.load(AtomicOrdering::Acquire)
    }

    /// Number of singletons currently alive.
    pub fn active_singletons(&self) -> usize {
        self.scopes.active_count()
    }

    /// Resolves capability `C` selected by `qualifiers` to a ready handle.
    ///
    /// ### Errors
    /// - [`Error::Unsatisfied`] / [`Error::Ambiguous`] from candidate selection
    /// - [`Error::RuntimeClosed`] after shutdown
    /// - [`Error::NotInterceptable`] when bindings exist but `C` cannot be woven
    /// - [`Error::DependencyCycle`] on re-entrant construction
    /// - any factory or `post_construct` error
    pub fn resolve<C: Capability + ?Sized>(&self, qualifiers: &Qualifiers) -> Result<Arc<C>> {
        self.ensure_open()?;
        let desc = resolver::select(&self.registry, CapabilityId::of::<C>(), qualifiers)?;
        self.instantiate(desc)
    }

    /// Resolves every enabled component of `C`, in registration order.
    ///
    /// Alternative suppression does not apply.
    pub fn resolve_all<C: Capability + ?Sized>(&self) -> Result<Vec<Arc<C>>> {
        Ok(self
            .resolve_all_named::<C>()?
            .into_iter()
            .map(|(_, instance)| instance)
            .collect())
    }

    /// Like [`Container::resolve_all`], paired with component names.
    pub fn resolve_all_named<C: Capability + ?Sized>(&self) -> Result<Vec<(String, Arc<C>)>> {
        self.ensure_open()?;
        self.registry
            .all_enabled(CapabilityId::of::<C>())
            .map(|desc| Ok((desc.name().to_string(), self.instantiate::<C>(desc)?)))
            .collect()
    }

    /// Publishes `event` to every matching observer before returning.
    ///
    /// ### Errors
    /// - [`Error::RuntimeClosed`] after shutdown
    /// - the first observer error, unchanged (remaining observers are skipped)
    pub fn publish<E: Send + Sync + 'static>(&self, event: &E) -> Result<()> {
        self.ensure_open()?;
        self.bus.dispatch(self, event).map(|_| ())
    }

    /// Shuts the container down: publishes `Stopping`, then destroys every active
    /// singleton exactly once.
    ///
    /// ### Errors
    /// - [`Error::RuntimeClosed`] if shutdown already ran
    /// - [`Error::Destruction`] listing failed `pre_destroy` hooks
    /// - a `Stopping` observer error (destruction still runs)
    pub fn shutdown(&self) -> Result<()> {
        if self.stopping.swap(true, AtomicOrdering::AcqRel) {
            return Err(Error::RuntimeClosed);
        }
        tracing::info!(singletons = self.scopes.active_count(), "container stopping");

        let notified = self
            .bus
            .dispatch(self, &ContainerEvent::new(ContainerEventKind::Stopping))
            .map(|_| ());
        self.closed.store(true, AtomicOrdering::Release);
        let destroyed = self.scopes.destroy_all();

        tracing::info!(ok = destroyed.is_ok(), "container stopped");
        destroyed.and(notified)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(Error::RuntimeClosed)
        } else {
            Ok(())
        }
    }

    fn instantiate<C: Capability + ?Sized>(&self, desc: &ComponentDescriptor) -> Result<Arc<C>> {
        let _guard = ResolutionGuard::enter(self as *const Self as usize, desc)?;

        match desc.scope() {
            Scope::Singleton => self.scopes.get_or_create(desc.seq(), || {
                let raw = self.construct::<C>(desc)?;
                let handle = self.compose(desc, raw.clone())?;
                let destroy: Destroy = Box::new(move || raw.pre_destroy());
                Ok((handle, destroy))
            }),
            Scope::PerLookup => {
                let raw = self.construct::<C>(desc)?;
                self.compose(desc, raw)
            }
        }
    }

    fn construct<C: Capability + ?Sized>(&self, desc: &ComponentDescriptor) -> Result<Arc<C>> {
        let factory = desc.factory::<C>()?;
        let instance = factory(self)?;
        if let Err(err) = instance.post_construct() {
            tracing::warn!(component = desc.name(), error = %err, "post_construct failed");
            return Err(err);
        }
        tracing::debug!(component = desc.name(), scope = desc.scope().as_str(), "constructed");
        Ok(instance)
    }

    fn compose<C: Capability + ?Sized>(&self, desc: &ComponentDescriptor, raw: Arc<C>) -> Result<Arc<C>> {
        let handle = decorate::compose(self.registry.decorators_for(desc), raw)?;
        if desc.bindings().is_empty() {
            return Ok(handle);
        }

        let interceptors: Vec<Arc<dyn Interceptor>> = self
            .registry
            .interceptors_for(desc)
            .map(|i| i.interceptor().clone())
            .collect();
        let chain = InterceptorChain::new(desc.name(), interceptors);
        C::intercept(handle, chain).ok_or_else(|| Error::NotInterceptable {
            capability: desc.capability().name().to_string(),
        })
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        if self.stopping.swap(true, AtomicOrdering::AcqRel) {
            return;
        }
        self.closed.store(true, AtomicOrdering::Release);
        tracing::debug!("container dropped without shutdown");
        if let Err(err) = self.scopes.destroy_all() {
            tracing::warn!(error = %err, "singleton destruction failed on drop");
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("stage", &self.config().project_stage)
            .field("components", &self.registry.components().len())
            .field("observers", &self.bus.observers().len())
            .field("active_singletons", &self.scopes.active_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;
    use crate::config::ProjectStage;
    use crate::decorate::{DecoratorDescriptor, Delegate};
    use crate::events::ObserverDescriptor;
    use crate::intercept::{InterceptorDescriptor, InvocationContext};
    use crate::registry::Lifecycle;

    type Trace = Arc<Mutex<Vec<String>>>;

    trait Counter: Lifecycle + Send + Sync {
        fn bump(&self) -> Result<usize>;
    }

    struct WovenCounter {
        inner: Arc<dyn Counter>,
        chain: InterceptorChain,
    }

    impl Lifecycle for WovenCounter {}

    impl Counter for WovenCounter {
        fn bump(&self) -> Result<usize> {
            self.chain.invoke("bump", || self.inner.bump())
        }
    }

    impl Capability for dyn Counter {
        fn intercept(target: Arc<Self>, chain: InterceptorChain) -> Option<Arc<Self>> {
            Some(Arc::new(WovenCounter { inner: target, chain }))
        }
    }

    struct Plain {
        name: &'static str,
        hits: AtomicUsize,
        trace: Trace,
        fail_destroy: bool,
    }

    impl Lifecycle for Plain {
        fn pre_destroy(&self) -> Result<()> {
            self.trace.lock().push(format!("destroy-{}", self.name));
            if self.fail_destroy {
                Err(Error::component(self.name, "disk full"))
            } else {
                Ok(())
            }
        }
    }

    impl Counter for Plain {
        fn bump(&self) -> Result<usize> {
            self.trace.lock().push("target".into());
            Ok(self.hits.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    fn counter(name: &'static str, trace: &Trace) -> ComponentDescriptor {
        counter_with(name, trace, false)
    }

    fn counter_with(name: &'static str, trace: &Trace, fail_destroy: bool) -> ComponentDescriptor {
        let trace = trace.clone();
        ComponentDescriptor::new::<dyn Counter, _>(name, move |_| {
            let c: Arc<dyn Counter> = Arc::new(Plain {
                name,
                hits: AtomicUsize::new(0),
                trace: trace.clone(),
                fail_destroy,
            });
            Ok(c)
        })
    }

    struct Recorder {
        trace: Trace,
    }

    impl Interceptor for Recorder {
        fn around(&self, ctx: &mut InvocationContext<'_, '_>) {
            self.trace.lock().push(format!("enter-{}", ctx.method()));
            let outcome = ctx.proceed();
            let tag = if outcome.is_returned() { "exit" } else { "fail" };
            self.trace.lock().push(format!("{tag}-{}", ctx.method()));
        }
    }

    fn q(kind: &str) -> Qualifiers {
        Qualifiers::of([("kind", kind)])
    }

    #[test]
    fn singleton_handles_are_identical() {
        let trace = Trace::default();
        let c = Container::builder(Config::default())
            .register(counter("one", &trace).with_scope(Scope::Singleton))
            .unwrap()
            .build()
            .unwrap();

        let a = c.resolve::<dyn Counter>(&Qualifiers::none()).unwrap();
        let b = c.resolve::<dyn Counter>(&Qualifiers::none()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        a.bump().unwrap();
        assert_eq!(b.bump().unwrap(), 2);
        assert_eq!(c.active_singletons(), 1);
    }

    #[test]
    fn per_lookup_handles_are_distinct() {
        let trace = Trace::default();
        let c = Container::builder(Config::default())
            .register(counter("one", &trace))
            .unwrap()
            .build()
            .unwrap();

        let a = c.resolve::<dyn Counter>(&Qualifiers::none()).unwrap();
        let b = c.resolve::<dyn Counter>(&Qualifiers::none()).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.bump().unwrap(), 1);
        assert_eq!(b.bump().unwrap(), 1);
        assert_eq!(c.active_singletons(), 0);
    }

    #[test]
    fn failed_init_leaves_singleton_uninitialized() {
        struct Flaky;
        impl Lifecycle for Flaky {
            fn post_construct(&self) -> Result<()> {
                Err(Error::component("flaky", "not ready"))
            }
        }
        impl Capability for Flaky {}

        let attempts = Arc::new(AtomicUsize::new(0));
        let seen = attempts.clone();
        let c = Container::builder(Config::default())
            .register(
                ComponentDescriptor::new::<Flaky, _>("flaky", move |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::new(Flaky))
                })
                .with_scope(Scope::Singleton),
            )
            .unwrap()
            .build()
            .unwrap();

        assert!(c.resolve::<Flaky>(&Qualifiers::none()).is_err());
        assert!(c.resolve::<Flaky>(&Qualifiers::none()).is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(c.active_singletons(), 0);
    }

    #[test]
    fn shutdown_destroys_in_reverse_creation_order_once() {
        let trace = Trace::default();
        let c = Container::builder(Config::default())
            .register(counter("first", &trace).with_qualifier("kind", "a").with_scope(Scope::Singleton))
            .unwrap()
            .register(counter("second", &trace).with_qualifier("kind", "b").with_scope(Scope::Singleton))
            .unwrap()
            .register(counter("never", &trace).with_qualifier("kind", "c").with_scope(Scope::Singleton))
            .unwrap()
            .build()
            .unwrap();

        c.resolve::<dyn Counter>(&q("b")).unwrap();
        c.resolve::<dyn Counter>(&q("a")).unwrap();

        c.shutdown().unwrap();
        assert_eq!(*trace.lock(), ["destroy-first", "destroy-second"]);

        assert_eq!(c.shutdown(), Err(Error::RuntimeClosed));
        assert_eq!(
            c.resolve::<dyn Counter>(&q("a")).err(),
            Some(Error::RuntimeClosed)
        );
        assert_eq!(c.publish(&1u8), Err(Error::RuntimeClosed));
        assert_eq!(trace.lock().len(), 2);
    }

    #[test]
    fn destroy_failures_are_collected() {
        let trace = Trace::default();
        let c = Container::builder(Config::default())
            .register(counter_with("bad", &trace, true).with_qualifier("kind", "a").with_scope(Scope::Singleton))
            .unwrap()
            .register(counter("good", &trace).with_qualifier("kind", "b").with_scope(Scope::Singleton))
            .unwrap()
            .build()
            .unwrap();
        c.resolve::<dyn Counter>(&q("a")).unwrap();
        c.resolve::<dyn Counter>(&q("b")).unwrap();

        let err = c.shutdown().unwrap_err();
        assert_eq!(err.as_label(), "destruction_failed");
        assert!(trace.lock().contains(&"destroy-good".to_string()));
    }

    #[test]
    fn interceptors_wrap_decorators() {
        let trace = Trace::default();
        let deco_trace = trace.clone();
        let c = Container::builder(Config::default())
            .register(counter("one", &trace).with_binding("traced"))
            .unwrap()
            .interceptor(InterceptorDescriptor::new(
                "traced",
                1,
                Arc::new(Recorder { trace: trace.clone() }),
            ))
            .decorator(DecoratorDescriptor::new::<dyn Counter, _>("deco", 10, move |inner| {
                struct Deco {
                    inner: Delegate<dyn Counter>,
                    trace: Trace,
                }
                impl Lifecycle for Deco {}
                impl Counter for Deco {
                    fn bump(&self) -> Result<usize> {
                        self.trace.lock().push("decorator".into());
                        self.inner.bump()
                    }
                }
                let d: Arc<dyn Counter> = Arc::new(Deco {
                    inner,
                    trace: deco_trace.clone(),
                });
                Ok(d)
            }))
            .build()
            .unwrap();

        c.resolve::<dyn Counter>(&Qualifiers::none())
            .unwrap()
            .bump()
            .unwrap();
        assert_eq!(
            *trace.lock(),
            ["enter-bump", "decorator", "target", "exit-bump"]
        );
    }

    struct Tagged {
        tag: &'static str,
        trace: Trace,
    }

    impl Interceptor for Tagged {
        fn around(&self, ctx: &mut InvocationContext<'_, '_>) {
            self.trace.lock().push(format!("enter-{}", self.tag));
            let outcome = ctx.proceed();
            let step = if outcome.is_returned() { "exit" } else { "fail" };
            self.trace.lock().push(format!("{step}-{}", self.tag));
        }
    }

    fn tagged(tag: &'static str, priority: i32, trace: &Trace) -> InterceptorDescriptor {
        InterceptorDescriptor::new(
            "traced",
            priority,
            Arc::new(Tagged {
                tag,
                trace: trace.clone(),
            }),
        )
    }

    struct Broken {
        trace: Trace,
    }

    impl Lifecycle for Broken {}

    impl Counter for Broken {
        fn bump(&self) -> Result<usize> {
            self.trace.lock().push("target".into());
            Err(Error::validation("counter is read-only"))
        }
    }

    #[test]
    fn registered_interceptors_nest_by_priority_then_registration() {
        let trace = Trace::default();
        let broken_trace = trace.clone();
        let c = Container::builder(Config::default())
            .interceptor(tagged("1000", 1000, &trace))
            .interceptor(tagged("900", 900, &trace))
            .interceptor(tagged("900b", 900, &trace))
            .register(counter("ok", &trace).with_qualifier("kind", "ok").with_binding("traced"))
            .unwrap()
            .register(
                ComponentDescriptor::new::<dyn Counter, _>("broken", move |_| {
                    let c: Arc<dyn Counter> = Arc::new(Broken {
                        trace: broken_trace.clone(),
                    });
                    Ok(c)
                })
                .with_qualifier("kind", "broken")
                .with_binding("traced"),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(c.resolve::<dyn Counter>(&q("ok")).unwrap().bump(), Ok(1));
        assert_eq!(
            *trace.lock(),
            ["enter-900", "enter-900b", "enter-1000", "target", "exit-1000", "exit-900b", "exit-900"]
        );

        trace.lock().clear();
        let err = c.resolve::<dyn Counter>(&q("broken")).unwrap().bump().unwrap_err();
        assert_eq!(err, Error::validation("counter is read-only"));
        assert_eq!(
            *trace.lock(),
            ["enter-900", "enter-900b", "enter-1000", "target", "fail-1000", "fail-900b", "fail-900"]
        );
    }

    fn labeled(label: &'static str, priority: i32, trace: &Trace) -> DecoratorDescriptor {
        let trace = trace.clone();
        DecoratorDescriptor::new::<dyn Counter, _>(label, priority, move |inner| {
            struct Layer {
                label: &'static str,
                inner: Delegate<dyn Counter>,
                trace: Trace,
            }
            impl Lifecycle for Layer {}
            impl Counter for Layer {
                fn bump(&self) -> Result<usize> {
                    self.trace.lock().push(self.label.to_string());
                    self.inner.bump()
                }
            }
            let layer: Arc<dyn Counter> = Arc::new(Layer {
                label,
                inner,
                trace: trace.clone(),
            });
            Ok(layer)
        })
    }

    #[test]
    fn registered_decorators_nest_by_priority_then_registration() {
        let trace = Trace::default();
        let c = Container::builder(Config::default())
            .decorator(labeled("d20", 20, &trace))
            .decorator(labeled("d10", 10, &trace))
            .decorator(labeled("d10b", 10, &trace))
            .register(counter("one", &trace))
            .unwrap()
            .build()
            .unwrap();

        c.resolve::<dyn Counter>(&Qualifiers::none())
            .unwrap()
            .bump()
            .unwrap();
        assert_eq!(*trace.lock(), ["d10", "d10b", "d20", "target"]);
    }

    #[test]
    fn bindings_on_plain_capability_are_rejected() {
        struct Stats;
        impl Lifecycle for Stats {}
        impl Capability for Stats {}

        let c = Container::builder(Config::default())
            .register(ComponentDescriptor::new::<Stats, _>("stats", |_| Ok(Arc::new(Stats))).with_binding("logged"))
            .unwrap()
            .build()
            .unwrap();
        let err = c.resolve::<Stats>(&Qualifiers::none()).err().unwrap();
        assert_eq!(err.as_label(), "capability_not_interceptable");
    }

    #[test]
    fn resolve_all_ignores_alternative_suppression() {
        let trace = Trace::default();
        let c = Container::builder(Config::default())
            .register(counter("memory", &trace).with_qualifier("kind", "in-memory"))
            .unwrap()
            .register(counter("file", &trace).with_qualifier("kind", "persistent"))
            .unwrap()
            .register(counter("mock", &trace).with_alternative(Some(1000)))
            .unwrap()
            .build()
            .unwrap();

        let all = c.resolve_all_named::<dyn Counter>().unwrap();
        let names: Vec<_> = all.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["memory", "file", "mock"]);
        assert_eq!(c.resolve_all::<dyn Counter>().unwrap().len(), 3);
    }

    #[test]
    fn observers_run_in_priority_order_and_fail_fast() {
        let trace = Trace::default();
        let (t1, t2, t3) = (trace.clone(), trace.clone(), trace.clone());
        let c = Container::builder(Config::default())
            .observer(ObserverDescriptor::on::<u32>("late").call(move |n| {
                t1.lock().push(format!("late-{n}"));
                Ok(())
            }))
            .observer(ObserverDescriptor::on::<u32>("early").priority(10).call(move |n| {
                t2.lock().push(format!("early-{n}"));
                Ok(())
            }))
            .observer(
                ObserverDescriptor::on::<u32>("picky")
                    .priority(20)
                    .filter(|n| *n > 100)
                    .call(move |n| {
                        t3.lock().push(format!("picky-{n}"));
                        Err(Error::component("picky", "too big"))
                    }),
            )
            .build()
            .unwrap();

        c.publish(&7u32).unwrap();
        assert_eq!(*trace.lock(), ["early-7", "late-7"]);

        trace.lock().clear();
        let err = c.publish(&500u32).unwrap_err();
        assert_eq!(err, Error::component("picky", "too big"));
        assert_eq!(*trace.lock(), ["early-500", "picky-500"]);

        // Nobody observes strings.
        assert!(c.publish(&"unobserved").is_ok());
    }

    #[test]
    fn component_observer_follows_enabled_target() {
        let trace = Trace::default();
        let seen = trace.clone();
        let c = Container::builder(Config::default().with_project_stage(ProjectStage::UnitTest))
            .register(
                counter("file", &trace)
                    .with_qualifier("kind", "persistent")
                    .exclude_if(|cfg| cfg.project_stage == ProjectStage::UnitTest),
            )
            .unwrap()
            .register(counter("memory", &trace).with_qualifier("kind", "in-memory").with_scope(Scope::Singleton))
            .unwrap()
            .observer(
                ObserverDescriptor::on::<u32>("file-sink")
                    .component::<dyn Counter>(q("persistent"), |c, _| c.bump().map(|_| ())),
            )
            .observer(
                ObserverDescriptor::on::<u32>("memory-sink")
                    .component::<dyn Counter>(q("in-memory"), move |c, n| {
                        seen.lock().push(format!("sink-{n}"));
                        c.bump().map(|_| ())
                    }),
            )
            .build()
            .unwrap();

        assert_eq!(c.bus().observers_of::<u32>(), 1);
        c.publish(&3u32).unwrap();
        c.publish(&4u32).unwrap();

        let memory = c.resolve::<dyn Counter>(&q("in-memory")).unwrap();
        assert_eq!(memory.bump().unwrap(), 3);
        assert_eq!(*trace.lock(), ["sink-3", "target", "sink-4", "target", "target"]);
    }

    #[test]
    fn lifecycle_events_are_published() {
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let sink = kinds.clone();
        let c = Container::builder(Config::default())
            .observer(ObserverDescriptor::on::<ContainerEvent>("lifecycle").call(move |e| {
                sink.lock().push(e.kind);
                Ok(())
            }))
            .build()
            .unwrap();
        assert_eq!(*kinds.lock(), [ContainerEventKind::Started]);

        c.shutdown().unwrap();
        assert_eq!(
            *kinds.lock(),
            [ContainerEventKind::Started, ContainerEventKind::Stopping]
        );
    }

    #[test]
    fn undeclared_reentry_is_a_cycle() {
        struct Loop;
        impl Lifecycle for Loop {}
        impl Capability for Loop {}

        let c = Container::builder(Config::default())
            .register(
                ComponentDescriptor::new::<Loop, _>("loop", |c| {
                    c.resolve::<Loop>(&Qualifiers::none())?;
                    Ok(Arc::new(Loop))
                })
                .with_scope(Scope::Singleton),
            )
            .unwrap()
            .build()
            .unwrap();

        let err = c.resolve::<Loop>(&Qualifiers::none()).err().unwrap();
        assert_eq!(
            err,
            Error::DependencyCycle {
                path: vec!["loop".into(), "loop".into()]
            }
        );
    }

    #[test]
    fn emitter_fails_once_container_is_gone() {
        let c = Container::builder(Config::default()).build().unwrap();
        let emitter = c.emitter::<u32>();
        assert!(emitter.fire(1).is_ok());

        c.shutdown().unwrap();
        assert_eq!(emitter.fire(2), Err(Error::RuntimeClosed));

        drop(c);
        assert_eq!(emitter.fire(3), Err(Error::RuntimeClosed));
    }

    #[test]
    fn declared_cycle_fails_build() {
        struct A;
        impl Lifecycle for A {}
        impl Capability for A {}

        let err = Container::builder(Config::default())
            .register(ComponentDescriptor::new::<A, _>("a", |_| Ok(Arc::new(A))).depends_on::<A>(Qualifiers::none()))
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err.as_label(), "dependency_cycle");
    }
}
