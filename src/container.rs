use alloc::{sync::Arc, vec::Vec};
use core::any::type_name;
use parking_lot::RwLock;
use tracing::{debug, error, info_span};

use crate::{
    cache::{Cache, ResolutionState},
    context::ResolutionContext,
    errors::{RegistryErrorKind, ResolveErrorKind},
    identity::Identity,
    provider::{Dependencies, Provider, Value},
    registry::Registry,
};

/// Shared-resource container owning one registry and one cache.
///
/// Cloning the container clones a handle to the same registry and cache; a
/// fresh container built from a fresh registry shares nothing, which is the
/// intended setup for test isolation.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registry: RwLock<Registry>,
    cache: Cache,
}

impl Default for Container {
    fn default() -> Self {
        Self::new(Registry::new())
    }
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                registry: RwLock::new(registry),
                cache: Cache::new(),
            }),
        }
    }

    /// Installs a provider, honouring [`Config::register_once`](crate::Config::register_once).
    ///
    /// Replacing a provider that may already have been resolved resets its
    /// cache entry, so a stale value built by the discarded definition is
    /// never served.
    ///
    /// # Errors
    /// - Returns [`RegistryErrorKind::DuplicateRegistration`] if the identity
    ///   is taken and the registry is configured register-once
    pub fn register(&self, provider: Provider) -> Result<(), RegistryErrorKind> {
        let id = provider.id().clone();
        let replaced = self.inner.registry.write().register(provider)?;
        if replaced.is_some() {
            self.inner.cache.reset(&id);
        }
        Ok(())
    }

    /// Replaces a provider and invalidates its cached result, so the next
    /// `resolve` of this identity uses the new construction routine.
    ///
    /// This is the test-substitution path: it ignores
    /// [`Config::register_once`](crate::Config::register_once) and always
    /// replaces.
    ///
    /// # Warning
    /// Must not race with an in-flight resolution of the same identity.
    pub fn substitute(&self, provider: Provider) {
        let id = provider.id().clone();
        self.inner.registry.write().replace(provider);
        self.inner.cache.reset(&id);
    }

    /// Clears the cache entry for `id` back to `Unresolved`, starting a new
    /// epoch. The provider definition is left in place.
    ///
    /// # Warning
    /// Must not race with an in-flight resolution of the same identity.
    pub fn reset(&self, id: impl Into<Identity>) {
        self.inner.cache.reset(&id.into());
    }

    /// Resolves `id`, constructing it and its unresolved dependencies in
    /// declared order, or returns the cached result of a previous attempt.
    ///
    /// The construction routine runs at most once per identity per epoch,
    /// however many concurrent or repeated calls are made; every caller gets
    /// the same value or the same stored error until an explicit reset.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::NotFound`] if no provider is registered for `id`
    /// - Returns [`ResolveErrorKind::CycleDetected`] if `id` transitively depends on itself
    /// - Returns [`ResolveErrorKind::Factory`] if a construction routine failed
    pub fn resolve(&self, id: impl Into<Identity>) -> Result<Value, ResolveErrorKind> {
        let id = id.into();
        let mut context = ResolutionContext::new();
        self.resolve_with_context(&id, &mut context)
    }

    /// Resolves `id` and downcasts the value.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the value isn't a `T`,
    ///   and any error `resolve` returns
    pub fn resolve_as<T: Send + Sync + 'static>(&self, id: impl Into<Identity>) -> Result<Arc<T>, ResolveErrorKind> {
        let id = id.into();
        let value = self.resolve(id.clone())?;
        value.downcast().map_err(|_| {
            let err = ResolveErrorKind::IncorrectType {
                id,
                expected: type_name::<T>(),
            };
            error!("{}", err);
            err
        })
    }

    /// Eagerly resolves every registered identity, stopping at the first
    /// failure.
    ///
    /// Composition code that requires its resources at startup should call
    /// this once and treat failure as fatal, rather than deferring discovery
    /// of a broken dependency chain to first use.
    ///
    /// # Errors
    /// - Returns the first error any `resolve` returns
    pub fn resolve_all(&self) -> Result<(), ResolveErrorKind> {
        let ids: Vec<Identity> = self.inner.registry.read().ids().cloned().collect();
        for id in ids {
            self.resolve(id)?;
        }
        Ok(())
    }

    fn resolve_with_context(&self, id: &Identity, context: &mut ResolutionContext) -> Result<Value, ResolveErrorKind> {
        let span = info_span!("resolve", id = %id);
        let _guard = span.enter();

        // An ancestor on this call path is still in progress for `id`; its
        // entry lock is held by this thread, so the check must precede any
        // attempt to take it.
        if context.contains(id) {
            let err = ResolveErrorKind::CycleDetected {
                chain: context.chain_from(id),
            };
            error!("{}", err);
            return Err(err);
        }

        let entry = self.inner.cache.entry(id);
        let mut guard = entry.lock();

        match &guard.state {
            ResolutionState::Resolved(value) => {
                debug!("Found in cache");
                return Ok(value.clone());
            }
            ResolutionState::Failed(err) => {
                debug!("Failed in cache");
                return Err(err.clone());
            }
            // InProgress is only observable here if a construction routine
            // panicked while the lock was held; start the epoch over.
            ResolutionState::Unresolved | ResolutionState::InProgress => {}
        }

        let provider = self.inner.registry.read().lookup(id).cloned();
        let Some(provider) = provider else {
            // Not cached: a later registration of this identity must not be
            // masked by a stale `Failed` entry.
            let err = ResolveErrorKind::NotFound { id: id.clone() };
            error!("{}", err);
            return Err(err);
        };

        guard.state = ResolutionState::InProgress;
        context.push(id.clone());
        let result = self.construct(id, &provider, context);
        context.pop();

        match result {
            Ok(value) => {
                debug!("Cached");
                guard.state = ResolutionState::Resolved(value.clone());
                Ok(value)
            }
            Err(err) => {
                error!("{}", err);
                guard.state = ResolutionState::Failed(err.clone());
                Err(err)
            }
        }
    }

    fn construct(&self, id: &Identity, provider: &Provider, context: &mut ResolutionContext) -> Result<Value, ResolveErrorKind> {
        let mut values = Vec::with_capacity(provider.depends_on().len());
        for dependency in provider.depends_on() {
            values.push(self.resolve_with_context(dependency, context)?);
        }

        provider
            .construct(Dependencies::new(values))
            .map_err(|cause| ResolveErrorKind::Factory {
                id: id.clone(),
                cause: Arc::new(cause),
            })
    }
}
