use alloc::{sync::Arc, vec::Vec};
use core::{
    any::{type_name, Any},
    fmt::{self, Debug, Formatter},
};

use crate::{errors::InstantiateErrorKind, identity::Identity};

/// A value produced by a provider.
///
/// The same allocation is handed to every dependent and to every caller of
/// `resolve` for that identity until the entry is reset.
pub type Value = Arc<dyn Any + Send + Sync>;

pub(crate) type BoxedFactory = Arc<dyn Fn(Dependencies) -> Result<Value, InstantiateErrorKind> + Send + Sync>;

/// Resolved dependency values, in the order the provider declared them.
pub struct Dependencies(Vec<Value>);

impl Dependencies {
    #[inline]
    #[must_use]
    pub(crate) fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Downcasts the dependency at `index` of the declared list.
    ///
    /// # Errors
    /// - Returns [`InstantiateErrorKind::MissingDependency`] if `index` is out of bounds
    /// - Returns [`InstantiateErrorKind::DependencyType`] if the value isn't a `T`
    pub fn get<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>, InstantiateErrorKind> {
        let value = self
            .0
            .get(index)
            .ok_or(InstantiateErrorKind::MissingDependency { index })?;

        value.clone().downcast().map_err(|_| InstantiateErrorKind::DependencyType {
            index,
            expected: type_name::<T>(),
        })
    }
}

/// Immutable description of how to build one value: an identity, an ordered
/// list of dependency identities, and a construction routine taking the
/// resolved dependency values.
#[derive(Clone)]
pub struct Provider {
    id: Identity,
    depends_on: Vec<Identity>,
    factory: BoxedFactory,
}

impl Provider {
    #[must_use]
    pub fn new<T, F>(id: impl Into<Identity>, depends_on: impl IntoIterator<Item = impl Into<Identity>>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Dependencies) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
            factory: Arc::new(move |dependencies| factory(dependencies).map(|value| Arc::new(value) as Value)),
        }
    }

    /// Creates a provider with no dependencies.
    #[must_use]
    pub fn root<T, F>(id: impl Into<Identity>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Dependencies) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    {
        Self::new(id, core::iter::empty::<Identity>(), factory)
    }

    /// Wraps an already built value in a provider that just returns it.
    /// It can be used when the value was created outside the container.
    #[must_use]
    pub fn instance<T: Send + Sync + 'static>(id: impl Into<Identity>, value: T) -> Self {
        let value: Value = Arc::new(value);
        Self {
            id: id.into(),
            depends_on: Vec::new(),
            factory: Arc::new(move |_| Ok(value.clone())),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &Identity {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn depends_on(&self) -> &[Identity] {
        &self.depends_on
    }

    #[inline]
    pub(crate) fn construct(&self, dependencies: Dependencies) -> Result<Value, InstantiateErrorKind> {
        (self.factory)(dependencies)
    }
}

impl Debug for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.id)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}
