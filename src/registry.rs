use alloc::{collections::BTreeMap, vec::Vec};

use crate::{config::Config, errors::RegistryErrorKind, identity::Identity, provider::Provider};

/// Store of active provider definitions, at most one per identity.
pub struct Registry {
    providers: BTreeMap<Identity, Provider>,
    config: Config,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[inline]
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            providers: BTreeMap::new(),
            config,
        }
    }

    /// Installs a provider under its identity and returns the replaced
    /// definition, if any.
    ///
    /// # Errors
    /// - Returns [`RegistryErrorKind::DuplicateRegistration`] if the identity
    ///   already has an active definition and [`Config::register_once`] is set
    pub fn register(&mut self, provider: Provider) -> Result<Option<Provider>, RegistryErrorKind> {
        if self.config.register_once && self.providers.contains_key(provider.id()) {
            return Err(RegistryErrorKind::DuplicateRegistration {
                id: provider.id().clone(),
            });
        }

        Ok(self.replace(provider))
    }

    /// Installs a provider unconditionally, ignoring [`Config::register_once`].
    /// This is the substitution path.
    pub fn replace(&mut self, provider: Provider) -> Option<Provider> {
        self.providers.insert(provider.id().clone(), provider)
    }

    #[inline]
    #[must_use]
    pub fn lookup(&self, id: &Identity) -> Option<&Provider> {
        self.providers.get(id)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: &Identity) -> bool {
        self.providers.contains_key(id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = &Identity> {
        self.providers.keys()
    }
}

/// Chainable builder for the startup registration pass.
///
/// Builder registration is always last-wins; [`Config::register_once`]
/// governs registrations made against the built container afterwards.
pub struct RegistryBuilder {
    providers: Vec<Provider>,
    config: Config,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            config: Config::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[inline]
    #[must_use]
    pub fn provide(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    #[must_use]
    pub fn build(self) -> Registry {
        let mut registry = Registry::with_config(self.config);
        for provider in self.providers {
            registry.replace(provider);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::{Registry, RegistryBuilder};
    use crate::{config::Config, errors::RegistryErrorKind, identity::Identity, provider::Provider};

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        registry.register(Provider::root("db", |_| Ok("DB1"))).unwrap();

        let id = Identity::from("db");
        assert!(registry.contains(&id));
        assert_eq!(registry.lookup(&id).unwrap().id(), &id);
        assert!(registry.lookup(&Identity::from("svc")).is_none());
    }

    #[test]
    fn test_last_registration_wins_by_default() {
        let mut registry = Registry::new();
        registry.register(Provider::root("db", |_| Ok(1i32))).unwrap();
        let replaced = registry.register(Provider::root("db", |_| Ok(2i32))).unwrap();

        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_once_refuses_duplicate() {
        let mut registry = Registry::with_config(Config { register_once: true });
        registry.register(Provider::root("db", |_| Ok(1i32))).unwrap();

        assert!(matches!(
            registry.register(Provider::root("db", |_| Ok(2i32))),
            Err(RegistryErrorKind::DuplicateRegistration { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_replace_ignores_register_once() {
        let mut registry = Registry::with_config(Config { register_once: true });
        registry.register(Provider::root("db", |_| Ok(1i32))).unwrap();

        assert!(registry.replace(Provider::root("db", |_| Ok(2i32))).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builder_is_last_wins() {
        let registry = RegistryBuilder::new()
            .with_config(Config { register_once: true })
            .provide(Provider::root("db", |_| Ok(1i32)))
            .provide(Provider::root("db", |_| Ok(2i32)))
            .build();

        assert_eq!(registry.len(), 1);
    }
}
