/// Config for a registry
/// ## Fields
/// - `register_once`:
///   If `true`, registering a provider for an identity that already has an
///   active definition fails with
///   [`RegistryErrorKind::DuplicateRegistration`](crate::RegistryErrorKind::DuplicateRegistration)
///   instead of replacing it.
///
///   This does **not** affect substitution, which always replaces.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub register_once: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { register_once: false }
    }
}
