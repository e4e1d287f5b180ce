mod instantiate;
mod registry;
mod resolver;

pub use instantiate::InstantiateErrorKind;
pub use registry::RegistryErrorKind;
pub use resolver::ResolveErrorKind;
