use crate::identity::Identity;

#[derive(thiserror::Error, Debug)]
pub enum RegistryErrorKind {
    #[error("Provider already registered for {id}")]
    DuplicateRegistration { id: Identity },
}
