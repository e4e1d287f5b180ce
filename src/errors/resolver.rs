use alloc::{boxed::Box, sync::Arc};
use core::fmt::{self, Display, Formatter};

use super::instantiate::InstantiateErrorKind;
use crate::identity::Identity;

/// Failure of a single `resolve` call.
///
/// `Clone` is deliberate: a terminal failure is cached per identity and the
/// identical stored error is handed to every later caller until a reset.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ResolveErrorKind {
    NotFound {
        id: Identity,
    },
    CycleDetected {
        /// Call path from the first occurrence of the repeated identity,
        /// in resolution order. The path closes back on its first element.
        chain: Box<[Identity]>,
    },
    IncorrectType {
        id: Identity,
        expected: &'static str,
    },
    Factory {
        id: Identity,
        cause: Arc<InstantiateErrorKind>,
    },
}

impl Display for ResolveErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => {
                write!(f, "Provider not found in registry: {id}")
            }
            Self::CycleDetected { chain } => {
                write!(f, "Cyclic dependency detected: ")?;
                for id in chain {
                    write!(f, "{id} -> ")?;
                }
                match chain.first() {
                    Some(first) => write!(f, "{first}"),
                    None => Ok(()),
                }
            }
            Self::IncorrectType { id, expected } => {
                write!(f, "Incorrect value type for {id}, expected {expected}")
            }
            Self::Factory { id, cause } => {
                write!(f, "Factory for {id} failed: {cause}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Identity, ResolveErrorKind};

    use alloc::{format, vec};

    #[test]
    fn test_cycle_display_closes_loop() {
        let err = ResolveErrorKind::CycleDetected {
            chain: vec![Identity::from("a"), Identity::from("b")].into_boxed_slice(),
        };

        assert_eq!(format!("{err}"), "Cyclic dependency detected: a -> b -> a");
    }
}
